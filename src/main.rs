use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use recipient_matcher::api::app_api_loop;
use recipient_matcher::db::Database;
use recipient_matcher::environment::Settings;
use recipient_matcher::logging::configure_logging;
use recipient_matcher::recipient::nicknames::{formal_name, nicknames_for, normalize_relationship};
use recipient_matcher::recipient::{Recipient, RecipientMatcher};

#[derive(Parser)]
#[command(author, version, about = "Resolve free-text names to saved recipients", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve,

    /// Resolve a name against a recipients file
    Match {
        /// Name to resolve
        #[arg(short, long)]
        name: String,

        /// JSON array of recipients
        #[arg(short, long)]
        recipients: PathBuf,
    },

    /// Typeahead suggestions from a recipients file
    Suggest {
        /// Partial name typed so far
        #[arg(short, long)]
        query: String,

        /// JSON array of recipients
        #[arg(short, long)]
        recipients: PathBuf,

        /// Maximum number of suggestions
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Store a recipients file for a user in the database
    Import {
        /// Owner of the recipients
        #[arg(short, long)]
        user: String,

        /// JSON array of recipients
        #[arg(short, long)]
        recipients: PathBuf,
    },

    /// Look up a name in the nickname and relationship tables
    Nickname {
        name: String,
    },
}

fn load_recipients(path: &Path) -> Result<Vec<Recipient>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep stdout quiet for commands that print JSON
    let default_filter = match cli.command {
        Commands::Serve => "info",
        _ => "warn",
    };
    configure_logging(&Settings::log_dir_from_env(), default_filter);

    let settings = Settings::from_env();

    let matcher = RecipientMatcher::with_config(settings.matcher);

    match cli.command {
        Commands::Serve => {
            info!("Starting recipient-matcher {}", recipient_matcher::build_info());
            app_api_loop(&settings).await?;
        }

        Commands::Match { name, recipients } => {
            let recipients = load_recipients(&recipients)?;
            let result = matcher.match_recipient(&name, &recipients)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if let Some(prompt) = result.confirmation_prompt() {
                eprintln!("{}", prompt);
            }
        }

        Commands::Suggest { query, recipients, limit } => {
            let recipients = load_recipients(&recipients)?;
            let suggestions = matcher.suggest(&query, &recipients, limit);
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }

        Commands::Import { user, recipients } => {
            let recipients = load_recipients(&recipients)?;
            let db = Database::new(&settings.database_path)
                .await
                .context("Failed to connect to database")?;
            let imported = db.add_recipients(&user, &recipients).await?;
            println!("Imported {} recipients for {}", imported, user);
        }

        Commands::Nickname { name } => {
            match formal_name(&name) {
                Some(formal) => println!("{} is a nickname for {}", name, formal),
                None => println!("{} is not a known nickname", name),
            }
            let nicknames = nicknames_for(&name);
            if !nicknames.is_empty() {
                println!("Nicknames for {}: {}", name, nicknames.join(", "));
            }
            if let Some(relationship) = normalize_relationship(&name) {
                println!("{} refers to a {}", name, relationship);
            }
        }
    }

    Ok(())
}
