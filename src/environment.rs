use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::recipient::MatcherConfig;

/// Runtime settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database_path: String,
    pub log_dir: String,
    /// `production` hides match diagnostics from API responses.
    pub app_env: String,
    pub matcher: MatcherConfig,
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = MatcherConfig::default();
        Settings {
            port: get_env_var_or("PORT", 8080),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "recipients.db".to_string()),
            log_dir: Self::log_dir_from_env(),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            matcher: MatcherConfig {
                high_confidence: get_env_var_or("MATCH_HIGH_CONFIDENCE", defaults.high_confidence),
                inclusion_floor: get_env_var_or("MATCH_INCLUSION_FLOOR", defaults.inclusion_floor),
                margin: get_env_var_or("MATCH_MARGIN", defaults.margin),
                max_candidates: get_env_var_or("MATCH_MAX_CANDIDATES", defaults.max_candidates),
            },
        }
    }

    /// Log directory alone, readable before logging is configured.
    pub fn log_dir_from_env() -> String {
        env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string())
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

/// Retrieves an environment variable and parses it, falling back to `default`
/// when it is unset or unparseable.
///
/// # Arguments
/// - `var`: The name of the environment variable.
/// - `default`: Value used when the variable is missing or invalid.
pub fn get_env_var_or<T: FromStr>(var: &str, default: T) -> T {
    match env::var(var) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring invalid value for {}: '{}'", var, raw);
                default
            }
        },
        Err(_) => default,
    }
}
