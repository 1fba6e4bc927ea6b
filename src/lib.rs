pub mod api;
pub mod db;
pub mod environment;
pub mod logging;
pub mod recipient;

pub use recipient::{match_recipient, suggest, MatchResult, Recipient, RecipientMatcher};

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_DB: &str = "db_query";

/// Version string including the git hash and build time stamped by build.rs.
pub fn build_info() -> String {
    format!(
        "{} ({} built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP")
    )
}
