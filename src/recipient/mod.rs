pub mod error;
pub mod matching;
pub mod nicknames;
pub mod normalizer;
pub mod types;

pub use error::{MatchError, MatchOutcome};
pub use matching::{match_recipient, suggest, MatcherConfig, RecipientMatcher};
pub use types::*;

// Module-level constants
pub const TARGET_RECIPIENT: &str = "recipient";
