/// Errors raised by the matcher. Only input validation can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type MatchOutcome<T> = Result<T, MatchError>;
