//! Scoring error types

/// Failures raised by the scoring core.
///
/// The core never logs; callers decide how to surface these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    /// Malformed grade table or ranking parameters. Blocks any ranking.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Incomplete marks or roster/judging mismatch. Blocks submission.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for the scoring core
pub type ScoringResult<T> = Result<T, ScoringError>;
