//! Scoring error types.
//!
//! A failed question never aborts the rest of a submission; the engine
//! records one of these per failure and continues with the next question.

use thiserror::Error;

/// Why a single question could not be scored.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The scorer call itself failed (network, service error, timeout).
    #[error("scorer call failed: {0}")]
    Transport(String),

    /// The scorer replied, but the reply was not the expected JSON shape.
    #[error("scorer reply did not match the expected shape: {0}")]
    Parse(String),
}

impl ScoringError {
    /// Short classification label, used in notices and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::Transport(_) => "transport",
            ScoringError::Parse(_) => "parse",
        }
    }
}
