//! Verdict parsing for scorer replies.
//!
//! The scorer is instructed to reply with a strict JSON object using
//! exactly the contract keys `punkte` and `begruendung`. Replies are
//! decoded defensively: a markdown code fence around the object is
//! tolerated, anything else that does not match the shape maps to
//! [`ScoringError::Parse`] rather than propagating a raw decode error.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::model::ScoreRecord;

/// The structured verdict inside a scorer reply. Field names are fixed
/// by the scorer contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Score on the announced 0..=100 scale. Not validated or clamped;
    /// out-of-range values are stored as returned.
    pub punkte: i64,
    /// Short justification sentence.
    pub begruendung: String,
}

impl Verdict {
    /// Pair this verdict with its question text.
    pub fn into_record(self, question: &str) -> ScoreRecord {
        ScoreRecord {
            question: question.to_string(),
            score: self.punkte,
            justification: self.begruendung,
        }
    }
}

/// Parse a raw scorer reply into a [`Verdict`].
pub fn parse_verdict(raw: &str) -> Result<Verdict, ScoringError> {
    let candidate = strip_code_fence(raw);
    serde_json::from_str(candidate).map_err(|e| ScoringError::Parse(e.to_string()))
}

/// Strip a single surrounding markdown code fence, if present.
///
/// Some models wrap the JSON object in ```json ... ``` despite the
/// json-object response format; the payload inside is what we want.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the optional language tag on the opening fence line
    match inner.split_once('\n') {
        Some((first_line, body)) if first_line.trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            body.trim()
        }
        _ => inner.trim(),
    }
}
