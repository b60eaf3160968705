//! Core trait definitions for the scorer and persistence boundaries.
//!
//! These async traits are implemented by the `windcheck-providers` and
//! `windcheck-sheets` crates respectively.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::ResultRow;

// ---------------------------------------------------------------------------
// Answer scorer trait
// ---------------------------------------------------------------------------

/// Trait for external text-completion services that grade answers.
///
/// Implementations return the raw reply text; parsing the strict-JSON
/// verdict out of it is the engine's job (see [`crate::verdict`]).
#[async_trait]
pub trait AnswerScorer: Send + Sync {
    /// Human-readable scorer name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send one scoring instruction and await the reply.
    async fn score(&self, request: &ScoreRequest) -> anyhow::Result<ScoreReply>;
}

impl std::fmt::Debug for dyn AnswerScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerScorer")
            .field("name", &self.name())
            .finish()
    }
}

/// One scoring call to the external scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// Model identifier (e.g. "gpt-4o").
    pub model: String,
    /// The full scoring instruction from the prompt builder.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Raw reply from a scoring call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReply {
    /// The raw reply content, expected to be a strict-JSON verdict.
    pub content: String,
    /// Model that actually produced the reply.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

// ---------------------------------------------------------------------------
// Result sink trait
// ---------------------------------------------------------------------------

/// Trait for durable tabular stores that rows are appended to.
///
/// Opening/authorizing the store happens in the implementation's
/// constructor, once per submission cycle. Append order must match
/// call order; there is no rollback.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Append one row to the store.
    async fn append(&self, row: &ResultRow) -> anyhow::Result<()>;
}
