//! windcheck-providers: scorer service integrations.
//!
//! Implements the `AnswerScorer` trait for OpenAI-compatible chat
//! completion endpoints, plus a mock scorer for testing, and loads the
//! windcheck configuration.

pub mod config;
pub mod error;
pub mod mock;
pub mod openai;

pub use config::{load_config_from, ScorerConfig, SheetsConfig, WindcheckConfig};
pub use error::ScorerError;
pub use mock::MockScorer;
pub use openai::OpenAiScorer;
