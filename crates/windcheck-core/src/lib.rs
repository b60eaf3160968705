//! windcheck-core: data model, prompt builder, and assessment flow.
//!
//! This crate defines the question/submission data model, the scoring prompt
//! builder, verdict parsing for scorer replies, and the sequential assessment
//! engine that the rest of the windcheck system builds on.

pub mod aggregate;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod prompt;
pub mod traits;
pub mod verdict;
