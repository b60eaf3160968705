//! Mock scorer for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use windcheck_core::traits::{AnswerScorer, ScoreReply, ScoreRequest};

/// A mock scorer for testing the assessment flow without real API calls.
///
/// Returns configurable verdicts based on prompt content matching.
pub struct MockScorer {
    /// Map of prompt substring → raw reply content.
    replies: HashMap<String, String>,
    /// Default reply if no prompt matches.
    default_reply: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<ScoreRequest>>,
}

impl MockScorer {
    /// Create a new mock scorer with the given prompt→reply mappings.
    pub fn new(replies: HashMap<String, String>) -> Self {
        Self {
            replies,
            default_reply: r#"{"punkte": 50, "begruendung": "teils richtig"}"#.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same reply.
    pub fn with_fixed_reply(reply: &str) -> Self {
        Self {
            replies: HashMap::new(),
            default_reply: reply.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this scorer.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this scorer.
    pub fn last_request(&self) -> Option<ScoreRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerScorer for MockScorer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn score(&self, request: &ScoreRequest) -> anyhow::Result<ScoreReply> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        // Find a matching reply based on prompt content
        let content = self
            .replies
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_reply.clone());

        Ok(ScoreReply {
            content,
            model: request.model.clone(),
            latency_ms: 1,
        })
    }
}
