//! Ordered result collection for one submission.

use chrono::Utc;
use uuid::Uuid;

use crate::model::{ScoreRecord, SubmissionResult};

/// Collects score records in submission order.
///
/// Purely an ordered collector: no deduplication, no reordering, and no
/// aggregation math. Records arrive in the fixed question order because
/// the engine scores sequentially.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    records: Vec<ScoreRecord>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next successfully scored record.
    pub fn push(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finalize into a [`SubmissionResult`] for display and persistence.
    pub fn into_result(self, submitter: &str) -> SubmissionResult {
        SubmissionResult {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            submitter: submitter.to_string(),
            records: self.records,
        }
    }
}
