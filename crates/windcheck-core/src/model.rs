//! Core data model types for windcheck.
//!
//! These are the fundamental types that the entire windcheck system uses
//! to represent questions, submissions, and scored results.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single question in a catalog, with the canonical-answer pattern
/// the scorer grades against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the catalog.
    pub id: String,
    /// The question text presented to the submitter.
    pub text: String,
    /// Reference text describing the accepted correct reasoning.
    pub pattern: String,
}

/// A fixed, ordered set of questions. Loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCatalog {
    /// Unique identifier for this catalog.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what this catalog assesses.
    #[serde(default)]
    pub description: String,
    /// The questions in submission order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// One person's answers to a catalog, gathered in a single submit action.
///
/// Discarded after processing; nothing is retained across submissions.
#[derive(Debug, Clone)]
pub struct Submission {
    name: String,
    answers: Vec<(String, String)>,
}

impl Submission {
    /// Create a submission. The name must be non-empty; answers map
    /// question ids to free text and may be empty strings.
    pub fn new(name: &str, answers: Vec<(String, String)>) -> Result<Self> {
        let trimmed = name.trim();
        anyhow::ensure!(!trimmed.is_empty(), "submitter name must not be empty");
        Ok(Self {
            name: trimmed.to_string(),
            answers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The answer for a question id. Missing answers read as empty text,
    /// which is passed through to the scorer as-is.
    pub fn answer(&self, question_id: &str) -> &str {
        self.answers
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, a)| a.as_str())
            .unwrap_or("")
    }
}

/// The scored outcome for one question. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// The question text, verbatim.
    pub question: String,
    /// Score on the scorer's 0..=100 scale. Stored as returned, unclamped.
    pub score: i64,
    /// Short justification from the scorer.
    pub justification: String,
}

/// All score records for one submission, in question order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Unique identifier for this submission run.
    pub id: Uuid,
    /// When the submission was scored.
    pub created_at: DateTime<Utc>,
    /// Submitter name.
    pub submitter: String,
    /// Scored records, one per question that scored successfully.
    pub records: Vec<ScoreRecord>,
}

impl SubmissionResult {
    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: SubmissionResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }
}

/// The row shape appended to the persistence sink, in column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub name: String,
    pub question: String,
    pub score: i64,
    pub justification: String,
}

impl ResultRow {
    /// Build the sink row for one record of a submission.
    pub fn from_record(submitter: &str, record: &ScoreRecord) -> Self {
        Self {
            name: submitter.to_string(),
            question: record.question.clone(),
            score: record.score,
            justification: record.justification.clone(),
        }
    }
}
