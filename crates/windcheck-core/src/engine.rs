//! Sequential assessment engine.
//!
//! Drives the scoring phase of one submission: builds one prompt per
//! question, calls the scorer synchronously per question, parses each
//! reply into a score record, and collects records in question order.
//! A failed question is recorded as a failure notice and skipped; it
//! never aborts the remaining questions.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::aggregate::ResultAggregator;
use crate::error::ScoringError;
use crate::model::{QuestionCatalog, ScoreRecord, Submission, SubmissionResult};
use crate::prompt::build_scoring_prompt;
use crate::traits::{AnswerScorer, ScoreRequest};
use crate::verdict::parse_verdict;

/// Configuration for the assessment engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Model identifier passed to the scorer.
    pub model: String,
    /// Max tokens per scoring call.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 for stable grading).
    pub temperature: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_tokens: 512,
            temperature: 0.0,
        }
    }
}

/// A question that could not be scored in this submission.
#[derive(Debug)]
pub struct QuestionFailure {
    /// Question id from the catalog.
    pub question_id: String,
    /// The question text, for notices.
    pub question: String,
    /// What went wrong.
    pub error: ScoringError,
}

/// Outcome of scoring one submission.
///
/// `result.records.len()` is at most the catalog's question count, with
/// equality exactly when `failures` is empty.
#[derive(Debug)]
pub struct SubmissionOutcome {
    /// Ordered records for the questions that scored successfully.
    pub result: SubmissionResult,
    /// One entry per question that failed, in question order.
    pub failures: Vec<QuestionFailure>,
}

/// Progress reporting trait, implemented by the CLI for console notices.
pub trait ProgressReporter: Send + Sync {
    fn on_question_start(&self, question_id: &str, index: usize, total: usize);
    fn on_question_scored(&self, question_id: &str, record: &ScoreRecord);
    fn on_question_failed(&self, question_id: &str, error: &ScoringError);
    fn on_submission_complete(&self, scored: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_question_start(&self, _: &str, _: usize, _: usize) {}
    fn on_question_scored(&self, _: &str, _: &ScoreRecord) {}
    fn on_question_failed(&self, _: &str, _: &ScoringError) {}
    fn on_submission_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// The assessment engine. Holds the scorer boundary and scoring settings.
pub struct AssessmentEngine {
    scorer: Arc<dyn AnswerScorer>,
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(scorer: Arc<dyn AnswerScorer>, config: EngineConfig) -> Self {
        Self { scorer, config }
    }

    /// Score one submission against a catalog.
    ///
    /// Scorer calls are issued strictly sequentially, one per question,
    /// each awaited until reply or failure. No retries: every failure is
    /// reported once through `progress` and the loop continues.
    pub async fn run(
        &self,
        catalog: &QuestionCatalog,
        submission: &Submission,
        progress: &dyn ProgressReporter,
    ) -> Result<SubmissionOutcome> {
        let start = Instant::now();
        let total = catalog.questions.len();

        let mut aggregator = ResultAggregator::new();
        let mut failures = Vec::new();

        for (index, question) in catalog.questions.iter().enumerate() {
            progress.on_question_start(&question.id, index + 1, total);

            let request = ScoreRequest {
                model: self.config.model.clone(),
                prompt: build_scoring_prompt(
                    &question.text,
                    &question.pattern,
                    submission.answer(&question.id),
                ),
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            };

            let scored = match self.scorer.score(&request).await {
                Ok(reply) => parse_verdict(&reply.content)
                    .map(|verdict| verdict.into_record(&question.text)),
                Err(e) => Err(ScoringError::Transport(format!("{e:#}"))),
            };

            match scored {
                Ok(record) => {
                    tracing::debug!(
                        question = %question.id,
                        score = record.score,
                        "question scored"
                    );
                    progress.on_question_scored(&question.id, &record);
                    aggregator.push(record);
                }
                Err(error) => {
                    tracing::warn!(
                        question = %question.id,
                        kind = error.kind(),
                        "scoring failed: {error}"
                    );
                    progress.on_question_failed(&question.id, &error);
                    failures.push(QuestionFailure {
                        question_id: question.id.clone(),
                        question: question.text.clone(),
                        error,
                    });
                }
            }
        }

        let scored = aggregator.len();
        progress.on_submission_complete(scored, failures.len(), start.elapsed());

        Ok(SubmissionOutcome {
            result: aggregator.into_result(submission.name()),
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ScoreReply;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Test scorer that replies from a fixed script, one entry per call.
    /// `Err` entries simulate transport failures.
    struct ScriptedScorer {
        script: Mutex<Vec<Result<String, String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedScorer {
        fn new(script: Vec<Result<String, String>>) -> Self {
            Self {
                script: Mutex::new(script),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnswerScorer for ScriptedScorer {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn score(&self, request: &ScoreRequest) -> anyhow::Result<ScoreReply> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            let mut script = self.script.lock().unwrap();
            anyhow::ensure!(!script.is_empty(), "scripted scorer ran out of replies");
            match script.remove(0) {
                Ok(content) => Ok(ScoreReply {
                    content,
                    model: request.model.clone(),
                    latency_ms: 1,
                }),
                Err(msg) => Err(anyhow::anyhow!(msg)),
            }
        }
    }

    fn two_question_catalog() -> QuestionCatalog {
        crate::catalog::builtin_catalog()
    }

    fn max_submission() -> Submission {
        Submission::new(
            "Max",
            vec![
                (
                    "igbt-switching".into(),
                    "IGBT schaltet unkontrolliert durch, Latching-Gefahr".into(),
                ),
                (
                    "bladder-accumulator".into(),
                    "Pumpe taktet zu oft, Druckabfall".into(),
                ),
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn all_questions_scored_yields_one_record_each() {
        let scorer = Arc::new(ScriptedScorer::new(vec![
            Ok(r#"{"punkte": 87, "begruendung": "gut"}"#.into()),
            Ok(r#"{"punkte": 70, "begruendung": "solide"}"#.into()),
        ]));
        let engine = AssessmentEngine::new(scorer.clone(), EngineConfig::default());

        let outcome = engine
            .run(&two_question_catalog(), &max_submission(), &NoopReporter)
            .await
            .unwrap();

        assert_eq!(outcome.result.records.len(), 2);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.result.submitter, "Max");
        assert_eq!(outcome.result.records[0].score, 87);
        assert_eq!(outcome.result.records[1].score, 70);

        // Each prompt embeds the answer for its own question
        let prompts = scorer.prompts();
        assert!(prompts[0].contains("Latching-Gefahr"));
        assert!(prompts[1].contains("Druckabfall"));
    }

    #[tokio::test]
    async fn failure_on_second_question_keeps_first_record() {
        let scorer = Arc::new(ScriptedScorer::new(vec![
            Ok(r#"{"punkte": 87, "begruendung": "gut"}"#.into()),
            Err("connection refused".into()),
        ]));
        let engine = AssessmentEngine::new(scorer, EngineConfig::default());

        let outcome = engine
            .run(&two_question_catalog(), &max_submission(), &NoopReporter)
            .await
            .unwrap();

        assert_eq!(outcome.result.records.len(), 1);
        assert!(outcome.result.records[0].question.contains("IGBT"));
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].question_id, "bladder-accumulator");
        assert!(matches!(
            outcome.failures[0].error,
            ScoringError::Transport(_)
        ));
    }

    #[tokio::test]
    async fn malformed_reply_is_isolated_as_parse_failure() {
        let scorer = Arc::new(ScriptedScorer::new(vec![
            Ok("not json at all".into()),
            Ok(r#"{"punkte": 70, "begruendung": "solide"}"#.into()),
        ]));
        let engine = AssessmentEngine::new(scorer, EngineConfig::default());

        let outcome = engine
            .run(&two_question_catalog(), &max_submission(), &NoopReporter)
            .await
            .unwrap();

        // Question 1 failed to parse, question 2 was still attempted
        assert_eq!(outcome.result.records.len(), 1);
        assert!(outcome.result.records[0].question.contains("Blasenspeicher"));
        assert_eq!(outcome.failures.len(), 1);
        assert!(matches!(outcome.failures[0].error, ScoringError::Parse(_)));
    }

    #[tokio::test]
    async fn records_follow_catalog_order() {
        let scorer = Arc::new(ScriptedScorer::new(vec![
            Ok(r#"{"punkte": 10, "begruendung": "a"}"#.into()),
            Ok(r#"{"punkte": 20, "begruendung": "b"}"#.into()),
        ]));
        let engine = AssessmentEngine::new(scorer, EngineConfig::default());

        let catalog = two_question_catalog();
        let outcome = engine
            .run(&catalog, &max_submission(), &NoopReporter)
            .await
            .unwrap();

        assert_eq!(outcome.result.records[0].question, catalog.questions[0].text);
        assert_eq!(outcome.result.records[1].question, catalog.questions[1].text);
    }

    #[tokio::test]
    async fn unanswered_question_is_still_scored() {
        let scorer = Arc::new(ScriptedScorer::new(vec![
            Ok(r#"{"punkte": 0, "begruendung": "keine Antwort"}"#.into()),
            Ok(r#"{"punkte": 70, "begruendung": "solide"}"#.into()),
        ]));
        let engine = AssessmentEngine::new(scorer.clone(), EngineConfig::default());

        let submission = Submission::new(
            "Max",
            vec![("bladder-accumulator".into(), "Pumpe taktet zu oft".into())],
        )
        .unwrap();

        let outcome = engine
            .run(&two_question_catalog(), &submission, &NoopReporter)
            .await
            .unwrap();

        assert_eq!(outcome.result.records.len(), 2);
        // The missing answer went through as empty text
        assert!(scorer.prompts()[0].contains("Antwort: \"\""));
    }
}
