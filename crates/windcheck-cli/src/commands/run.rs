//! The `windcheck run` command.
//!
//! Drives one submission end to end: gather input, score each question,
//! display the table, append rows to the spreadsheet. Credentials are
//! checked up front so the flow never starts without them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use windcheck_core::catalog::{builtin_catalog, parse_catalog};
use windcheck_core::engine::{AssessmentEngine, EngineConfig, ProgressReporter};
use windcheck_core::error::ScoringError;
use windcheck_core::model::{ResultRow, ScoreRecord, SubmissionResult};
use windcheck_core::traits::ResultSink;
use windcheck_providers::config::{create_scorer, load_config_from, SheetsConfig};
use windcheck_sheets::{ServiceAccountKey, SheetsEndpoints, SheetsSink};

use crate::form;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_question_start(&self, question_id: &str, index: usize, total: usize) {
        eprintln!("  Scoring {index}/{total}: {question_id}");
    }

    fn on_question_scored(&self, question_id: &str, record: &ScoreRecord) {
        eprintln!("  Done: {question_id} ({} points)", record.score);
    }

    fn on_question_failed(&self, question_id: &str, error: &ScoringError) {
        eprintln!("  FAILED: {question_id}: {error}");
    }

    fn on_submission_complete(&self, scored: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nScoring complete: {scored} scored, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    catalog_path: Option<PathBuf>,
    name: Option<String>,
    answers: Option<PathBuf>,
    model: Option<String>,
    output: Option<PathBuf>,
    no_persist: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    // Both credentials are preconditions: resolve them before any input
    // is gathered or any external call is made.
    let scorer = create_scorer(&config.scorer)?;

    let sheets_key = if no_persist {
        None
    } else {
        let Some(key_path) = &config.sheets.service_account_file else {
            anyhow::bail!(
                "no service account key configured; set [sheets].service_account_file \
                 in windcheck.toml or the WINDCHECK_SERVICE_ACCOUNT_FILE environment \
                 variable (or pass --no-persist)"
            );
        };
        Some(ServiceAccountKey::from_file(key_path)?)
    };

    let catalog = match &catalog_path {
        Some(path) => parse_catalog(path)?,
        None => builtin_catalog(),
    };
    anyhow::ensure!(
        !catalog.questions.is_empty(),
        "catalog '{}' has no questions",
        catalog.id
    );

    // AwaitingInput: the empty-name guard lives in Submission::new, so
    // the flow cannot reach scoring without a submitter name.
    let submission = match &answers {
        Some(path) => form::from_answers_file(path, &catalog, name.as_deref())?,
        None => form::gather_interactive(&catalog, name.as_deref())?,
    };

    // Scoring
    let engine_config = EngineConfig {
        model: model.unwrap_or_else(|| config.scorer.model.clone()),
        max_tokens: config.scorer.max_tokens,
        temperature: config.scorer.temperature,
    };
    let engine = AssessmentEngine::new(Arc::from(scorer), engine_config);

    eprintln!(
        "windcheck: scoring {} answers for {}",
        catalog.questions.len(),
        submission.name()
    );
    let outcome = engine.run(&catalog, &submission, &ConsoleReporter).await?;

    // Displaying: always reached, even if some or all questions failed
    println!("\nDanke {}. Hier ist Ihre Auswertung:", outcome.result.submitter);
    print_result_table(&outcome.result);

    if !outcome.failures.is_empty() {
        eprintln!("\nNot scored:");
        for failure in &outcome.failures {
            eprintln!("  {}: {}", failure.question_id, failure.error);
        }
    }

    if let Some(path) = &output {
        outcome.result.save_json(path)?;
        eprintln!("Result saved to: {}", path.display());
    }

    // Persisting: only the records that exist are appended
    if let Some(key) = &sheets_key {
        persist(&outcome.result, key, &config.sheets).await?;
    }

    Ok(())
}

fn print_result_table(result: &SubmissionResult) {
    use comfy_table::Table;

    let mut table = Table::new();
    table.set_header(vec!["Question", "Score", "Feedback"]);
    for record in &result.records {
        table.add_row(vec![
            record.question.clone(),
            record.score.to_string(),
            record.justification.clone(),
        ]);
    }
    println!("{table}");
}

/// Append one row per record. The store is opened once; an open failure
/// means no rows are attempted. A single rejected append is surfaced as
/// a notice and does not roll back or stop the remaining rows.
async fn persist(
    result: &SubmissionResult,
    key: &ServiceAccountKey,
    sheets: &SheetsConfig,
) -> Result<()> {
    let endpoints = SheetsEndpoints {
        token_url: sheets.token_url.clone(),
        drive_base_url: sheets.drive_base_url.clone(),
        sheets_base_url: sheets.sheets_base_url.clone(),
    };

    let sink = SheetsSink::open(key, &sheets.spreadsheet_name, endpoints)
        .await
        .with_context(|| {
            format!("could not open spreadsheet '{}'", sheets.spreadsheet_name)
        })?;

    let mut failed = 0usize;
    for record in &result.records {
        let row = ResultRow::from_record(&result.submitter, record);
        if let Err(e) = sink.append(&row).await {
            eprintln!("  Append failed for '{}': {e:#}", record.question);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} rows could not be appended; appended rows are kept",
            result.records.len()
        );
    }

    eprintln!(
        "Results stored in spreadsheet '{}' ({} rows).",
        sheets.spreadsheet_name,
        result.records.len()
    );
    Ok(())
}
