//! Submission gathering: interactive prompts or a TOML answers file.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use windcheck_core::model::{QuestionCatalog, Submission};

/// TOML answers file: a name plus one answer per question id.
///
/// ```toml
/// name = "Max"
///
/// [answers]
/// igbt-switching = "IGBT schaltet unkontrolliert durch, Latching-Gefahr"
/// ```
#[derive(Debug, Deserialize)]
struct AnswersFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    answers: HashMap<String, String>,
}

/// Load a submission from an answers file. A `--name` override wins over
/// the name in the file.
pub fn from_answers_file(
    path: &Path,
    catalog: &QuestionCatalog,
    name_override: Option<&str>,
) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    let parsed: AnswersFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse answers file: {}", path.display()))?;

    for id in parsed.answers.keys() {
        if catalog.question(id).is_none() {
            tracing::warn!("answers file has no matching question for id '{id}'");
        }
    }

    let name = name_override
        .map(str::to_string)
        .or(parsed.name)
        .unwrap_or_default();

    let answers = catalog
        .questions
        .iter()
        .map(|q| {
            (
                q.id.clone(),
                parsed.answers.get(&q.id).cloned().unwrap_or_default(),
            )
        })
        .collect();

    Submission::new(&name, answers)
}

/// Gather a submission interactively on the terminal: the name first,
/// then one free-text answer per question, submitted as a whole.
pub fn gather_interactive(
    catalog: &QuestionCatalog,
    name_override: Option<&str>,
) -> Result<Submission> {
    println!("{}", catalog.name);
    if !catalog.description.is_empty() {
        println!("{}", catalog.description);
    }
    println!();

    let name = match name_override {
        Some(n) => n.to_string(),
        None => prompt_line("Ihr Name: ")?,
    };

    let mut answers = Vec::with_capacity(catalog.questions.len());
    for (i, question) in catalog.questions.iter().enumerate() {
        println!("\n{}. {}", i + 1, question.text);
        let answer = prompt_line("> ")?;
        answers.push((question.id.clone(), answer));
    }

    Submission::new(&name, answers)
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
