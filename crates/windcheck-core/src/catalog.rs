//! TOML question-catalog parser.
//!
//! Loads question catalogs from TOML files and directories, validates
//! them, and ships the built-in wind-energy catalog.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionCatalog};

/// The built-in wind-energy catalog, used when no catalog file is given.
const BUILTIN_CATALOG: &str = r#"
[catalog]
id = "wind-energy"
name = "Technisches Assessment: Windenergie"
description = "Technische Fragen zu Umrichter- und Pitch-Systemen"

[[questions]]
id = "igbt-switching"
text = "Warum darf ein IGBT nicht unter Last geschaltet werden, wenn die Ansteuerung fehlt?"
pattern = "Gefahr des 'Latching', Zerstörung durch unkontrolliertes Durchschalten."

[[questions]]
id = "bladder-accumulator"
text = "Woran erkennen Sie bei einer Sichtprüfung, dass ein hydraulischer Blasenspeicher defekt sein könnte?"
pattern = "Pumpe läuft zu oft (kurze Zyklen), Druck fällt schlagartig ab, ruckartige Bewegung."
"#;

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    pattern: String,
}

/// The catalog shipped with windcheck.
pub fn builtin_catalog() -> QuestionCatalog {
    parse_catalog_str(BUILTIN_CATALOG, Path::new("<builtin>"))
        .expect("built-in catalog must parse")
}

/// Parse a single TOML file into a `QuestionCatalog`.
pub fn parse_catalog(path: &Path) -> Result<QuestionCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `QuestionCatalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<QuestionCatalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            text: q.text,
            pattern: q.pattern,
        })
        .collect();

    Ok(QuestionCatalog {
        id: parsed.catalog.id,
        name: parsed.catalog.name,
        description: parsed.catalog.description,
        questions,
    })
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<QuestionCatalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &QuestionCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "catalog has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &catalog.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    // Check for empty question texts
    for question in &catalog.questions {
        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "question text is empty".into(),
            });
        }
    }

    // A question without a pattern gives the scorer nothing to grade against
    for question in &catalog.questions {
        if question.pattern.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "canonical answer pattern is empty".into(),
            });
        }
    }

    warnings
}
