//! windcheck configuration loading.
//!
//! Credentials for the scorer service and the spreadsheet sink are
//! provisioned externally; this module only reads them. A missing
//! credential is surfaced before any scoring or persisting step.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use windcheck_core::traits::AnswerScorer;

use crate::openai::OpenAiScorer;

/// Scorer service configuration.
///
/// Note: Custom Debug impl masks the API key to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// API key for the scorer service. Supports `${VAR}` interpolation.
    #[serde(default)]
    pub api_key: String,
    /// Override for OpenAI-compatible endpoints.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model used for grading.
    #[serde(default = "default_model")]
    pub model: String,
    /// Max tokens per scoring call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature (0.0 for stable grading).
    #[serde(default)]
    pub temperature: f64,
}

impl std::fmt::Debug for ScorerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorerConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_max_tokens() -> u32 {
    512
}

/// Spreadsheet sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Path to the service-account key JSON (spreadsheet + drive scope).
    #[serde(default)]
    pub service_account_file: Option<PathBuf>,
    /// Exact name of the pre-existing target spreadsheet.
    #[serde(default = "default_spreadsheet")]
    pub spreadsheet_name: String,
    /// OAuth token endpoint override (for tests).
    #[serde(default)]
    pub token_url: Option<String>,
    /// Drive API base URL override (for tests).
    #[serde(default)]
    pub drive_base_url: Option<String>,
    /// Sheets API base URL override (for tests).
    #[serde(default)]
    pub sheets_base_url: Option<String>,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            service_account_file: None,
            spreadsheet_name: default_spreadsheet(),
            token_url: None,
            drive_base_url: None,
            sheets_base_url: None,
        }
    }
}

fn default_spreadsheet() -> String {
    "Wind_Ergebnisse".to_string()
}

/// Top-level windcheck configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindcheckConfig {
    #[serde(default)]
    pub scorer: ScorerConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. the explicit path, when given
/// 2. `windcheck.toml` in the current directory
/// 3. `~/.config/windcheck/config.toml`
///
/// Environment variable overrides: `WINDCHECK_OPENAI_KEY`,
/// `WINDCHECK_SERVICE_ACCOUNT_FILE`, `WINDCHECK_SPREADSHEET`.
pub fn load_config_from(path: Option<&Path>) -> Result<WindcheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("windcheck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<WindcheckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => WindcheckConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("WINDCHECK_OPENAI_KEY") {
        config.scorer.api_key = key;
    }
    if let Ok(file) = std::env::var("WINDCHECK_SERVICE_ACCOUNT_FILE") {
        config.sheets.service_account_file = Some(PathBuf::from(file));
    }
    if let Ok(name) = std::env::var("WINDCHECK_SPREADSHEET") {
        config.sheets.spreadsheet_name = name;
    }

    // Resolve ${VAR} references in credential fields
    config.scorer.api_key = resolve_env_vars(&config.scorer.api_key);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("windcheck"))
}

/// Create the scorer from its configuration.
///
/// Fails when no API key is configured: scoring must never start
/// without a credential.
pub fn create_scorer(config: &ScorerConfig) -> Result<Box<dyn AnswerScorer>> {
    anyhow::ensure!(
        !config.api_key.trim().is_empty(),
        "no scorer API key configured; set [scorer].api_key in windcheck.toml \
         or the WINDCHECK_OPENAI_KEY environment variable"
    );
    Ok(Box::new(OpenAiScorer::new(
        &config.api_key,
        config.base_url.clone(),
    )))
}
