//! The Google Sheets result sink.
//!
//! `open` authorizes once and resolves the spreadsheet id from its exact
//! name via the Drive API; `append` adds one row per call to the first
//! sheet, preserving call order. There is no retry and no rollback.

use async_trait::async_trait;
use serde::Deserialize;

use windcheck_core::model::ResultRow;
use windcheck_core::traits::ResultSink;

use crate::auth::{fetch_access_token, ServiceAccountKey, SHEETS_SCOPES};
use crate::error::SinkError;

const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com";
const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API endpoint overrides, used by tests to point at mock servers.
#[derive(Debug, Clone, Default)]
pub struct SheetsEndpoints {
    pub token_url: Option<String>,
    pub drive_base_url: Option<String>,
    pub sheets_base_url: Option<String>,
}

/// An open, authorized handle to one spreadsheet.
#[derive(Debug)]
pub struct SheetsSink {
    client: reqwest::Client,
    access_token: String,
    spreadsheet_id: String,
    sheets_base_url: String,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Deserialize)]
struct FileEntry {
    id: String,
}

impl SheetsSink {
    /// Authorize with the service account and resolve the spreadsheet id
    /// from its exact name. Called once per submission cycle, before the
    /// per-row append loop.
    pub async fn open(
        key: &ServiceAccountKey,
        spreadsheet_name: &str,
        endpoints: SheetsEndpoints,
    ) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        let access_token =
            fetch_access_token(&client, key, SHEETS_SCOPES, endpoints.token_url.as_deref()).await?;

        let drive_base = endpoints
            .drive_base_url
            .unwrap_or_else(|| DEFAULT_DRIVE_BASE_URL.to_string());
        let sheets_base = endpoints
            .sheets_base_url
            .unwrap_or_else(|| DEFAULT_SHEETS_BASE_URL.to_string());

        let query = format!(
            "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet'",
            spreadsheet_name.replace('\'', "\\'")
        );

        let response = client
            .get(format!("{drive_base}/drive/v3/files"))
            .bearer_auth(&access_token)
            .query(&[("q", query.as_str()), ("fields", "files(id,name)")])
            .send()
            .await
            .map_err(|e| SinkError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Auth(format!(
                "spreadsheet lookup rejected (HTTP {status}): {body}"
            )));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Network(format!(
                "spreadsheet lookup failed (HTTP {status}): {body}"
            )));
        }

        let listing: FileList = response
            .json()
            .await
            .map_err(|e| SinkError::Network(format!("malformed file listing: {e}")))?;

        let Some(entry) = listing.files.first() else {
            return Err(SinkError::StoreNotFound(spreadsheet_name.to_string()));
        };

        tracing::debug!(
            spreadsheet = %spreadsheet_name,
            id = %entry.id,
            "resolved spreadsheet"
        );

        Ok(Self {
            client,
            access_token,
            spreadsheet_id: entry.id.clone(),
            sheets_base_url: sheets_base,
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }
}

#[async_trait]
impl ResultSink for SheetsSink {
    async fn append(&self, row: &ResultRow) -> anyhow::Result<()> {
        // Appending to range A1 targets the first sheet of the spreadsheet
        let url = format!(
            "{}/v4/spreadsheets/{}/values/A1:append",
            self.sheets_base_url, self.spreadsheet_id
        );

        let body = serde_json::json!({
            "values": [[row.name, row.question, row.score, row.justification]]
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await
            .map_err(|e| SinkError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(SinkError::Append { status, message }.into());
        }

        tracing::debug!(question = %row.question, "row appended");
        Ok(())
    }
}
