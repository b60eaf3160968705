//! Persistence sink error types.

use thiserror::Error;

/// Errors that can occur when opening or appending to the sheet store.
#[derive(Debug, Error)]
pub enum SinkError {
    /// No spreadsheet with the configured name is visible to the
    /// service account.
    #[error("spreadsheet not found: {0}")]
    StoreNotFound(String),

    /// Authorization failed (bad key, missing scope, token rejected).
    #[error("authorization failed: {0}")]
    Auth(String),

    /// A row append was rejected by the API. Previously appended rows
    /// are not rolled back.
    #[error("row append failed (HTTP {status}): {message}")]
    Append { status: u16, message: String },

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}
