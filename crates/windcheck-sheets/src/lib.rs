//! windcheck-sheets: Google Sheets persistence sink.
//!
//! Implements the `ResultSink` trait against the Google Sheets REST API:
//! authorizes once per submission cycle with a service-account key,
//! resolves the target spreadsheet by its exact name via the Drive API,
//! and appends one row per scored question to the first sheet.

pub mod auth;
pub mod error;
pub mod sink;

pub use auth::ServiceAccountKey;
pub use error::SinkError;
pub use sink::{SheetsEndpoints, SheetsSink};
