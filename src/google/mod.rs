//! Minimal Google Sheets access for a service account: token exchange,
//! spreadsheet lookup by title and row insertion.

pub mod auth;
pub mod sheets;

pub use auth::ServiceAccountKey;
pub use sheets::SheetsClient;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("failed to read key file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid key file {path}: {source}")]
    KeyParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to sign token request: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Google API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid API url: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),
    #[error("spreadsheet {0} has no worksheets")]
    NoWorksheet(String),
}
