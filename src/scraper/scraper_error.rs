use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTML parse error: {0}")]
    HtmlParse(String),
    #[error("Unexpected page shape: {0} not found")]
    MissingElement(&'static str),
    #[error("Unexpected page shape: entry {entry} has no {what}")]
    MissingEntryElement { entry: usize, what: &'static str },
    #[error("Unexpected page shape: entry {entry} has {found} data fields, {field} expects index {index}")]
    MissingDataField {
        entry: usize,
        field: &'static str,
        index: usize,
        found: usize,
    },
    #[error("I/O error on {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
