// errors.rs
use crate::config::ConfigError;
use crate::domain::MapError;
use crate::scraper::ScraperError;
use crate::sinks::SinkError;
use thiserror::Error;

/// Errors that end a run. Every layer is fatal; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scrape(#[from] ScraperError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

// Type alias used by the pipeline stages.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(ConfigError::UnknownLogLevel(_)) => 1,
            _ => 2,
        }
    }
}
