// config.rs
use crate::domain::RecordField;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use url::Url;

pub const DEFAULT_CONF_FILE: &str = "../conf/conf.json";
pub const DEFAULT_DEBUG_DIR: &str = "../log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("log level not recognized: {0}")]
    UnknownLogLevel(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to resolve path {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown csv_schema column '{0}'")]
    UnknownCsvColumn(String),
    #[error("{0} output needs a non-empty sheet_schema")]
    MissingSheetSchema(&'static str),
    #[error("no output configured: set csv_file, key_file and sheet_title, or xlsx_file")]
    NoSinks,
}

/// The JSON file as written by the operator.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "url_abor")]
    url: String,
    csv_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
    csv_schema: Option<Vec<String>>,
    sheet_schema: Option<Vec<String>>,
    key_file: Option<PathBuf>,
    sheet_title: Option<String>,
    listing_url: Option<String>,
    xlsx_file: Option<PathBuf>,
    debug_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CsvOutput {
    pub path: PathBuf,
    pub schema: Vec<RecordField>,
}

#[derive(Debug, Clone)]
pub struct SheetOutput {
    pub key_file: PathBuf,
    pub title: String,
    pub schema: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct XlsxOutput {
    pub path: PathBuf,
    pub schema: Vec<String>,
}

/// Resolved run configuration. Built once in `main` and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: Url,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
    pub debug_dir: PathBuf,
    pub listing_url: Option<String>,
    pub csv: Option<CsvOutput>,
    pub sheet: Option<SheetOutput>,
    pub xlsx: Option<XlsxOutput>,
}

impl Config {
    /// Read and resolve the config file. `cli_level` wins over the file's `log_level`.
    pub fn load(path: &Path, cli_level: Option<Level>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, cli_level)
    }

    pub fn from_json(text: &str, cli_level: Option<Level>) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;

        let log_level = match cli_level {
            Some(level) => level,
            None => match raw.log_level.as_deref() {
                Some(name) => parse_log_level(name)?,
                None => Level::INFO,
            },
        };

        let url = Url::parse(&raw.url).map_err(|source| ConfigError::InvalidUrl {
            url: raw.url.clone(),
            source,
        })?;

        let csv = match raw.csv_file {
            Some(path) => {
                let schema = match raw.csv_schema {
                    Some(names) => names
                        .iter()
                        .map(|n| RecordField::from_key(n).ok_or_else(|| ConfigError::UnknownCsvColumn(n.clone())))
                        .collect::<Result<Vec<_>, _>>()?,
                    None => RecordField::csv_schema(raw.listing_url.is_some()),
                };
                Some(CsvOutput {
                    path: absolute(&path)?,
                    schema,
                })
            }
            None => None,
        };

        let sheet_schema = raw.sheet_schema.filter(|s| !s.is_empty());

        let sheet = match (raw.key_file, raw.sheet_title) {
            (Some(key_file), Some(title)) => Some(SheetOutput {
                key_file: absolute(&key_file)?,
                title,
                schema: sheet_schema
                    .clone()
                    .ok_or(ConfigError::MissingSheetSchema("spreadsheet"))?,
            }),
            _ => None,
        };

        let xlsx = match raw.xlsx_file {
            Some(path) => Some(XlsxOutput {
                path: absolute(&path)?,
                schema: sheet_schema.ok_or(ConfigError::MissingSheetSchema("xlsx"))?,
            }),
            None => None,
        };

        if csv.is_none() && sheet.is_none() && xlsx.is_none() {
            return Err(ConfigError::NoSinks);
        }

        Ok(Config {
            url,
            log_file: raw.log_file.as_deref().map(absolute).transpose()?,
            log_level,
            debug_dir: absolute(raw.debug_dir.as_deref().unwrap_or(Path::new(DEFAULT_DEBUG_DIR)))?,
            listing_url: raw.listing_url,
            csv,
            sheet,
            xlsx,
        })
    }

    /// Diagnostic HTML dumps are written only at debug verbosity or above.
    pub fn debug_dumps(&self) -> bool {
        self.log_level >= Level::DEBUG
    }
}

/// Accepts the level names operators already use in their config files.
pub fn parse_log_level(name: &str) -> Result<Level, ConfigError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "CRITICAL" | "FATAL" | "ERROR" => Ok(Level::ERROR),
        "WARNING" | "WARN" => Ok(Level::WARN),
        "INFO" => Ok(Level::INFO),
        "DEBUG" => Ok(Level::DEBUG),
        "NOTSET" | "TRACE" => Ok(Level::TRACE),
        _ => Err(ConfigError::UnknownLogLevel(name.to_string())),
    }
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::Path {
        path: path.to_path_buf(),
        source,
    })
}
