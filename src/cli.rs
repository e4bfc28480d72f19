use crate::config::{parse_log_level, ConfigError, DEFAULT_CONF_FILE};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "abor_scraper", about = "Export ABOR favorite listings to CSV and spreadsheets")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONF_FILE)]
    pub conf_file: PathBuf,

    /// Logger verbosity level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Parse a saved page instead of fetching the configured URL
    #[arg(long)]
    pub html_file: Option<PathBuf>,
}

impl Cli {
    pub fn level(&self) -> Result<Option<Level>, ConfigError> {
        self.log_level.as_deref().map(parse_log_level).transpose()
    }
}
