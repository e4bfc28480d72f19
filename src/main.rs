use crate::cli::Cli;
use crate::config::Config;
use crate::domain::ListingRecord;
use crate::errors::{AppError, AppResult};
use crate::pipeline::Pipeline;
use crate::scraper::{HtmlFile, PageFetcher, PageSource};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};

mod cli;
mod config;
mod domain;
mod errors;
mod formats;
mod google;
mod logging;
mod pipeline;
mod scraper;
mod sinks;

#[cfg(test)]
mod tests;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1️⃣ Check the command-line log level before touching the config
    let cli_level = match cli.level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::from(1);
        }
    };

    // 2️⃣ Load the config file
    let conf_file = std::path::absolute(&cli.conf_file).unwrap_or_else(|_| cli.conf_file.clone());
    let config = match Config::load(&conf_file, cli_level) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::from(AppError::from(e).exit_code());
        }
    };

    // 3️⃣ Set up the logger
    if let Err(e) = logging::init(&config) {
        eprintln!("❌ Failed to open log file: {e}");
        return ExitCode::from(2);
    }
    debug!(?cli, "args");
    debug!(?config, "conf");

    // 4️⃣ Scrape and export
    match run(&cli, &config) {
        Ok(records) => {
            info!(records = records.len(), "Run complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {e}");
            eprintln!("❌ Run failed: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli, config: &Config) -> AppResult<Vec<ListingRecord>> {
    let source: Box<dyn PageSource> = match &cli.html_file {
        Some(path) => Box::new(HtmlFile::new(path.clone())),
        None => Box::new(PageFetcher::new()?),
    };

    let pipeline = Pipeline::new(config, source, sinks::from_config(config))?;
    pipeline.run()
}
