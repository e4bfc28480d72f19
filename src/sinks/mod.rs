mod csv_file;
mod google_sheet;
mod xlsx_file;

pub use csv_file::CsvSink;
pub use google_sheet::SheetSink;
pub use xlsx_file::XlsxSink;

use crate::config::Config;
use crate::domain::ListingRecord;
use crate::google::GoogleError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("xlsx error on {path}: {source}")]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    #[error("spreadsheet export failed: {0}")]
    Sheets(#[from] GoogleError),
}

/// An export destination for one run's records.
pub trait ExportSink {
    fn name(&self) -> &str;
    fn export(&self, records: &[ListingRecord]) -> Result<(), SinkError>;
}

/// Sinks enabled by the configuration, in the order they run.
pub fn from_config(config: &Config) -> Vec<Box<dyn ExportSink>> {
    let mut sinks: Vec<Box<dyn ExportSink>> = Vec::new();

    if let Some(csv) = &config.csv {
        sinks.push(Box::new(CsvSink::new(csv.path.clone(), csv.schema.clone())));
    }
    if let Some(sheet) = &config.sheet {
        sinks.push(Box::new(SheetSink::new(
            sheet.key_file.clone(),
            sheet.title.clone(),
            sheet.schema.clone(),
        )));
    }
    if let Some(xlsx) = &config.xlsx {
        sinks.push(Box::new(XlsxSink::new(xlsx.path.clone(), xlsx.schema.clone())));
    }

    sinks
}
