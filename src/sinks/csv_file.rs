use crate::domain::{ListingRecord, RecordField};
use crate::formats::{csv_header, to_csv_rows};
use crate::sinks::{ExportSink, SinkError};
use csv::{QuoteStyle, WriterBuilder};
use std::path::PathBuf;
use tracing::info;

/// Local audit copy: header plus one line per record, strings quoted, numbers bare.
pub struct CsvSink {
    path: PathBuf,
    schema: Vec<RecordField>,
}

impl CsvSink {
    pub fn new(path: PathBuf, schema: Vec<RecordField>) -> Self {
        Self { path, schema }
    }

    fn csv_err(&self, source: csv::Error) -> SinkError {
        SinkError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl ExportSink for CsvSink {
    fn name(&self) -> &str {
        "csv"
    }

    fn export(&self, records: &[ListingRecord]) -> Result<(), SinkError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::NonNumeric)
            .from_path(&self.path)
            .map_err(|e| self.csv_err(e))?;

        writer
            .write_record(csv_header(&self.schema))
            .map_err(|e| self.csv_err(e))?;

        for row in to_csv_rows(records, &self.schema) {
            let cells = row
                .iter()
                .map(|v| v.map(|v| v.to_cell_string()).unwrap_or_default());
            writer.write_record(cells).map_err(|e| self.csv_err(e))?;
        }

        writer.flush().map_err(|source| SinkError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), rows = records.len(), "CSV written");
        Ok(())
    }
}
