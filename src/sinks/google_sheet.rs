use crate::domain::ListingRecord;
use crate::formats::to_sheet_rows;
use crate::google::{ServiceAccountKey, SheetsClient};
use crate::sinks::{ExportSink, SinkError};
use std::path::PathBuf;
use tracing::info;

/// Row 1 holds the operator's header; new rows go in right below it.
pub const SHEET_FIRST_DATA_ROW: usize = 2;

/// Appends the batch to the first tab of a shared tracking spreadsheet.
pub struct SheetSink {
    key_file: PathBuf,
    title: String,
    schema: Vec<String>,
}

impl SheetSink {
    pub fn new(key_file: PathBuf, title: String, schema: Vec<String>) -> Self {
        Self {
            key_file,
            title,
            schema,
        }
    }
}

impl ExportSink for SheetSink {
    fn name(&self) -> &str {
        "google-sheet"
    }

    fn export(&self, records: &[ListingRecord]) -> Result<(), SinkError> {
        let rows = to_sheet_rows(records, &self.schema);

        let key = ServiceAccountKey::from_file(&self.key_file)?;
        let client = SheetsClient::authorize(&key)?;
        let spreadsheet = client.open_by_title(&self.title)?;
        let worksheet = client.first_worksheet(&spreadsheet)?;
        info!(
            spreadsheet = %spreadsheet.name,
            worksheet = %worksheet.title,
            rows = rows.len(),
            "Exporting to spreadsheet..."
        );

        client.insert_rows(&spreadsheet, &worksheet, &rows, SHEET_FIRST_DATA_ROW)?;
        Ok(())
    }
}
