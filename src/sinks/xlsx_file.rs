use crate::domain::{FieldValue, ListingRecord};
use crate::formats::{sheet_cells, SheetCell};
use crate::sinks::{ExportSink, SinkError};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::PathBuf;
use tracing::info;

/// Local workbook in the spreadsheet layout: schema names as the header row,
/// numbers written as numbers.
pub struct XlsxSink {
    path: PathBuf,
    schema: Vec<String>,
}

impl XlsxSink {
    pub fn new(path: PathBuf, schema: Vec<String>) -> Self {
        Self { path, schema }
    }

    fn build(&self, records: &[ListingRecord]) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Favorites")?;

        // Headers
        for (col, header) in self.schema.iter().enumerate() {
            worksheet.write_string(0, col as u16, header)?;
        }

        // Rows
        for (i, record) in records.iter().enumerate() {
            let r = (i + 1) as u32;
            for (col, cell) in sheet_cells(record, &self.schema).into_iter().enumerate() {
                let c = col as u16;
                match cell {
                    SheetCell::Value(FieldValue::Int(v)) => {
                        worksheet.write_number(r, c, v as f64)?;
                    }
                    SheetCell::Value(FieldValue::Float(v)) => {
                        worksheet.write_number(r, c, v)?;
                    }
                    SheetCell::Value(FieldValue::Text(s)) => {
                        worksheet.write_string(r, c, s)?;
                    }
                    SheetCell::Placeholder => {
                        worksheet.write_string(r, c, cell.to_cell_string())?;
                    }
                    SheetCell::Blank => {}
                }
            }
        }

        Ok(workbook)
    }
}

impl ExportSink for XlsxSink {
    fn name(&self) -> &str {
        "xlsx"
    }

    fn export(&self, records: &[ListingRecord]) -> Result<(), SinkError> {
        let xlsx_err = |source| SinkError::Xlsx {
            path: self.path.clone(),
            source,
        };

        let mut workbook = self.build(records).map_err(xlsx_err)?;
        workbook.save(&self.path).map_err(xlsx_err)?;

        info!(path = %self.path.display(), rows = records.len(), "xlsx written");
        Ok(())
    }
}
