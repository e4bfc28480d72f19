// sheet_rows.rs
use crate::domain::{FieldValue, ListingRecord};

/// Written to the first column when the record has nothing for it, so new rows
/// enter the tracking sheet's workflow as "new".
pub const STATUS_PLACEHOLDER: &str = "new";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetCell<'a> {
    Value(FieldValue<'a>),
    Placeholder,
    Blank,
}

impl SheetCell<'_> {
    pub fn to_cell_string(&self) -> String {
        match self {
            SheetCell::Value(v) => v.to_cell_string(),
            SheetCell::Placeholder => STATUS_PLACEHOLDER.to_string(),
            SheetCell::Blank => String::new(),
        }
    }
}

/// Cells for one record, positional to `schema`.
pub fn sheet_cells<'a>(record: &'a ListingRecord, schema: &[String]) -> Vec<SheetCell<'a>> {
    schema
        .iter()
        .enumerate()
        .map(|(i, name)| match record.sheet_value(name) {
            Some(value) => SheetCell::Value(value),
            None if i == 0 => SheetCell::Placeholder,
            None => SheetCell::Blank,
        })
        .collect()
}

/// One row per record plus a trailing empty row that separates this batch
/// from earlier ones in the sheet.
pub fn to_sheet_rows(records: &[ListingRecord], schema: &[String]) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            sheet_cells(record, schema)
                .iter()
                .map(SheetCell::to_cell_string)
                .collect()
        })
        .collect();

    rows.push(vec![String::new(); schema.len()]);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::sample_record;

    fn schema(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn placeholder_for_missing_first_column() {
        let record = sample_record();
        let rows = to_sheet_rows(&[record.clone()], &schema(&["Status", "Address", "MLS"]));

        assert_eq!(
            rows[0],
            vec!["new".to_string(), record.address.clone(), "5551234".to_string()]
        );
    }

    #[test]
    fn market_status_has_its_own_column() {
        let rows = to_sheet_rows(
            &[sample_record()],
            &schema(&["Status", "MarketStatus", "Price"]),
        );
        assert_eq!(rows[0], vec!["new", "Active", "1234000"]);
    }

    #[test]
    fn first_column_from_record_when_present() {
        let rows = to_sheet_rows(&[sample_record()], &schema(&["MLS", "Status"]));
        assert_eq!(rows[0], vec!["5551234", ""]);
    }

    #[test]
    fn unknown_columns_are_blank() {
        let rows = to_sheet_rows(
            &[sample_record()],
            &schema(&["Address", "Notes", "PropertyAreaAc", "Agent"]),
        );
        assert_eq!(rows[0][1], "");
        assert_eq!(rows[0][2], "0.25");
        assert_eq!(rows[0][3], "");
    }

    #[test]
    fn trailing_separator_row() {
        let cols = schema(&["Status", "Address", "MLS", "Notes"]);
        let records = vec![sample_record(), sample_record(), sample_record()];

        let rows = to_sheet_rows(&records, &cols);

        assert_eq!(rows.len(), records.len() + 1);
        assert_eq!(rows.last().unwrap(), &vec![String::new(); cols.len()]);
        assert!(rows.iter().all(|r| r.len() == cols.len()));
    }

    #[test]
    fn empty_batch_is_just_the_separator() {
        let rows = to_sheet_rows(&[], &schema(&["Status", "Address"]));
        assert_eq!(rows, vec![vec![String::new(), String::new()]]);
    }
}
