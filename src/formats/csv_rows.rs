use crate::domain::{FieldValue, ListingRecord, RecordField};

/// Header line for a CSV layout.
pub fn csv_header(schema: &[RecordField]) -> Vec<&'static str> {
    schema.iter().map(|f| f.key()).collect()
}

/// Record values in schema order. `None` only for the URL column of a run
/// without a listing URL.
pub fn to_csv_rows<'a>(
    records: &'a [ListingRecord],
    schema: &[RecordField],
) -> Vec<Vec<Option<FieldValue<'a>>>> {
    records
        .iter()
        .map(|record| schema.iter().map(|&f| record.field(f)).collect())
        .collect()
}
