pub mod csv_rows;
pub mod sheet_rows;

pub use csv_rows::{csv_header, to_csv_rows};
pub use sheet_rows::{sheet_cells, to_sheet_rows, SheetCell};
