pub mod listing;
pub mod mapper;

pub use listing::{FieldValue, ListingRecord, RecordField};
pub use mapper::{map_listings, MapError};
