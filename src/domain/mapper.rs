// src/domain/mapper.rs

use crate::domain::listing::{ListingRecord, RecordField};
use crate::scraper::RawListing;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

/// Shown in place of a market status the page does not carry.
pub const STATUS_UNSET: &str = "N/A";

const ADDRESS_SEPARATOR: &str = ", ";

#[derive(Debug, Error)]
pub enum MapError {
    #[error("entry {entry}: {field} is not a valid {expected}: {text:?}")]
    InvalidNumber {
        entry: usize,
        field: RecordField,
        expected: &'static str,
        text: String,
    },
}

impl ListingRecord {
    /// Coerces the raw text of one entry. Any bad number fails the whole entry.
    pub fn from_raw(raw: &RawListing, listing_url: Option<&str>) -> Result<Self, MapError> {
        let entry = raw.entry;

        Ok(ListingRecord {
            address: format!("{}{}{}", raw.address_line1, ADDRESS_SEPARATOR, raw.address_line2),
            market_status: raw
                .status
                .clone()
                .unwrap_or_else(|| STATUS_UNSET.to_string()),
            price: parse_count(entry, RecordField::Price, &strip_currency(&raw.price))?,
            bedrooms: parse_count(entry, RecordField::Bedrooms, &raw.bedrooms)?,
            bathrooms: parse_count(entry, RecordField::Bathrooms, &raw.bathrooms)?,
            house_area_sqft: parse_count(
                entry,
                RecordField::HouseAreaSqft,
                &strip_currency(&raw.house_area),
            )?,
            property_area_ac: parse_area(entry, &raw.property_area)?,
            year_built: parse_int(entry, RecordField::YearBuilt, &raw.year_built)?,
            mls_number: parse_int(entry, RecordField::Mls, &raw.mls)?,
            listing_url: listing_url.map(str::to_string),
        })
    }
}

/// Maps every raw entry in page order. The first failure aborts the batch.
pub fn map_listings(
    raw: &[RawListing],
    listing_url: Option<&str>,
) -> Result<Vec<ListingRecord>, MapError> {
    let mut seen_mls = HashSet::new();
    let mut records = Vec::with_capacity(raw.len());

    for entry in raw {
        let record = ListingRecord::from_raw(entry, listing_url)?;

        info!("Favorite property {}:", entry.entry);
        info!("  MLS number: {}", record.mls_number);
        info!("  Address: {}", record.address);
        info!("  Market status: {}", record.market_status);
        info!("  Price: {}", record.price);
        info!("  Number of bedrooms: {}", record.bedrooms);
        info!("  Number of bathrooms: {}", record.bathrooms);
        info!("  House area (sqft): {}", record.house_area_sqft);
        info!("  Property area (ac): {:.6}", record.property_area_ac);
        info!("  Year built: {}", record.year_built);

        if !seen_mls.insert(record.mls_number) {
            warn!(mls = record.mls_number, entry = entry.entry, "MLS number repeated on page");
        }

        records.push(record);
    }

    Ok(records)
}

/// "$1,234,000" -> "1234000"
fn strip_currency(text: &str) -> String {
    text.replace(['$', ','], "")
}

fn parse_int(entry: usize, field: RecordField, text: &str) -> Result<i64, MapError> {
    text.trim().parse::<i64>().map_err(|_| MapError::InvalidNumber {
        entry,
        field,
        expected: "integer",
        text: text.to_string(),
    })
}

fn parse_count(entry: usize, field: RecordField, text: &str) -> Result<i64, MapError> {
    match parse_int(entry, field, text)? {
        n if n >= 0 => Ok(n),
        _ => Err(MapError::InvalidNumber {
            entry,
            field,
            expected: "non-negative integer",
            text: text.to_string(),
        }),
    }
}

fn parse_area(entry: usize, text: &str) -> Result<f64, MapError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(MapError::InvalidNumber {
            entry,
            field: RecordField::PropertyAreaAc,
            expected: "non-negative number",
            text: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: Option<&str>) -> RawListing {
        RawListing {
            entry: 1,
            price: "$1,234,000".to_string(),
            mls: "5551234".to_string(),
            bedrooms: "4".to_string(),
            bathrooms: "3".to_string(),
            house_area: "250,500".to_string(),
            year_built: "1998".to_string(),
            property_area: "3.5".to_string(),
            status: status.map(str::to_string),
            address_line1: "123 Main St".to_string(),
            address_line2: "Austin, TX 78701".to_string(),
        }
    }

    #[test]
    fn coerces_numbers() {
        let record = ListingRecord::from_raw(&raw(Some("Active")), None).unwrap();
        assert_eq!(record.price, 1_234_000);
        assert_eq!(record.house_area_sqft, 250_500);
        assert_eq!(record.property_area_ac, 3.5);
        assert_eq!(record.mls_number, 5_551_234);
        assert_eq!(record.year_built, 1998);
        assert_eq!(record.market_status, "Active");
        assert_eq!(record.listing_url, None);
    }

    #[test]
    fn joins_address() {
        let record = ListingRecord::from_raw(&raw(None), None).unwrap();
        assert_eq!(record.address, "123 Main St, Austin, TX 78701");
    }

    #[test]
    fn absent_status_defaults() {
        let record = ListingRecord::from_raw(&raw(None), None).unwrap();
        assert_eq!(record.market_status, STATUS_UNSET);
    }

    #[test]
    fn listing_url_is_copied() {
        let record = ListingRecord::from_raw(&raw(None), Some("https://example.com/faves")).unwrap();
        assert_eq!(record.listing_url.as_deref(), Some("https://example.com/faves"));
    }

    #[test]
    fn fractional_bathrooms_fail() {
        let mut r = raw(None);
        r.bathrooms = "2.5".to_string();
        let err = ListingRecord::from_raw(&r, None).unwrap_err();
        assert!(matches!(
            err,
            MapError::InvalidNumber { field: RecordField::Bathrooms, .. }
        ));
    }

    #[test]
    fn non_numeric_price_fails() {
        let mut r = raw(None);
        r.price = "Call for price".to_string();
        let err = ListingRecord::from_raw(&r, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "entry 1: Price is not a valid integer: \"Call for price\""
        );
    }

    #[test]
    fn one_bad_entry_fails_batch() {
        let good = raw(None);
        let mut bad = raw(None);
        bad.entry = 2;
        bad.property_area = "-".to_string();
        assert!(map_listings(&[good, bad], None).is_err());
    }

    #[test]
    fn keeps_page_order_and_duplicates() {
        let first = raw(Some("Active"));
        let mut second = raw(Some("Pending"));
        second.entry = 2;
        let records = map_listings(&[first, second], None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].market_status, "Active");
        assert_eq!(records[1].market_status, "Pending");
        assert_eq!(records[0].mls_number, records[1].mls_number);
    }
}
