// src/domain/listing.rs

use std::fmt;

/// One favourite listing, fully typed. Built once by the mapper and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub address: String,
    pub market_status: String,
    pub price: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub house_area_sqft: i64,
    pub property_area_ac: f64,
    pub year_built: i64,
    pub mls_number: i64,
    /// Same for every record of a run (extended CSV layout).
    pub listing_url: Option<String>,
}

/// Named columns a record can fill. `key` is the CSV header and `csv_schema`
/// name; `sheet_key` is the name used in `sheet_schema`, where "Status" is left
/// to the sheet's own workflow column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Address,
    MarketStatus,
    Price,
    Bedrooms,
    Bathrooms,
    HouseAreaSqft,
    PropertyAreaAc,
    YearBuilt,
    Mls,
    Url,
}

impl RecordField {
    /// Fixed CSV column order.
    pub const CSV_COLUMNS: [RecordField; 9] = [
        RecordField::Address,
        RecordField::MarketStatus,
        RecordField::Price,
        RecordField::Bedrooms,
        RecordField::Bathrooms,
        RecordField::HouseAreaSqft,
        RecordField::PropertyAreaAc,
        RecordField::YearBuilt,
        RecordField::Mls,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RecordField::Address => "Address",
            RecordField::MarketStatus => "Status",
            RecordField::Price => "Price",
            RecordField::Bedrooms => "Bedrooms",
            RecordField::Bathrooms => "Bathrooms",
            RecordField::HouseAreaSqft => "HouseAreaSqft",
            RecordField::PropertyAreaAc => "PropertyAreaAc",
            RecordField::YearBuilt => "YearBuilt",
            RecordField::Mls => "MLS",
            RecordField::Url => "URL",
        }
    }

    pub fn sheet_key(self) -> &'static str {
        match self {
            RecordField::MarketStatus => "MarketStatus",
            other => other.key(),
        }
    }

    /// Exact, case-sensitive lookup of a CSV column name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().find(|f| f.key() == key)
    }

    /// Exact, case-sensitive lookup of a spreadsheet column name.
    pub fn from_sheet_key(key: &str) -> Option<Self> {
        Self::all().find(|f| f.sheet_key() == key)
    }

    fn all() -> impl Iterator<Item = RecordField> {
        Self::CSV_COLUMNS.into_iter().chain([RecordField::Url])
    }

    /// The default CSV layout: 9 columns, or 10 with the listing URL.
    pub fn csv_schema(with_url: bool) -> Vec<RecordField> {
        let mut schema = Self::CSV_COLUMNS.to_vec();
        if with_url {
            schema.push(RecordField::Url);
        }
        schema
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A record value borrowed for output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl FieldValue<'_> {
    /// String form used for spreadsheet cells and unquoted CSV numbers.
    /// Whole floats keep one decimal ("2.0") so they stay distinguishable from integers.
    pub fn to_cell_string(&self) -> String {
        match *self {
            FieldValue::Int(v) => v.to_string(),
            FieldValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                format!("{v:.1}")
            }
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Text(s) => s.to_string(),
        }
    }
}

impl ListingRecord {
    pub fn field(&self, field: RecordField) -> Option<FieldValue<'_>> {
        let value = match field {
            RecordField::Address => FieldValue::Text(&self.address),
            RecordField::MarketStatus => FieldValue::Text(&self.market_status),
            RecordField::Price => FieldValue::Int(self.price),
            RecordField::Bedrooms => FieldValue::Int(self.bedrooms),
            RecordField::Bathrooms => FieldValue::Int(self.bathrooms),
            RecordField::HouseAreaSqft => FieldValue::Int(self.house_area_sqft),
            RecordField::PropertyAreaAc => FieldValue::Float(self.property_area_ac),
            RecordField::YearBuilt => FieldValue::Int(self.year_built),
            RecordField::Mls => FieldValue::Int(self.mls_number),
            RecordField::Url => FieldValue::Text(self.listing_url.as_deref()?),
        };
        Some(value)
    }

    /// Lookup by spreadsheet column name; `None` when the record has no such key.
    pub fn sheet_value(&self, key: &str) -> Option<FieldValue<'_>> {
        RecordField::from_sheet_key(key).and_then(|f| self.field(f))
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> ListingRecord {
    ListingRecord {
        address: "123 Main St, Austin, TX 78701".to_string(),
        market_status: "Active".to_string(),
        price: 1_234_000,
        bedrooms: 4,
        bathrooms: 3,
        house_area_sqft: 2_450,
        property_area_ac: 0.25,
        year_built: 1998,
        mls_number: 5_551_234,
        listing_url: None,
    }
}
