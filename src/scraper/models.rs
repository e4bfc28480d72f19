// Raw values read from one favourite entry, before any coercion.
//
// entry  (div.col-lg-7.col-md-6.col-sm-12)
//  ├── span.d-text * N          price, (unused), mls, beds, baths, sqft, year, acres
//  ├── div.col-xs-9.d-fontSize--small...
//  │    └── span.formula.J_formula
//  │         └── span            market status (optional)
//  ├── div.col-sm-12.d-fontSize--largest...
//  │    └── span.formula.J_formula
//  │         └── a               address line 1
//  └── div.col-sm-12.d-fontSize--small...
//       └── span.formula.J_formula   address line 2

#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    /// 1-based position on the page.
    pub entry: usize,

    pub price: String,
    pub mls: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub house_area: String,
    pub year_built: String,
    pub property_area: String,

    pub status: Option<String>,
    pub address_line1: String,
    pub address_line2: String,
}

/// Values held in the entry's homogeneous `span.d-text` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataField {
    Price,
    Mls,
    Bedrooms,
    Bathrooms,
    HouseArea,
    YearBuilt,
    PropertyArea,
}

impl DataField {
    /// Position in the data list. This is the only place that knows the page layout;
    /// index 1 is not read.
    pub fn index(self) -> usize {
        match self {
            DataField::Price => 0,
            DataField::Mls => 2,
            DataField::Bedrooms => 3,
            DataField::Bathrooms => 4,
            DataField::HouseArea => 5,
            DataField::YearBuilt => 6,
            DataField::PropertyArea => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataField::Price => "price",
            DataField::Mls => "MLS number",
            DataField::Bedrooms => "bedrooms",
            DataField::Bathrooms => "bathrooms",
            DataField::HouseArea => "house area",
            DataField::YearBuilt => "year built",
            DataField::PropertyArea => "property area",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DataField; 7] = [
        DataField::Price,
        DataField::Mls,
        DataField::Bedrooms,
        DataField::Bathrooms,
        DataField::HouseArea,
        DataField::YearBuilt,
        DataField::PropertyArea,
    ];

    #[test]
    fn layout_skips_index_one() {
        let mut indices: Vec<usize> = ALL.iter().map(|f| f.index()).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 2, 3, 4, 5, 6, 7]);
    }
}
