// extract.rs
use crate::scraper::dump::DebugDump;
use crate::scraper::models::{DataField, RawListing};
use crate::scraper::ScraperError;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

const CONTAINER: &str = r#"[id="_ctl0_m_divAsyncPagedDisplays"]"#;
const ENTRY: &str = "div.col-lg-7.col-md-6.col-sm-12";
const DATA: &str = "span.d-text";
const STATUS_BLOCK: &str = "div.col-xs-9.d-fontSize--small.col-sm-8.col-md-8.col-lg-8";
const ADDRESS1_BLOCK: &str = "div.col-sm-12.d-fontSize--largest.d-text.d-color--brandDark";
const ADDRESS2_BLOCK: &str = "div.col-sm-12.d-fontSize--small.d-textSoft.d-paddingBottom--8";
const FORMULA: &str = "span.formula.J_formula";

/// One favourite's markup, borrowed from the parsed page for a single pass.
#[derive(Debug, Clone, Copy)]
pub struct RawEntry<'a> {
    /// 1-based, in document order.
    pub number: usize,
    pub element: ElementRef<'a>,
}

/// Compiled selectors for the favourites page.
pub struct ListingExtractor {
    container: Selector,
    entry: Selector,
    data: Selector,
    status_block: Selector,
    address1_block: Selector,
    address2_block: Selector,
    formula: Selector,
    span: Selector,
    anchor: Selector,
}

impl ListingExtractor {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            container: parse_selector(CONTAINER)?,
            entry: parse_selector(ENTRY)?,
            data: parse_selector(DATA)?,
            status_block: parse_selector(STATUS_BLOCK)?,
            address1_block: parse_selector(ADDRESS1_BLOCK)?,
            address2_block: parse_selector(ADDRESS2_BLOCK)?,
            formula: parse_selector(FORMULA)?,
            span: parse_selector("span")?,
            anchor: parse_selector("a")?,
        })
    }

    /// Reads every entry on the page. Fails on the first entry that does not
    /// have the expected shape, so a partial page never gets through.
    pub fn extract(
        &self,
        doc: &Html,
        dump: Option<&DebugDump>,
    ) -> Result<Vec<RawListing>, ScraperError> {
        let container = self.container(doc)?;
        if let Some(dump) = dump {
            dump.container(container)?;
        }

        let entries = self.entries(container);
        info!("Found {} favorite entries", entries.len());

        entries
            .iter()
            .map(|entry| {
                if let Some(dump) = dump {
                    dump.entry(entry.number, entry.element)?;
                }
                self.read(entry)
            })
            .collect()
    }

    pub fn container<'a>(&self, doc: &'a Html) -> Result<ElementRef<'a>, ScraperError> {
        doc.select(&self.container)
            .next()
            .ok_or(ScraperError::MissingElement("favorites container"))
    }

    pub fn entries<'a>(&self, container: ElementRef<'a>) -> Vec<RawEntry<'a>> {
        container
            .select(&self.entry)
            .enumerate()
            .map(|(i, element)| RawEntry {
                number: i + 1,
                element,
            })
            .collect()
    }

    pub fn read(&self, entry: &RawEntry<'_>) -> Result<RawListing, ScraperError> {
        let n = entry.number;
        let data: Vec<String> = entry.element.select(&self.data).map(text_of).collect();
        debug!(entry = n, ?data, "listing data");

        let field = |f: DataField| -> Result<String, ScraperError> {
            data.get(f.index())
                .cloned()
                .ok_or(ScraperError::MissingDataField {
                    entry: n,
                    field: f.name(),
                    index: f.index(),
                    found: data.len(),
                })
        };

        let status = self.status(entry)?;
        debug!(entry = n, ?status, "status span");

        let address_line1 = self
            .formula_in(entry, &self.address1_block, "address line 1 block")?
            .select(&self.anchor)
            .next()
            .map(text_of)
            .ok_or(ScraperError::MissingEntryElement {
                entry: n,
                what: "address line 1 link",
            })?;
        debug!(entry = n, %address_line1, "address line 1");

        let address_line2 =
            text_of(self.formula_in(entry, &self.address2_block, "address line 2 block")?);
        debug!(entry = n, %address_line2, "address line 2");

        Ok(RawListing {
            entry: n,
            price: field(DataField::Price)?,
            mls: field(DataField::Mls)?,
            bedrooms: field(DataField::Bedrooms)?,
            bathrooms: field(DataField::Bathrooms)?,
            house_area: field(DataField::HouseArea)?,
            year_built: field(DataField::YearBuilt)?,
            property_area: field(DataField::PropertyArea)?,
            status,
            address_line1,
            address_line2,
        })
    }

    /// `None` when the status wrapper is present but holds no inner span.
    fn status(&self, entry: &RawEntry<'_>) -> Result<Option<String>, ScraperError> {
        let formula = self.formula_in(entry, &self.status_block, "status block")?;
        Ok(formula
            .select(&self.span)
            .find(|span| span.id() != formula.id())
            .map(text_of))
    }

    fn formula_in<'a>(
        &self,
        entry: &RawEntry<'a>,
        block: &Selector,
        what: &'static str,
    ) -> Result<ElementRef<'a>, ScraperError> {
        let block = entry
            .element
            .select(block)
            .next()
            .ok_or(ScraperError::MissingEntryElement {
                entry: entry.number,
                what,
            })?;

        block
            .select(&self.formula)
            .next()
            .ok_or(ScraperError::MissingEntryElement {
                entry: entry.number,
                what: "formula span",
            })
    }
}

fn parse_selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(format!("{css}: {e}")))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
