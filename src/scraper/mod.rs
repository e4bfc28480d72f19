mod dump;
mod extract;
mod fetcher;
mod models;
mod scraper_error;

pub use dump::DebugDump;
pub use extract::ListingExtractor;
pub use fetcher::{HtmlFile, PageFetcher, PageSource};
pub use models::RawListing;
pub use scraper_error::ScraperError;
