// pipeline.rs
use crate::config::Config;
use crate::domain::{map_listings, ListingRecord};
use crate::errors::AppResult;
use crate::scraper::{DebugDump, ListingExtractor, PageSource};
use crate::sinks::ExportSink;
use tracing::info;
use url::Url;

/// Fetch -> extract -> map -> export, once.
pub struct Pipeline {
    source: Box<dyn PageSource>,
    extractor: ListingExtractor,
    sinks: Vec<Box<dyn ExportSink>>,
    url: Url,
    listing_url: Option<String>,
    dump: Option<DebugDump>,
}

impl Pipeline {
    pub fn new(
        config: &Config,
        source: Box<dyn PageSource>,
        sinks: Vec<Box<dyn ExportSink>>,
    ) -> AppResult<Self> {
        Ok(Self {
            source,
            extractor: ListingExtractor::new()?,
            sinks,
            url: config.url.clone(),
            listing_url: config.listing_url.clone(),
            dump: config
                .debug_dumps()
                .then(|| DebugDump::new(config.debug_dir.clone())),
        })
    }

    /// Every record is mapped before the first sink runs, so a bad entry
    /// leaves all outputs untouched.
    pub fn run(&self) -> AppResult<Vec<ListingRecord>> {
        let doc = self.source.fetch(&self.url)?;
        if let Some(dump) = &self.dump {
            dump.page(&doc)?;
        }

        info!("Extracting results...");
        let raw = self.extractor.extract(&doc, self.dump.as_ref())?;
        let records = map_listings(&raw, self.listing_url.as_deref())?;

        for sink in &self.sinks {
            info!(sink = sink.name(), records = records.len(), "exporting");
            sink.export(&records)?;
        }

        info!("Done");
        Ok(records)
    }
}
