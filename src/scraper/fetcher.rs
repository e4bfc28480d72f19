// fetcher.rs
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use scraper::Html;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Where the favourites page comes from.
pub trait PageSource {
    fn fetch(&self, url: &Url) -> Result<Html, ScraperError>;
}

/// One blocking GET per run. No retry and no timeout.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self { client })
    }
}

impl PageSource for PageFetcher {
    fn fetch(&self, url: &Url) -> Result<Html, ScraperError> {
        info!(%url, "Getting raw page content...");
        let start = std::time::Instant::now();

        let resp = self.client.get(url.clone()).send()?;

        // The body is parsed whatever the status; a login or error page
        // shows up later as a missing container.
        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "page request returned a non-success status");
        }

        let body = resp.text()?;
        info!(%status, bytes = body.len(), elapsed = ?start.elapsed(), "page fetched");

        Ok(Html::parse_document(&body))
    }
}

/// A page saved earlier, used instead of the network.
pub struct HtmlFile {
    path: PathBuf,
}

impl HtmlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for HtmlFile {
    fn fetch(&self, url: &Url) -> Result<Html, ScraperError> {
        info!(path = %self.path.display(), %url, "Reading saved page instead of fetching");
        let body = fs::read_to_string(&self.path).map_err(|source| ScraperError::IoError {
            path: self.path.clone(),
            source,
        })?;
        Ok(Html::parse_document(&body))
    }
}
