use crate::scraper::ScraperError;
use scraper::{ElementRef, Html};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Writes the markup seen at each extraction step, for debugging a changed page layout.
#[derive(Debug, Clone)]
pub struct DebugDump {
    dir: PathBuf,
}

impl DebugDump {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn page(&self, doc: &Html) -> Result<(), ScraperError> {
        self.write("webpage.html", &doc.html())
    }

    pub fn container(&self, container: ElementRef<'_>) -> Result<(), ScraperError> {
        self.write("fave_div.html", &container.html())
    }

    pub fn entry(&self, number: usize, entry: ElementRef<'_>) -> Result<(), ScraperError> {
        self.write(&format!("entry{number}.html"), &entry.html())
    }

    fn write(&self, name: &str, html: &str) -> Result<(), ScraperError> {
        fs::create_dir_all(&self.dir).map_err(|source| ScraperError::IoError {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(name);
        fs::write(&path, html).map_err(|source| ScraperError::IoError {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = html.len(), "wrote debug dump");
        Ok(())
    }
}
