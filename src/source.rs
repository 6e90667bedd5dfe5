//! Page snapshot sources
//!
//! The engine never fetches or renders pages itself: the host environment
//! hands it an already-rendered document. `DocumentSource` is that seam.
//! A source is consulted once per scrape, so implementations backed by
//! mutable storage let recurring runs observe page changes.

use crate::error::Result;
use std::path::PathBuf;

/// One rendered page as handed over by the host environment.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// Address the document was rendered from
    pub url: String,
    /// Serialized HTML of the rendered document
    pub html: String,
}

impl PageSnapshot {
    /// Build a snapshot from parts.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Supplies the current page snapshot on demand.
pub trait DocumentSource: Send + Sync {
    /// Produce the snapshot to extract from.
    fn snapshot(&self) -> Result<PageSnapshot>;
}

/// Fixed in-memory snapshot, for embedders and tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    page: PageSnapshot,
}

impl StaticSource {
    /// Wrap a URL and HTML string as a constant source.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            page: PageSnapshot::new(url, html),
        }
    }
}

impl DocumentSource for StaticSource {
    fn snapshot(&self) -> Result<PageSnapshot> {
        Ok(self.page.clone())
    }
}

/// Re-reads an HTML file on every call, so writes between ticks show up in
/// the next run.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    url: String,
}

impl FileSource {
    /// Source backed by `path`, reporting `url` as the page address.
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

impl DocumentSource for FileSource {
    fn snapshot(&self) -> Result<PageSnapshot> {
        let html = std::fs::read_to_string(&self.path)?;
        Ok(PageSnapshot::new(self.url.clone(), html))
    }
}
