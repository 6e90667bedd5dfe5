//! Result storage for the collector
//!
//! Results live in memory for the lifetime of the process. When an archive
//! path is configured, the full result list is rewritten to it as pretty
//! JSON after every store, so the file on disk always mirrors memory.

use crate::error::Result;
use crate::extraction::ExtractionResult;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-category totals over everything stored so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    /// Number of extraction results received
    pub total_results: usize,
    /// Text records across all results
    pub total_texts: usize,
    /// Image records across all results
    pub total_images: usize,
    /// Link records across all results
    pub total_links: usize,
    /// Table records across all results
    pub total_tables: usize,
    /// Custom records across all results
    pub total_custom: usize,
    /// Timestamp of the most recently stored result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Append-only store of extraction results with an optional JSON archive.
#[derive(Debug)]
pub struct DataStore {
    results: RwLock<Vec<ExtractionResult>>,
    archive: Option<PathBuf>,
}

impl DataStore {
    /// A store that keeps results in memory only.
    pub fn in_memory() -> Self {
        Self {
            results: RwLock::new(Vec::new()),
            archive: None,
        }
    }

    /// A store that mirrors every state change to `path`.
    pub fn with_archive(path: impl Into<PathBuf>) -> Self {
        Self {
            results: RwLock::new(Vec::new()),
            archive: Some(path.into()),
        }
    }

    /// The archive path, when one is configured.
    pub fn archive_path(&self) -> Option<&Path> {
        self.archive.as_deref()
    }

    /// Append one result and rewrite the archive. Returns the new count.
    pub fn store(&self, result: ExtractionResult) -> Result<usize> {
        let mut results = self.results.write();
        results.push(result);
        let count = results.len();
        let pending = match &self.archive {
            Some(path) => Some((path.clone(), serde_json::to_string_pretty(&*results)?)),
            None => None,
        };
        drop(results);

        if let Some((path, json)) = pending {
            std::fs::write(&path, json)?;
        }
        Ok(count)
    }

    /// Number of results stored.
    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }

    /// Snapshot of everything stored so far.
    pub fn results(&self) -> Vec<ExtractionResult> {
        self.results.read().clone()
    }

    /// Totals per record category plus the last-seen timestamp.
    pub fn summary(&self) -> StoreSummary {
        let results = self.results.read();
        let mut summary = StoreSummary {
            total_results: results.len(),
            ..StoreSummary::default()
        };
        for result in results.iter() {
            summary.total_texts += result.texts.len();
            summary.total_images += result.images.len();
            summary.total_links += result.links.len();
            summary.total_tables += result.tables.len();
            summary.total_custom += result.custom.len();
        }
        summary.last_updated = results.last().map(|r| r.metadata.timestamp.clone());
        summary
    }
}
