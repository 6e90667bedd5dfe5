//! Content extraction module
//!
//! The extraction core: five category extractors (text, images, links,
//! tables, custom), the record and envelope types they produce, and the
//! orchestrating engine with its single-flight guard.

pub mod custom;
pub mod engine;
pub mod image;
pub mod link;
pub mod record;
pub mod table;
pub mod text;

pub use custom::{CustomExtractor, ExtractedCustom};
pub use engine::ExtractionEngine;
pub use image::{ExtractedImage, ImageExtractor, DEFAULT_ALT};
pub use link::{ExtractedLink, LinkExtractor};
pub use record::{ElementMeta, ExtractionResult, ResultMetadata};
pub use table::{ExtractedTable, TableExtractor};
pub use text::{ExtractedText, TextExtractor, MAX_TEXT_LEN};

use crate::error::ExtractionError;
use scraper::Selector;
use url::Url;

/// Parse a selector string, mapping the failure into the contained
/// [`ExtractionError::InvalidSelector`] variant.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector)
        .map_err(|e| ExtractionError::InvalidSelector(format!("{selector}: {e}")))
}

/// Resolve a possibly-relative address against the page URL. Absolute
/// values pass through; values that resolve nowhere are kept raw.
pub(crate) fn resolve_url(base: Option<&Url>, raw: &str) -> String {
    if Url::parse(raw).is_ok() {
        return raw.to_string();
    }
    if let Some(base) = base {
        if let Ok(joined) = base.join(raw) {
            return joined.to_string();
        }
    }
    raw.to_string()
}
