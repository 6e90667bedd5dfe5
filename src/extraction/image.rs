//! Image extraction
//!
//! Resolves the image source from the `src` attribute, falling back to the
//! lazy-load `data-src` attribute. Nodes offering neither are dropped.

use crate::error::ExtractionError;
use crate::extraction::{parse_selector, resolve_url, ElementMeta};
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

/// Alt text recorded when an image offers none.
pub const DEFAULT_ALT: &str = "No alt text";

/// An image record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// Source node identity
    #[serde(flatten)]
    pub element: ElementMeta,
    /// Image address, resolved against the page URL when relative
    pub src: String,
    /// Alt text, `DEFAULT_ALT` when the attribute is absent or empty
    pub alt: String,
}

/// Image extraction strategy
pub struct ImageExtractor;

impl ImageExtractor {
    /// Extract image records for every node matched by `selector`.
    pub fn extract(
        selector: &str,
        doc: &Html,
        base: Option<&Url>,
    ) -> Result<Vec<ExtractedImage>, ExtractionError> {
        let parsed = parse_selector(selector)?;
        let mut records = Vec::new();
        for (index, element) in doc.select(&parsed).enumerate() {
            let raw = element
                .value()
                .attr("src")
                .filter(|s| !s.is_empty())
                .or_else(|| element.value().attr("data-src").filter(|s| !s.is_empty()));
            let Some(raw) = raw else {
                continue;
            };

            let alt = element
                .value()
                .attr("alt")
                .filter(|a| !a.is_empty())
                .unwrap_or(DEFAULT_ALT);

            records.push(ExtractedImage {
                element: ElementMeta::from_element(selector, index, &element),
                src: resolve_url(base, raw),
                alt: alt.to_string(),
            });
        }
        Ok(records)
    }
}
