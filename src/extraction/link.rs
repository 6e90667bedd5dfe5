//! Link extraction
//!
//! Keeps anchors with a usable target: records are dropped when the href
//! is missing, a bare `#` fragment, or a `javascript:` pseudo-URL. The
//! display text falls back to the href itself for image-only anchors.

use crate::error::ExtractionError;
use crate::extraction::{parse_selector, resolve_url, ElementMeta};
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

/// A link record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLink {
    /// Source node identity
    #[serde(flatten)]
    pub element: ElementMeta,
    /// Link target, resolved against the page URL when relative
    pub href: String,
    /// Display text, the href itself when the node has no text
    pub text: String,
}

/// Link extraction strategy
pub struct LinkExtractor;

impl LinkExtractor {
    /// Extract link records for every node matched by `selector`.
    pub fn extract(
        selector: &str,
        doc: &Html,
        base: Option<&Url>,
    ) -> Result<Vec<ExtractedLink>, ExtractionError> {
        let parsed = parse_selector(selector)?;
        let mut records = Vec::new();
        for (index, element) in doc.select(&parsed).enumerate() {
            let raw = element.value().attr("href").map(str::trim).unwrap_or("");
            if raw.is_empty() || raw == "#" || is_script_scheme(raw) {
                continue;
            }

            let href = resolve_url(base, raw);
            let text = element.text().collect::<String>();
            let text = text.trim();
            let text = if text.is_empty() {
                href.clone()
            } else {
                text.to_string()
            };

            records.push(ExtractedLink {
                element: ElementMeta::from_element(selector, index, &element),
                href,
                text,
            });
        }
        Ok(records)
    }
}

/// `javascript:` targets execute script instead of navigating; schemes
/// compare case-insensitively.
fn is_script_scheme(href: &str) -> bool {
    href.as_bytes()
        .get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"javascript:"))
}
