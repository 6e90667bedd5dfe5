//! Custom extraction
//!
//! Escape hatch for node types the fixed categories do not cover: any
//! matched node with non-empty trimmed text is kept, along with its
//! serialized outer markup and the complete attribute map. No other
//! category captures markup.

use crate::error::ExtractionError;
use crate::extraction::{parse_selector, ElementMeta};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A custom record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedCustom {
    /// Source node identity
    #[serde(flatten)]
    pub element: ElementMeta,
    /// Trimmed text content, non-empty
    pub text: String,
    /// Serialized outer markup of the node
    pub html: String,
    /// Every attribute of the node, name to value
    pub attributes: BTreeMap<String, String>,
}

/// Custom extraction strategy
pub struct CustomExtractor;

impl CustomExtractor {
    /// Extract custom records for every node matched by `selector`.
    pub fn extract(selector: &str, doc: &Html) -> Result<Vec<ExtractedCustom>, ExtractionError> {
        let parsed = parse_selector(selector)?;
        let mut records = Vec::new();
        for (index, element) in doc.select(&parsed).enumerate() {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let attributes = element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();

            records.push(ExtractedCustom {
                element: ElementMeta::from_element(selector, index, &element),
                text: text.to_string(),
                html: element.html(),
                attributes,
            });
        }
        Ok(records)
    }
}
