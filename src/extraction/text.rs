//! Text extraction
//!
//! Takes the trimmed text content of every node a selector matches and
//! keeps it when it is non-empty and under the length ceiling. Oversized
//! text is dropped whole, never truncated.

use crate::error::ExtractionError;
use crate::extraction::{parse_selector, ElementMeta};
use scraper::Html;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) on kept text length, in characters.
pub const MAX_TEXT_LEN: usize = 1000;

/// A text record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Source node identity
    #[serde(flatten)]
    pub element: ElementMeta,
    /// Trimmed text content, `0 < chars < MAX_TEXT_LEN`
    pub text: String,
}

/// Text extraction strategy
pub struct TextExtractor;

impl TextExtractor {
    /// Extract text records for every node matched by `selector`.
    pub fn extract(selector: &str, doc: &Html) -> Result<Vec<ExtractedText>, ExtractionError> {
        let parsed = parse_selector(selector)?;
        let mut records = Vec::new();
        for (index, element) in doc.select(&parsed).enumerate() {
            let text = element.text().collect::<String>();
            let text = text.trim();
            let chars = text.chars().count();
            if chars == 0 || chars >= MAX_TEXT_LEN {
                continue;
            }
            records.push(ExtractedText {
                element: ElementMeta::from_element(selector, index, &element),
                text: text.to_string(),
            });
        }
        Ok(records)
    }
}
