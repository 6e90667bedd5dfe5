//! Result envelope and shared record metadata
//!
//! Every category produces records that carry the same identity block:
//! which selector matched, where in the match list the node sat, and the
//! node's tag/class/id. The envelope owns one ordered list per category
//! plus run metadata, and is serialized as-is for delivery.

use crate::config::ScrapeConfig;
use crate::extraction::custom::ExtractedCustom;
use crate::extraction::image::ExtractedImage;
use crate::extraction::link::ExtractedLink;
use crate::extraction::table::ExtractedTable;
use crate::extraction::text::ExtractedText;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// Identity of the DOM node a record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeta {
    /// Selector that produced the record
    pub selector: String,
    /// Zero-based position among this selector's matches. Counts matches
    /// that category rules later dropped, so indices can have gaps.
    pub element_index: usize,
    /// Tag name of the source node
    pub tag_name: String,
    /// `class` attribute, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// `id` attribute, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ElementMeta {
    /// Capture the identity block for one matched element.
    pub(crate) fn from_element(selector: &str, index: usize, element: &ElementRef<'_>) -> Self {
        Self {
            selector: selector.to_string(),
            element_index: index,
            tag_name: element.value().name().to_string(),
            class_name: element.value().attr("class").map(str::to_string),
            id: element.value().id().map(str::to_string),
        }
    }
}

/// Run metadata attached to every result, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Address of the page the snapshot came from
    pub url: String,
    /// Document title, empty when the page has none
    pub title: String,
    /// RFC 3339 timestamp of the run
    pub timestamp: String,
    /// Producer tag identifying this engine
    pub source: String,
    /// Snapshot of the configuration the run used
    pub config: ScrapeConfig,
}

/// The uniform output envelope of one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Text records, in selector order then match order
    #[serde(default)]
    pub texts: Vec<ExtractedText>,
    /// Image records
    #[serde(default)]
    pub images: Vec<ExtractedImage>,
    /// Link records
    #[serde(default)]
    pub links: Vec<ExtractedLink>,
    /// Table records
    #[serde(default)]
    pub tables: Vec<ExtractedTable>,
    /// Custom records
    #[serde(default)]
    pub custom: Vec<ExtractedCustom>,
    /// Run metadata, populated unconditionally
    pub metadata: ResultMetadata,
    /// Message of a failure that escaped per-selector isolation. The
    /// records gathered before the failure are still present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Empty envelope around the given metadata.
    pub(crate) fn new(metadata: ResultMetadata) -> Self {
        Self {
            texts: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
            tables: Vec::new(),
            custom: Vec::new(),
            metadata,
            error: None,
        }
    }

    /// Total records across all categories.
    pub fn total_records(&self) -> usize {
        self.texts.len()
            + self.images.len()
            + self.links.len()
            + self.tables.len()
            + self.custom.len()
    }
}
