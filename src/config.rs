//! Extraction configuration model
//!
//! Declarative description of what the engine pulls out of a page: an
//! ordered selector list per category plus a boolean toggle per category.
//! Pure data: selector strings are not validated here; a selector that
//! fails to parse is contained at extraction time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Extraction categories, in the fixed order the engine visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Trimmed text content of matched nodes
    Text,
    /// Image sources and alt text
    Images,
    /// Anchor targets and display text
    Links,
    /// Tabular headers and rows
    Tables,
    /// Escape hatch: text plus raw markup and attributes
    Custom,
}

impl Category {
    /// Every category, in deterministic traversal order.
    pub const ALL: [Category; 5] = [
        Category::Text,
        Category::Images,
        Category::Links,
        Category::Tables,
        Category::Custom,
    ];

    /// Wire name of the category, as used in configuration keys.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::Images => "images",
            Category::Links => "links",
            Category::Tables => "tables",
            Category::Custom => "custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered CSS selector lists, one per category.
///
/// A missing key on the wire deserializes to an empty list: the category
/// yields no records even when its toggle is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Selectors handed to the text extractor
    #[serde(default)]
    pub text: Vec<String>,
    /// Selectors handed to the image extractor
    #[serde(default)]
    pub images: Vec<String>,
    /// Selectors handed to the link extractor
    #[serde(default)]
    pub links: Vec<String>,
    /// Selectors handed to the table extractor
    #[serde(default)]
    pub tables: Vec<String>,
    /// Selectors handed to the custom extractor
    #[serde(default)]
    pub custom: Vec<String>,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            text: ["p", "h1", "h2", "h3", "h4", "h5", "h6", "div", "span"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            images: vec!["img".to_string()],
            links: vec!["a".to_string()],
            tables: vec!["table".to_string()],
            custom: Vec::new(),
        }
    }
}

impl SelectorSet {
    /// Selector list for one category.
    pub fn for_category(&self, category: Category) -> &[String] {
        match category {
            Category::Text => &self.text,
            Category::Images => &self.images,
            Category::Links => &self.links,
            Category::Tables => &self.tables,
            Category::Custom => &self.custom,
        }
    }
}

/// Per-category enable flags.
///
/// A flag missing on the wire deserializes to `false`: categories are
/// extracted only when explicitly enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOptions {
    /// Run the text extractor
    #[serde(default)]
    pub extract_text: bool,
    /// Run the image extractor
    #[serde(default)]
    pub extract_images: bool,
    /// Run the link extractor
    #[serde(default)]
    pub extract_links: bool,
    /// Run the table extractor
    #[serde(default)]
    pub extract_tables: bool,
    /// Run the custom extractor
    #[serde(default)]
    pub extract_custom: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            extract_text: true,
            extract_images: true,
            extract_links: true,
            extract_tables: true,
            extract_custom: true,
        }
    }
}

impl ExtractOptions {
    /// Whether one category's extractor runs.
    pub fn enabled(&self, category: Category) -> bool {
        match category {
            Category::Text => self.extract_text,
            Category::Images => self.extract_images,
            Category::Links => self.extract_links,
            Category::Tables => self.extract_tables,
            Category::Custom => self.extract_custom,
        }
    }
}

/// Root extraction configuration: selector lists plus toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Selector lists per category
    #[serde(default)]
    pub selectors: SelectorSet,
    /// Enable flags per category
    #[serde(default)]
    pub options: ExtractOptions,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorSet::default(),
            options: ExtractOptions::default(),
        }
    }
}

impl ScrapeConfig {
    /// Shallow-merge a partial configuration onto this one.
    ///
    /// Fields present in the patch win; fields absent in the patch keep the
    /// base value. An overriding selector list replaces that category's list
    /// wholesale. The base is untouched; the merged configuration is
    /// returned.
    pub fn merge(&self, patch: ConfigPatch) -> ScrapeConfig {
        let mut merged = self.clone();
        if let Some(selectors) = patch.selectors {
            if let Some(text) = selectors.text {
                merged.selectors.text = text;
            }
            if let Some(images) = selectors.images {
                merged.selectors.images = images;
            }
            if let Some(links) = selectors.links {
                merged.selectors.links = links;
            }
            if let Some(tables) = selectors.tables {
                merged.selectors.tables = tables;
            }
            if let Some(custom) = selectors.custom {
                merged.selectors.custom = custom;
            }
        }
        if let Some(options) = patch.options {
            if let Some(v) = options.extract_text {
                merged.options.extract_text = v;
            }
            if let Some(v) = options.extract_images {
                merged.options.extract_images = v;
            }
            if let Some(v) = options.extract_links {
                merged.options.extract_links = v;
            }
            if let Some(v) = options.extract_tables {
                merged.options.extract_tables = v;
            }
            if let Some(v) = options.extract_custom {
                merged.options.extract_custom = v;
            }
        }
        merged
    }
}

/// Partial configuration override, as carried by `updateConfig` requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatch {
    /// Selector list overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<SelectorPatch>,
    /// Toggle overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsPatch>,
}

/// Per-category selector list overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPatch {
    /// Replacement list for the text category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    /// Replacement list for the images category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Replacement list for the links category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    /// Replacement list for the tables category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,
    /// Replacement list for the custom category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Vec<String>>,
}

/// Per-category toggle overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    /// Override for the text toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_text: Option<bool>,
    /// Override for the images toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_images: Option<bool>,
    /// Override for the links toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_links: Option<bool>,
    /// Override for the tables toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_tables: Option<bool>,
    /// Override for the custom toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_custom: Option<bool>,
}
