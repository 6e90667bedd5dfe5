//! Table extraction
//!
//! Flattens each matched table into a list of header-cell texts plus a
//! grid of row texts. Every `tr` is a row and both `td` and `th` count as
//! cells, so a dedicated header row appears in the grid as well. Rows
//! without cells are excluded; tables without qualifying rows are dropped.

use crate::error::ExtractionError;
use crate::extraction::{parse_selector, ElementMeta};
use scraper::Html;
use serde::{Deserialize, Serialize};

/// A table record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTable {
    /// Source node identity
    #[serde(flatten)]
    pub element: ElementMeta,
    /// Header-cell texts in document order, possibly empty strings
    pub headers: Vec<String>,
    /// Cell-text grid; every row holds at least one cell
    pub rows: Vec<Vec<String>>,
    /// Position among the selector's table matches, counting dropped tables
    pub table_index: usize,
}

/// Table extraction strategy
pub struct TableExtractor;

impl TableExtractor {
    /// Extract table records for every node matched by `selector`.
    pub fn extract(selector: &str, doc: &Html) -> Result<Vec<ExtractedTable>, ExtractionError> {
        let parsed = parse_selector(selector)?;
        let header_cells = parse_selector("th")?;
        let row_nodes = parse_selector("tr")?;
        let cell_nodes = parse_selector("td, th")?;

        let mut records = Vec::new();
        for (table_index, table) in doc.select(&parsed).enumerate() {
            let headers: Vec<String> = table
                .select(&header_cells)
                .map(|th| th.text().collect::<String>().trim().to_string())
                .collect();

            let mut rows = Vec::new();
            for tr in table.select(&row_nodes) {
                let row: Vec<String> = tr
                    .select(&cell_nodes)
                    .map(|cell| cell.text().collect::<String>().trim().to_string())
                    .collect();
                if !row.is_empty() {
                    rows.push(row);
                }
            }
            if rows.is_empty() {
                continue;
            }

            records.push(ExtractedTable {
                element: ElementMeta::from_element(selector, table_index, &table),
                headers,
                rows,
                table_index,
            });
        }
        Ok(records)
    }
}
