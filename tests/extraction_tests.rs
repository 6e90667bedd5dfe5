//! Extraction engine integration tests
//!
//! These tests drive the engine through the public API over a realistic
//! page and verify record contents, ordering, selector failure isolation
//! and the wire format.

use pagesift::config::{ConfigPatch, ScrapeConfig};
use pagesift::extraction::{ExtractionEngine, ExtractionResult, DEFAULT_ALT};
use pagesift::source::PageSnapshot;
use serde_json::json;

const PAGE_URL: &str = "https://shop.example.com/catalog/index.html";

const PAGE: &str = r##"<html>
<head><title>Gadget Store - Catalog</title></head>
<body>
  <h1>Featured Gadgets</h1>
  <p>Hand-picked hardware, updated daily.</p>
  <p>   </p>
  <p>Free shipping on orders over $50.</p>
  <div class="product-card" id="gadget-1" data-sku="G-100">
    <h2>Widget Pro</h2>
    <img src="/img/widget.png" alt="Widget Pro photo">
    <a href="/products/widget">Details</a>
  </div>
  <div class="product-card" id="gadget-2" data-sku="G-200">
    <h2>Sensor Mini</h2>
    <img data-src="/img/sensor.png">
    <a href="#">Buy</a>
    <a href="javascript:void(0)">Preview</a>
    <a href="https://partner.example.net/sensor">Partner page</a>
  </div>
  <table id="details-table">
    <tr><th>Metric</th><th>Value</th></tr>
    <tr><td>Weight</td><td>120g</td></tr>
    <tr><td>Battery</td><td>48h</td></tr>
  </table>
  <span>In stock</span>
</body>
</html>"##;

fn run(config: &ScrapeConfig) -> ExtractionResult {
    let engine = ExtractionEngine::new();
    engine
        .run(config, &PageSnapshot::new(PAGE_URL, PAGE))
        .unwrap()
}

fn patched(patch: serde_json::Value) -> ScrapeConfig {
    let patch: ConfigPatch = serde_json::from_value(patch).unwrap();
    ScrapeConfig::default().merge(patch)
}

#[test]
fn test_full_page_extraction_with_defaults() {
    let result = run(&ScrapeConfig::default());

    assert_eq!(result.texts.len(), 8);
    assert_eq!(result.images.len(), 2);
    assert_eq!(result.links.len(), 2);
    assert_eq!(result.tables.len(), 1);
    assert_eq!(result.custom.len(), 0);
    assert_eq!(result.total_records(), 13);
    assert!(result.error.is_none());
}

#[test]
fn test_metadata_describes_the_page() {
    let result = run(&ScrapeConfig::default());

    assert_eq!(result.metadata.url, PAGE_URL);
    assert_eq!(result.metadata.title, "Gadget Store - Catalog");
    assert_eq!(result.metadata.source, "pagesift");
    assert!(result.metadata.timestamp.ends_with('Z'));
    assert_eq!(result.metadata.config, ScrapeConfig::default());
}

#[test]
fn test_text_records_follow_selector_then_document_order() {
    let result = run(&ScrapeConfig::default());
    let texts = &result.texts;

    // The p selectors come first, in document order, skipping the blank one.
    assert_eq!(texts[0].text, "Hand-picked hardware, updated daily.");
    assert_eq!(texts[0].element.element_index, 0);
    assert_eq!(texts[1].text, "Free shipping on orders over $50.");
    assert_eq!(texts[1].element.element_index, 2);

    assert_eq!(texts[2].text, "Featured Gadgets");
    assert_eq!(texts[2].element.selector, "h1");
    assert_eq!(texts[3].text, "Widget Pro");
    assert_eq!(texts[3].element.selector, "h2");
    assert_eq!(texts[4].text, "Sensor Mini");

    // The div selector re-reports nested content; duplicates are kept.
    assert!(texts[5].text.starts_with("Widget Pro"));
    assert!(texts[5].text.contains("Details"));
    assert_eq!(texts[5].element.class_name.as_deref(), Some("product-card"));
    assert_eq!(texts[5].element.id.as_deref(), Some("gadget-1"));
    assert!(texts[6].text.contains("Sensor Mini"));

    assert_eq!(texts[7].text, "In stock");
    assert_eq!(texts[7].element.tag_name, "span");
}

#[test]
fn test_images_resolve_src_and_fall_back() {
    let result = run(&ScrapeConfig::default());
    let images = &result.images;

    assert_eq!(images[0].src, "https://shop.example.com/img/widget.png");
    assert_eq!(images[0].alt, "Widget Pro photo");
    assert_eq!(images[0].element.element_index, 0);

    // Second image only carries data-src and no alt.
    assert_eq!(images[1].src, "https://shop.example.com/img/sensor.png");
    assert_eq!(images[1].alt, DEFAULT_ALT);
    assert_eq!(images[1].element.element_index, 1);
}

#[test]
fn test_links_drop_placeholders_and_resolve() {
    let result = run(&ScrapeConfig::default());
    let links = &result.links;

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].href, "https://shop.example.com/products/widget");
    assert_eq!(links[0].text, "Details");
    assert_eq!(links[0].element.element_index, 0);

    // The "#" and javascript: anchors occupied indices 1 and 2.
    assert_eq!(links[1].href, "https://partner.example.net/sensor");
    assert_eq!(links[1].element.element_index, 3);
}

#[test]
fn test_table_headers_and_rows() {
    let result = run(&ScrapeConfig::default());
    let table = &result.tables[0];

    assert_eq!(table.headers, vec!["Metric", "Value"]);
    // Every tr is a row, the header row included.
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0], vec!["Metric", "Value"]);
    assert_eq!(table.rows[1], vec!["Weight", "120g"]);
    assert_eq!(table.rows[2], vec!["Battery", "48h"]);
    assert_eq!(table.table_index, 0);
    assert_eq!(table.element.id.as_deref(), Some("details-table"));
}

#[test]
fn test_custom_selectors_capture_markup_and_attributes() {
    let config = patched(json!({
        "selectors": {"custom": [".product-card"]}
    }));
    let result = run(&config);

    assert_eq!(result.custom.len(), 2);
    let card = &result.custom[0];
    assert!(card.text.contains("Widget Pro"));
    assert!(card.html.contains("<img"));
    assert_eq!(card.attributes.get("id").map(String::as_str), Some("gadget-1"));
    assert_eq!(
        card.attributes.get("data-sku").map(String::as_str),
        Some("G-100")
    );
}

#[test]
fn test_config_merge_flows_through_extraction() {
    let config = patched(json!({
        "options": {"extractImages": false, "extractTables": false}
    }));
    let result = run(&config);

    assert!(result.images.is_empty());
    assert!(result.tables.is_empty());
    // Untouched categories still extract.
    assert_eq!(result.texts.len(), 8);
    assert_eq!(result.links.len(), 2);
}

#[test]
fn test_invalid_selector_only_silences_its_own_records() {
    let config = patched(json!({
        "selectors": {"text": ["p[", "h1"]}
    }));
    let result = run(&config);

    // The malformed selector contributes nothing; the valid one still runs.
    assert_eq!(result.texts.len(), 1);
    assert_eq!(result.texts[0].text, "Featured Gadgets");
    // Other categories are untouched by the text-selector failure.
    assert_eq!(result.images.len(), 2);
    assert!(result.error.is_none());
}

#[test]
fn test_selector_list_replacement_is_wholesale() {
    let config = patched(json!({
        "selectors": {"text": ["h2"]}
    }));
    let result = run(&config);

    assert_eq!(result.texts.len(), 2);
    assert_eq!(result.texts[0].text, "Widget Pro");
    assert_eq!(result.texts[1].text, "Sensor Mini");
}

#[test]
fn test_result_uses_wire_field_names() {
    let result = run(&ScrapeConfig::default());
    let json = serde_json::to_value(&result).unwrap();

    let first_text = &json["texts"][0];
    assert!(first_text.get("selector").is_some());
    assert!(first_text.get("elementIndex").is_some());
    assert!(first_text.get("tagName").is_some());

    assert!(json["tables"][0].get("tableIndex").is_some());
    assert_eq!(json["metadata"]["url"], PAGE_URL);
    assert!(json.get("error").is_none());
}

#[test]
fn test_repeat_runs_are_deterministic() {
    let first = run(&ScrapeConfig::default());
    let second = run(&ScrapeConfig::default());

    assert_eq!(first.texts, second.texts);
    assert_eq!(first.images, second.images);
    assert_eq!(first.links, second.links);
    assert_eq!(first.tables, second.tables);
}
