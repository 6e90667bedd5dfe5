//! Property-based testing for the extraction pipeline.
//!
//! Uses proptest to generate arbitrary page content and configurations and
//! verify the record invariants: text length bounds, link exclusions, image
//! source fallback, table shape, and configuration merge behavior.

use pagesift::config::{ConfigPatch, ExtractOptions, OptionsPatch, ScrapeConfig, SelectorSet};
use pagesift::extraction::{ExtractionEngine, ExtractionResult, MAX_TEXT_LEN};
use pagesift::source::PageSnapshot;
use proptest::prelude::*;

const PAGE_URL: &str = "https://prop.example.com/page";

fn extract(config: &ScrapeConfig, body: &str) -> ExtractionResult {
    let html = format!("<html><head><title>Prop</title></head><body>{body}</body></html>");
    ExtractionEngine::new()
        .run(config, &PageSnapshot::new(PAGE_URL, html))
        .unwrap()
}

fn config_with(selectors: SelectorSet, options: ExtractOptions) -> ScrapeConfig {
    ScrapeConfig { selectors, options }
}

fn single_category(category: &str, selector: &str) -> ScrapeConfig {
    let mut selectors = SelectorSet {
        text: Vec::new(),
        images: Vec::new(),
        links: Vec::new(),
        tables: Vec::new(),
        custom: Vec::new(),
    };
    match category {
        "text" => selectors.text = vec![selector.to_string()],
        "images" => selectors.images = vec![selector.to_string()],
        "links" => selectors.links = vec![selector.to_string()],
        "tables" => selectors.tables = vec![selector.to_string()],
        _ => selectors.custom = vec![selector.to_string()],
    }
    config_with(selectors, ExtractOptions::default())
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Strategy for paragraph content without markup characters
pub fn arb_paragraph() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[ a-zA-Z0-9.,!?-]{1,80}",
        // Straddles the record length bound
        "[a-z]{995,1005}",
    ]
}

/// Strategy for anchor href values, including every excluded form
pub fn arb_href() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("#".to_string())),
        Just(Some("#section".to_string())),
        "javascript:[a-z]{1,12}".prop_map(Some),
        "JAVASCRIPT:[a-z]{1,12}".prop_map(Some),
        "/[a-z]{1,12}".prop_map(Some),
        "https://ext\\.example\\.net/[a-z]{0,10}".prop_map(Some),
        "mailto:[a-z]{2,8}@example\\.com".prop_map(Some),
    ]
}

/// Strategy for img attribute combinations: (src, data-src, alt)
pub fn arb_image_attrs(
) -> impl Strategy<Value = (Option<String>, Option<String>, Option<String>)> {
    (
        prop::option::of("/img/[a-z]{1,10}\\.png"),
        prop::option::of("/cdn/[a-z]{1,10}\\.png"),
        prop::option::of("[ a-zA-Z]{0,20}"),
    )
}

/// Strategy for category toggle combinations
pub fn arb_options() -> impl Strategy<Value = ExtractOptions> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(text, images, links, tables, custom)| ExtractOptions {
            extract_text: text,
            extract_images: images,
            extract_links: links,
            extract_tables: tables,
            extract_custom: custom,
        })
}

/// Strategy for selector lists drawn from a small valid pool
pub fn arb_selector_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just("p".to_string()),
            Just("div".to_string()),
            Just(".card".to_string()),
            Just("a".to_string()),
            Just("span".to_string()),
        ],
        0..4,
    )
}

/// Strategy for a full selector set
pub fn arb_selector_set() -> impl Strategy<Value = SelectorSet> {
    (
        arb_selector_list(),
        arb_selector_list(),
        arb_selector_list(),
        arb_selector_list(),
        arb_selector_list(),
    )
        .prop_map(|(text, images, links, tables, custom)| SelectorSet {
            text,
            images,
            links,
            tables,
            custom,
        })
}

// ============================================================================
// CONFIGURATION MERGE PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_merge_with_empty_patch_is_identity(
        selectors in arb_selector_set(),
        options in arb_options()
    ) {
        let config = config_with(selectors, options);
        let merged = config.merge(ConfigPatch::default());

        prop_assert_eq!(merged, config, "an empty patch must change nothing");
    }

    #[test]
    fn prop_merge_full_options_patch_wins(
        selectors in arb_selector_set(),
        original in arb_options(),
        replacement in arb_options()
    ) {
        let config = config_with(selectors, original);
        let patch = ConfigPatch {
            selectors: None,
            options: Some(OptionsPatch {
                extract_text: Some(replacement.extract_text),
                extract_images: Some(replacement.extract_images),
                extract_links: Some(replacement.extract_links),
                extract_tables: Some(replacement.extract_tables),
                extract_custom: Some(replacement.extract_custom),
            }),
        };
        let merged = config.merge(patch);

        prop_assert_eq!(merged.options, replacement);
        prop_assert_eq!(merged.selectors, config.selectors,
            "an options patch must not touch selectors");
    }

    #[test]
    fn prop_merge_single_flag_preserves_the_rest(
        original in arb_options(),
        flag in any::<bool>()
    ) {
        let config = config_with(SelectorSet::default(), original);
        let patch = ConfigPatch {
            selectors: None,
            options: Some(OptionsPatch {
                extract_text: Some(flag),
                ..OptionsPatch::default()
            }),
        };
        let merged = config.merge(patch);

        prop_assert_eq!(merged.options.extract_text, flag);
        prop_assert_eq!(merged.options.extract_images, original.extract_images);
        prop_assert_eq!(merged.options.extract_links, original.extract_links);
        prop_assert_eq!(merged.options.extract_tables, original.extract_tables);
        prop_assert_eq!(merged.options.extract_custom, original.extract_custom);
    }
}

// ============================================================================
// EXTRACTION INVARIANTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_text_records_respect_bounds(paragraphs in prop::collection::vec(arb_paragraph(), 0..8)) {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<p>{p}</p>"))
            .collect();
        let result = extract(&single_category("text", "p"), &body);

        prop_assert!(result.texts.len() <= paragraphs.len());
        for record in &result.texts {
            prop_assert!(!record.text.is_empty(), "blank text must be dropped");
            prop_assert!(record.text.chars().count() < MAX_TEXT_LEN,
                "oversized text must be dropped, not truncated");
            prop_assert_eq!(record.text.as_str(), record.text.trim(),
                "text must be trimmed");
            prop_assert!(record.element.element_index < paragraphs.len());
        }
        for pair in result.texts.windows(2) {
            prop_assert!(pair[0].element.element_index < pair[1].element.element_index,
                "indices must follow document order");
        }
    }

    #[test]
    fn prop_links_never_emit_placeholders(
        anchors in prop::collection::vec((arb_href(), "[ a-zA-Z]{0,12}"), 0..8)
    ) {
        let body: String = anchors
            .iter()
            .map(|(href, text)| match href {
                Some(href) => format!("<a href=\"{href}\">{text}</a>"),
                None => format!("<a>{text}</a>"),
            })
            .collect();
        let result = extract(&single_category("links", "a"), &body);

        prop_assert!(result.links.len() <= anchors.len());
        for record in &result.links {
            prop_assert!(!record.href.is_empty());
            prop_assert_ne!(record.href.as_str(), "#");
            prop_assert!(!record.href.to_ascii_lowercase().starts_with("javascript:"),
                "script links must be dropped");
            prop_assert!(!record.text.is_empty(), "text must fall back to the href");
        }
    }

    #[test]
    fn prop_images_always_carry_src_and_alt(
        images in prop::collection::vec(arb_image_attrs(), 0..8)
    ) {
        let body: String = images
            .iter()
            .map(|(src, data_src, alt)| {
                let mut tag = String::from("<img");
                if let Some(src) = src {
                    tag.push_str(&format!(" src=\"{src}\""));
                }
                if let Some(data_src) = data_src {
                    tag.push_str(&format!(" data-src=\"{data_src}\""));
                }
                if let Some(alt) = alt {
                    tag.push_str(&format!(" alt=\"{alt}\""));
                }
                tag.push('>');
                tag
            })
            .collect();
        let result = extract(&single_category("images", "img"), &body);

        let with_source = images
            .iter()
            .filter(|(src, data_src, _)| src.is_some() || data_src.is_some())
            .count();
        prop_assert_eq!(result.images.len(), with_source,
            "exactly the images with a source are reported");
        for record in &result.images {
            prop_assert!(!record.src.is_empty());
            prop_assert!(!record.alt.is_empty(), "missing alt must become the placeholder");
        }
    }

    #[test]
    fn prop_tables_never_contain_empty_rows(
        tables in prop::collection::vec(
            prop::collection::vec(
                prop::collection::vec("[ a-zA-Z0-9]{0,10}", 0..4),
                0..4
            ),
            0..3
        )
    ) {
        let body: String = tables
            .iter()
            .map(|rows| {
                let inner: String = rows
                    .iter()
                    .map(|cells| {
                        let tds: String =
                            cells.iter().map(|c| format!("<td>{c}</td>")).collect();
                        format!("<tr>{tds}</tr>")
                    })
                    .collect();
                format!("<table>{inner}</table>")
            })
            .collect();
        let result = extract(&single_category("tables", "table"), &body);

        prop_assert!(result.tables.len() <= tables.len());
        for record in &result.tables {
            prop_assert!(!record.rows.is_empty(), "tables without rows must be dropped");
            prop_assert!(record.table_index < tables.len());
            for row in &record.rows {
                prop_assert!(!row.is_empty(), "rows without cells must be dropped");
            }
        }
    }

    #[test]
    fn prop_disabled_categories_yield_nothing(options in arb_options()) {
        let body = concat!(
            "<p>alpha</p>",
            "<img src=\"/i.png\" alt=\"x\">",
            "<a href=\"/l\">link</a>",
            "<table><tr><td>c</td></tr></table>",
            "<div class=\"card\">beta</div>",
        );
        let selectors = SelectorSet {
            custom: vec![".card".to_string()],
            ..SelectorSet::default()
        };
        let result = extract(&config_with(selectors, options), body);

        prop_assert_eq!(result.texts.is_empty(), !options.extract_text);
        prop_assert_eq!(result.images.is_empty(), !options.extract_images);
        prop_assert_eq!(result.links.is_empty(), !options.extract_links);
        prop_assert_eq!(result.tables.is_empty(), !options.extract_tables);
        prop_assert_eq!(result.custom.is_empty(), !options.extract_custom);
    }

    #[test]
    fn prop_result_round_trips_through_json(
        paragraphs in prop::collection::vec(arb_paragraph(), 0..6)
    ) {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<p>{p}</p>"))
            .collect();
        let result = extract(&ScrapeConfig::default(), &body);

        let json = serde_json::to_string(&result).expect("serialize");
        let parsed: ExtractionResult = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(parsed, result);
    }
}
