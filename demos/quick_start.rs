//! # PageSift - Quick Start Example
//!
//! This example runs a full extraction pass over an inline product page,
//! then narrows the configuration with a patch and runs again.
//!
//! Run with: `cargo run --example quick_start`

use pagesift::{ConfigPatch, DocumentSource, ExtractionEngine, ScrapeConfig, StaticSource};

const PAGE: &str = r#"<html>
<head><title>Weekend Market</title></head>
<body>
  <h1>Weekend Market</h1>
  <p>Fresh produce and baked goods, every Saturday.</p>
  <div class="stall" id="stall-1">
    <h2>Sourdough Loaves</h2>
    <img src="/img/sourdough.jpg" alt="Sourdough loaf">
    <a href="/stalls/sourdough">Visit stall</a>
  </div>
  <div class="stall" id="stall-2">
    <h2>Orchard Apples</h2>
    <img src="/img/apples.jpg" alt="Crate of apples">
    <a href="/stalls/apples">Visit stall</a>
  </div>
  <table>
    <tr><th>Stall</th><th>Opens</th></tr>
    <tr><td>Sourdough Loaves</td><td>08:00</td></tr>
    <tr><td>Orchard Apples</td><td>09:00</td></tr>
  </table>
</body>
</html>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║  PageSift - Quick Start                                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    // A source hands the engine an already-rendered page.
    let source = StaticSource::new("https://market.example.com/stalls", PAGE);
    let snapshot = source.snapshot()?;
    let engine = ExtractionEngine::new();

    println!("✅ Engine created");
    println!();

    // First pass: the default configuration extracts every built-in category.
    let config = ScrapeConfig::default();
    let result = engine.run(&config, &snapshot)?;

    println!("📋 Default extraction of {}:", result.metadata.url);
    println!("   Texts:  {}", result.texts.len());
    println!("   Images: {}", result.images.len());
    println!("   Links:  {}", result.links.len());
    println!("   Tables: {}", result.tables.len());
    println!("   Total:  {} records", result.total_records());
    println!();

    if let Some(first) = result.texts.first() {
        println!(
            "   First text record ({}): {:?}",
            first.element.tag_name, first.text
        );
        println!();
    }

    // Second pass: a patch narrows the run to links only. Patches carry the
    // same wire shape the control protocol accepts on stdin.
    let patch: ConfigPatch = serde_json::from_value(serde_json::json!({
        "options": {
            "extractText": false,
            "extractImages": false,
            "extractLinks": true,
            "extractTables": false,
            "extractCustom": false
        }
    }))?;
    let narrowed = config.merge(patch);
    let result = engine.run(&narrowed, &snapshot)?;

    println!("🔧 Links-only extraction:");
    for link in &result.links {
        println!("   {} -> {}", link.text, link.href);
    }
    println!();

    println!("💡 Next steps:");
    println!("   - `pagesift scrape <file.html>` runs a one-shot extraction");
    println!("   - `pagesift serve <file.html>` speaks the stdio control protocol");
    println!("   - `pagesift collect` starts the HTTP collector the scraper posts to");
    println!();

    println!("✅ Quick start example completed!");

    Ok(())
}
