//! Extraction orchestrator
//!
//! Single entry point for a run: takes a configuration and a page
//! snapshot, dispatches every enabled category's selectors to its
//! extractor, and assembles the result envelope.
//!
//! Failure containment has two layers. A selector that fails to parse is
//! logged and skipped, and the run continues with the next selector. A
//! failure escaping that isolation is caught at the top of the walk and
//! recorded on the result's `error` field; the records gathered up to
//! that point are still returned. Callers always receive an envelope.
//!
//! One engine guards one page context: a run that arrives while another
//! is in flight is rejected immediately with a busy outcome, never queued.

use crate::config::{Category, ScrapeConfig};
use crate::error::ExtractionError;
use crate::extraction::custom::CustomExtractor;
use crate::extraction::image::ImageExtractor;
use crate::extraction::link::LinkExtractor;
use crate::extraction::record::{ExtractionResult, ResultMetadata};
use crate::extraction::table::TableExtractor;
use crate::extraction::text::TextExtractor;
use crate::source::PageSnapshot;
use chrono::{SecondsFormat, Utc};
use scraper::{Html, Selector};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Orchestrates extraction runs over one page context.
///
/// Construct one engine per context and share it by reference; the busy
/// guard is only meaningful when all callers go through the same instance.
#[derive(Debug, Default)]
pub struct ExtractionEngine {
    in_progress: AtomicBool,
}

/// Clears the in-progress flag when dropped, so every exit path of a run
/// releases the guard, panics included.
pub(crate) struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl ExtractionEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a run currently holds the guard.
    pub fn is_busy(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Take the guard if no run holds it.
    pub(crate) fn try_acquire(&self) -> Option<RunGuard<'_>> {
        self.in_progress
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
            .then(|| RunGuard {
                flag: &self.in_progress,
            })
    }

    /// Run one extraction over the given snapshot.
    ///
    /// Returns [`ExtractionError::Busy`] when another run is in flight.
    /// Any other failure is contained and reported inside the envelope.
    #[instrument(skip(self, config, page), fields(url = %page.url))]
    pub fn run(
        &self,
        config: &ScrapeConfig,
        page: &PageSnapshot,
    ) -> Result<ExtractionResult, ExtractionError> {
        let _guard = self.try_acquire().ok_or(ExtractionError::Busy)?;

        let doc = Html::parse_document(&page.html);
        let base = Url::parse(&page.url).ok();
        let metadata = ResultMetadata {
            url: page.url.clone(),
            title: document_title(&doc),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            source: crate::NAME.to_string(),
            config: config.clone(),
        };
        let mut result = ExtractionResult::new(metadata);

        let walk = panic::catch_unwind(AssertUnwindSafe(|| {
            self.walk(config, &doc, base.as_ref(), &mut result);
        }));
        if let Err(panic) = walk {
            let message = panic_message(panic);
            error!(message, "extraction aggregation failed");
            result.error = Some(message);
        }

        info!(records = result.total_records(), "extraction complete");
        Ok(result)
    }

    /// Visit every enabled category's selectors in configured order.
    fn walk(
        &self,
        config: &ScrapeConfig,
        doc: &Html,
        base: Option<&Url>,
        result: &mut ExtractionResult,
    ) {
        for category in Category::ALL {
            if !config.options.enabled(category) {
                debug!(%category, "category disabled, skipped");
                continue;
            }
            for selector in config.selectors.for_category(category) {
                if let Err(err) = collect(category, selector, doc, base, result) {
                    warn!(%category, selector, %err, "selector skipped");
                }
            }
        }
    }
}

/// Dispatch one selector to its category's extractor and append the
/// records. This is the per-selector containment boundary: an error here
/// costs exactly this selector's records.
fn collect(
    category: Category,
    selector: &str,
    doc: &Html,
    base: Option<&Url>,
    result: &mut ExtractionResult,
) -> Result<(), ExtractionError> {
    match category {
        Category::Text => result.texts.extend(TextExtractor::extract(selector, doc)?),
        Category::Images => result
            .images
            .extend(ImageExtractor::extract(selector, doc, base)?),
        Category::Links => result
            .links
            .extend(LinkExtractor::extract(selector, doc, base)?),
        Category::Tables => result
            .tables
            .extend(TableExtractor::extract(selector, doc)?),
        Category::Custom => result
            .custom
            .extend(CustomExtractor::extract(selector, doc)?),
    }
    Ok(())
}

/// Trimmed `<title>` text, empty when the document has none.
fn document_title(doc: &Html) -> String {
    match Selector::parse("title") {
        Ok(selector) => doc
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Best-effort message out of a panic payload.
fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "extraction aggregation panicked".to_string()
    }
}
