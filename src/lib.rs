//! PageSift - Selector-Driven Web Data Extraction Pipeline
//!
//! This crate turns rendered HTML documents into uniform, typed records
//! using plain CSS selectors, and ships the results to a local collector
//! service.
//!
//! # Features
//!
//! - **Extraction Engine**: Five record categories (text, images, links,
//!   tables, custom) driven entirely by configured selector lists
//! - **Control Protocol**: Line-oriented JSON over stdio for triggering
//!   scrapes and managing configuration
//! - **Collector**: Axum HTTP service that stores results, mirrors them to
//!   a JSON archive, and serves summary and status queries
//! - **Scheduler**: Fixed-period polling for dynamic pages
//! - **Settings**: JSON-file persistence of configuration, page mode and
//!   poll interval
//!
//! # Architecture
//!
//! ```text
//! stdin/stdout ──▶ Control Server ──▶ Control Service ──▶ Extraction Engine
//!                                          │                    │
//!                                          ▼                    ▼
//!                                    ┌──────────┐        Typed Records
//!                                    │ Delivery │        (5 categories)
//!                                    └────┬─────┘
//!                                         │ HTTP POST
//!                                         ▼
//!                                    Collector ──▶ Store + JSON Archive
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use pagesift::config::ScrapeConfig;
//! use pagesift::extraction::ExtractionEngine;
//! use pagesift::source::{DocumentSource, StaticSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = StaticSource::new(
//!         "https://example.com",
//!         "<html><body><p>Hello</p><a href='/next'>Next</a></body></html>",
//!     );
//!
//!     let engine = ExtractionEngine::new();
//!     let result = engine.run(&ScrapeConfig::default(), &source.snapshot()?)?;
//!
//!     println!("{} records extracted", result.total_records());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod collector;
pub mod config;
pub mod control;
pub mod cors;
pub mod delivery;
pub mod error;
pub mod extraction;
pub mod scheduler;
pub mod settings;
pub mod source;

// Re-exports for convenience
pub use config::{ConfigPatch, ScrapeConfig};
pub use control::{ControlServer, ControlService};
pub use delivery::DeliveryClient;
pub use error::{Error, Result};
pub use extraction::{ExtractionEngine, ExtractionResult};
pub use settings::{PageMode, Settings, SettingsStore};
pub use source::{DocumentSource, FileSource, PageSnapshot, StaticSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
