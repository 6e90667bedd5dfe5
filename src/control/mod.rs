//! Control plane
//!
//! A small action-tagged protocol drives the engine: `scrape` runs one
//! extraction and pushes the result to the collector, `updateConfig` merges
//! a partial configuration and persists it, `getConfig` reads it back.
//! [`ControlService`] implements the actions; [`ControlServer`] exposes them
//! over stdio, one JSON document per line in each direction.

pub mod server;
pub mod service;
pub mod types;

pub use server::ControlServer;
pub use service::ControlService;
pub use types::{ConfigReply, ControlReply, ControlRequest, ErrorReply, ScrapeReply};
