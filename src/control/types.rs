//! Control protocol types
//!
//! Tagged requests and their replies. The wire format is the legacy one:
//! requests carry an `action` discriminator, replies always carry a
//! `success` flag plus action-specific fields.

use crate::config::{ConfigPatch, ScrapeConfig};
use crate::extraction::ExtractionResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Actions the control service dispatches.
pub const KNOWN_ACTIONS: [&str; 3] = ["scrape", "updateConfig", "getConfig"];

/// One inbound control request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ControlRequest {
    /// Run extraction over the current snapshot and deliver the result
    Scrape,
    /// Merge a partial configuration onto the current one and persist it
    UpdateConfig {
        /// The override; absent fields keep their current values
        #[serde(default)]
        config: ConfigPatch,
    },
    /// Report the current configuration
    GetConfig,
}

/// Reply to a `scrape` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeReply {
    /// Whether extraction ran and the result reached the collector
    pub success: bool,
    /// The extraction result. Present on success, and also on delivery
    /// failure: the data was computed even though it never arrived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractionResult>,
    /// JSON reply body from the collector endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_response: Option<Value>,
    /// What went wrong, when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeReply {
    /// Extraction ran and the collector accepted the result.
    pub fn delivered(data: ExtractionResult, server_response: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            server_response: Some(server_response),
            error: None,
        }
    }

    /// Extraction ran but the result never reached the collector.
    pub fn undelivered(data: ExtractionResult, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            server_response: None,
            error: Some(error.into()),
        }
    }

    /// Nothing was extracted (busy guard, unavailable snapshot).
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            server_response: None,
            error: Some(error.into()),
        }
    }
}

/// Reply to `updateConfig` and `getConfig` requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigReply {
    /// Whether the request was served
    pub success: bool,
    /// The current configuration after the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ScrapeConfig>,
    /// What went wrong, when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConfigReply {
    /// Serve the (possibly just merged) configuration.
    pub fn ok(config: ScrapeConfig) -> Self {
        Self {
            success: true,
            config: Some(config),
            error: None,
        }
    }

    /// The request could not be served.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            config: None,
            error: Some(error.into()),
        }
    }
}

/// Failure reply for requests that never reached a handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    /// Always false
    pub success: bool,
    /// Parse or dispatch diagnostic
    pub error: String,
}

impl ErrorReply {
    /// Wrap a diagnostic message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Any reply the control service can emit. Serializes as the inner shape,
/// matching the legacy wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ControlReply {
    /// Outcome of a scrape
    Scrape(ScrapeReply),
    /// Outcome of a configuration request
    Config(ConfigReply),
    /// Request-level failure
    Error(ErrorReply),
}
