//! Result delivery
//!
//! Ships the JSON-serialized extraction result to the local collector
//! endpoint with a single `POST`. A 2xx reply body is JSON and is handed
//! back to the caller; any other status is a delivery failure. Failed
//! deliveries are never retried here.

use crate::error::DeliveryError;
use crate::extraction::ExtractionResult;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default collector endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5584/store";

/// Cap on how long one delivery may take
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error-body snippet carried in a rejection
const BODY_SNIPPET_CHARS: usize = 256;

/// HTTP client that ships extraction results to the collector.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    endpoint: String,
    client: reqwest::Client,
}

impl DeliveryClient {
    /// Client for the default local endpoint.
    pub fn new() -> Result<Self, DeliveryError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Client for a specific endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Deliver one result, returning the endpoint's JSON reply.
    #[instrument(skip(self, result), fields(endpoint = %self.endpoint))]
    pub async fn deliver(&self, result: &ExtractionResult) -> Result<Value, DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(result)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
            });
        }

        let reply: Value = response.json().await?;
        debug!(records = result.total_records(), "result delivered");
        Ok(reply)
    }
}
