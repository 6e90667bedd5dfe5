//! Error types for Pagesift
//!
//! This module provides the error type hierarchy using `thiserror`,
//! shared by the extraction engine, the control layer, and the
//! delivery/collector plumbing.

use thiserror::Error;

/// The main error type for Pagesift operations
#[derive(Error, Debug)]
pub enum Error {
    /// Extraction engine errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration and settings errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Control protocol errors
    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    /// Result delivery errors
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Extraction engine errors
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A selector string failed to parse. Contained at the per-selector
    /// boundary: the selector yields zero records and the run continues.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// A run was requested while another run holds the in-progress guard
    #[error("Extraction already in progress")]
    Busy,
}

/// Configuration and settings-store errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Page mode was neither `static` nor `dynamic`
    #[error("Invalid page mode: {0}")]
    InvalidPageMode(String),

    /// Poll interval below the supported minimum
    #[error("Poll interval too small: {0}ms (minimum {min}ms)", min = crate::settings::MIN_INTERVAL_MS)]
    IntervalTooSmall(u64),

    /// Settings file exists but could not be parsed
    #[error("Malformed settings file {path}: {message}")]
    Malformed {
        /// Path of the offending file
        path: String,
        /// Parser diagnostic
        message: String,
    },
}

/// Control protocol errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// Request line was not valid JSON or lacked a recognizable shape
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The tagged action is not one the service dispatches
    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

/// Result delivery errors
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The HTTP request itself failed (connect, timeout, body decode)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status
    #[error("Endpoint rejected payload: HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, truncated by the caller if oversized
        body: String,
    },
}

/// Result type alias for Pagesift operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }
}
