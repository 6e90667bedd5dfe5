//! Stdio control transport
//!
//! Reads one JSON request per line from stdin and writes one JSON reply per
//! line to stdout. Malformed input earns a failure reply; nothing short of
//! stdin closing stops the loop.

use crate::control::service::ControlService;
use crate::control::types::{ControlReply, ControlRequest, ErrorReply, KNOWN_ACTIONS};
use crate::error::{ControlError, Result};
use serde_json::Value;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Line-oriented stdio front end for the control service.
pub struct ControlServer {
    service: Arc<ControlService>,
}

impl ControlServer {
    /// Wrap a service.
    pub fn new(service: Arc<ControlService>) -> Self {
        Self { service }
    }

    /// Run the read-dispatch-reply loop until stdin closes.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<()> {
        info!("Control server listening on stdio");

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    error!(%err, "failed to read request line");
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            debug!(request = %line, "received");

            let reply = self.handle_line(&line).await;
            let json = serde_json::to_string(&reply).unwrap_or_else(|err| {
                error!(%err, "failed to serialize reply");
                r#"{"success":false,"error":"Internal error"}"#.to_string()
            });

            debug!(reply = %json, "sending");

            if let Err(err) = writeln!(stdout, "{json}") {
                error!(%err, "failed to write reply");
            }
            if let Err(err) = stdout.flush() {
                error!(%err, "failed to flush stdout");
            }
        }

        info!("Control server shutting down");
        Ok(())
    }

    /// Turn one input line into a reply.
    async fn handle_line(&self, line: &str) -> ControlReply {
        match parse_request(line) {
            Ok(request) => self.service.handle(request).await,
            Err(err) => {
                warn!(%err, "request rejected");
                ControlReply::Error(ErrorReply::new(err.to_string()))
            }
        }
    }
}

/// Parse one request line, distinguishing unknown actions from malformed
/// JSON so the reply names the actual problem.
fn parse_request(line: &str) -> std::result::Result<ControlRequest, ControlError> {
    let value: Value = serde_json::from_str(line)
        .map_err(|err| ControlError::InvalidRequest(err.to_string()))?;

    match value.get("action").and_then(Value::as_str) {
        Some(action) if !KNOWN_ACTIONS.contains(&action) => {
            return Err(ControlError::UnknownAction(action.to_string()));
        }
        None => {
            return Err(ControlError::InvalidRequest(
                "missing action field".to_string(),
            ));
        }
        _ => {}
    }

    serde_json::from_value(value).map_err(|err| ControlError::InvalidRequest(err.to_string()))
}
