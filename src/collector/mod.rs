//! Collector HTTP service
//!
//! A small axum server that receives extraction results from the control
//! side, keeps them in memory, optionally mirrors them to a JSON archive
//! file, and answers summary and status queries. Only localhost origins
//! pass the CORS layer.

pub mod handlers;
pub mod store;

pub use handlers::{
    collector_router, CollectorState, CollectorStatus, HealthResponse, LatencyHistogram,
    LatencyMetrics, MemoryMetrics,
};
pub use store::{DataStore, StoreSummary};

use crate::error::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Bind `addr` and serve the collector until the process exits.
pub async fn serve(addr: SocketAddr, state: Arc<CollectorState>) -> Result<()> {
    let app = collector_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "collector listening");
    axum::serve(listener, app).await?;
    Ok(())
}
