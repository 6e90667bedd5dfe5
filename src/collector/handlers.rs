//! Collector HTTP handlers
//!
//! Four endpoints:
//! - `POST /store` ingests one extraction result
//! - `GET /summary` reports per-category totals
//! - `GET /status` reports runtime metrics
//! - `GET /health` is a liveness probe
//!
//! Replies mirror the legacy wire format: `/store` answers
//! `{"status": "success"}` on success, `{"error": ...}` with a 400 on an
//! empty or malformed body, and a 500 when the archive write fails.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hdrhistogram::Histogram;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{debug, error, info, instrument};

use crate::collector::store::{DataStore, StoreSummary};
use crate::cors::cors_layer;
use crate::extraction::ExtractionResult;

/// Health check reply body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" when the collector answers
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Runtime metrics reply for `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorStatus {
    /// Collector version
    pub version: String,
    /// Collector name
    pub name: String,
    /// Seconds since the collector started
    pub uptime_seconds: u64,
    /// Results accepted so far
    pub results_stored: u64,
    /// Store requests that were rejected or failed
    pub store_errors: u64,
    /// Process memory usage
    pub memory: MemoryMetrics,
    /// Store request latency percentiles
    pub store_latency: LatencyMetrics,
    /// Always "running" when the collector answers
    pub status: String,
    /// When this status was generated
    pub timestamp: String,
}

/// Process memory usage sampled from sysinfo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryMetrics {
    /// Resident set size in bytes
    pub rss_bytes: u64,
    /// Virtual memory size in bytes
    pub virtual_bytes: u64,
}

/// Latency percentiles in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// Median store latency
    pub p50_ms: f64,
    /// 95th percentile store latency
    pub p95_ms: f64,
    /// 99th percentile store latency
    pub p99_ms: f64,
    /// Mean store latency
    pub mean_ms: f64,
    /// Slowest store seen
    pub max_ms: f64,
    /// Number of timings recorded
    pub total_requests: u64,
}

/// Thread-safe latency histogram, 1us to 60s at 3 significant figures.
#[derive(Debug)]
pub struct LatencyHistogram {
    inner: RwLock<Histogram<u64>>,
}

impl LatencyHistogram {
    /// An empty histogram. The bounds are constants, so construction
    /// cannot fail at runtime.
    pub fn new() -> Self {
        let histogram =
            Histogram::new_with_bounds(1, 60_000_000, 3).expect("constant histogram bounds");
        Self {
            inner: RwLock::new(histogram),
        }
    }

    /// Record a latency in microseconds. Out-of-bounds values are dropped.
    pub fn record(&self, latency_us: u64) {
        let _ = self.inner.write().record(latency_us);
    }

    /// Record a duration.
    pub fn record_duration(&self, duration: std::time::Duration) {
        self.record(duration.as_micros() as u64);
    }

    /// Number of timings recorded.
    pub fn count(&self) -> u64 {
        self.inner.read().len()
    }

    /// All percentiles, converted to milliseconds.
    pub fn metrics(&self) -> LatencyMetrics {
        let hist = self.inner.read();
        LatencyMetrics {
            p50_ms: hist.value_at_percentile(50.0) as f64 / 1000.0,
            p95_ms: hist.value_at_percentile(95.0) as f64 / 1000.0,
            p99_ms: hist.value_at_percentile(99.0) as f64 / 1000.0,
            mean_ms: hist.mean() / 1000.0,
            max_ms: hist.max() as f64 / 1000.0,
            total_requests: hist.len(),
        }
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared collector state: the store plus runtime counters.
#[derive(Debug)]
pub struct CollectorState {
    store: DataStore,
    start_time: Instant,
    results_stored: AtomicU64,
    store_errors: AtomicU64,
    store_latency: LatencyHistogram,
}

impl CollectorState {
    /// Wrap a store with fresh counters.
    pub fn new(store: DataStore) -> Self {
        Self {
            store,
            start_time: Instant::now(),
            results_stored: AtomicU64::new(0),
            store_errors: AtomicU64::new(0),
            store_latency: LatencyHistogram::new(),
        }
    }

    /// The underlying result store.
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Seconds since the collector started.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Results accepted so far.
    pub fn results_stored(&self) -> u64 {
        self.results_stored.load(Ordering::Relaxed)
    }

    /// Store requests that were rejected or failed.
    pub fn store_errors(&self) -> u64 {
        self.store_errors.load(Ordering::Relaxed)
    }

    fn record_stored(&self, elapsed: std::time::Duration) -> u64 {
        self.store_latency.record_duration(elapsed);
        self.results_stored.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn record_store_error(&self) -> u64 {
        self.store_errors.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Sample memory usage for the current process. Returns zeros when the
/// process cannot be found.
fn collect_memory_metrics() -> MemoryMetrics {
    let pid = Pid::from_u32(std::process::id());
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    match system.process(pid) {
        Some(process) => MemoryMetrics {
            rss_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
        },
        None => {
            debug!("current process missing from sysinfo");
            MemoryMetrics::default()
        }
    }
}

/// `GET /health`
#[instrument(skip_all)]
pub async fn health_handler() -> impl IntoResponse {
    debug!("health check");
    (StatusCode::OK, Json(HealthResponse::default()))
}

/// `POST /store`
///
/// The body is read raw so an empty request gets the legacy
/// `{"error": "No data received"}` reply instead of an extractor rejection.
#[instrument(skip_all)]
pub async fn store_handler(State(state): State<Arc<CollectorState>>, body: Bytes) -> Response {
    let started = Instant::now();

    if body.is_empty() {
        state.record_store_error();
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No data received"})),
        )
            .into_response();
    }

    let result: ExtractionResult = match serde_json::from_slice(&body) {
        Ok(result) => result,
        Err(err) => {
            state.record_store_error();
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("Invalid payload: {err}")})),
            )
                .into_response();
        }
    };

    match state.store.store(result) {
        Ok(count) => {
            state.record_stored(started.elapsed());
            info!(count, "result stored");
            (StatusCode::OK, Json(json!({"status": "success"}))).into_response()
        }
        Err(err) => {
            state.record_store_error();
            error!(%err, "store failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": err.to_string()})),
            )
                .into_response()
        }
    }
}

/// `GET /summary`
#[instrument(skip_all)]
pub async fn summary_handler(State(state): State<Arc<CollectorState>>) -> Json<StoreSummary> {
    Json(state.store.summary())
}

/// `GET /status`
#[instrument(skip_all)]
pub async fn status_handler(State(state): State<Arc<CollectorState>>) -> impl IntoResponse {
    debug!("status check");

    let response = CollectorStatus {
        version: crate::VERSION.to_string(),
        name: crate::NAME.to_string(),
        uptime_seconds: state.uptime_seconds(),
        results_stored: state.results_stored(),
        store_errors: state.store_errors(),
        memory: collect_memory_metrics(),
        store_latency: state.store_latency.metrics(),
        status: "running".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

/// The collector router with the localhost CORS layer applied.
pub fn collector_router(state: Arc<CollectorState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/store", post(store_handler))
        .route("/summary", get(summary_handler))
        .route("/status", get(status_handler))
        .layer(cors_layer())
        .with_state(state)
}
