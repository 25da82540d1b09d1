//! HTTP metrics capability.
//!
//! The recorder is injected into the router rather than living in a global
//! registry; exposition is left to whoever owns the recorder.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Sink for per-request measurements
pub trait HttpMetrics: Send + Sync {
    fn record(&self, method: &str, route: &str, status: u16, elapsed: Duration);
}

/// Discards every measurement
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl HttpMetrics for NoopMetrics {
    fn record(&self, _method: &str, _route: &str, _status: u16, _elapsed: Duration) {}
}

/// Label set for one counter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey {
    pub method: String,
    pub route: String,
    pub status: u16,
}

/// Aggregated values for one label set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricValue {
    pub requests: u64,
    pub total_seconds: f64,
}

/// In-process counters keyed by method, route template and status
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    entries: DashMap<MetricKey, MetricValue>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted copy of all counters
    pub fn snapshot(&self) -> Vec<(MetricKey, MetricValue)> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Request count for one label set
    pub fn requests(&self, method: &str, route: &str, status: u16) -> u64 {
        let key = MetricKey {
            method: method.to_string(),
            route: route.to_string(),
            status,
        };
        self.entries.get(&key).map(|v| v.requests).unwrap_or(0)
    }
}

impl HttpMetrics for InMemoryMetrics {
    fn record(&self, method: &str, route: &str, status: u16, elapsed: Duration) {
        let key = MetricKey {
            method: method.to_string(),
            route: route.to_string(),
            status,
        };
        let mut entry = self.entries.entry(key).or_default();
        entry.requests += 1;
        entry.total_seconds += elapsed.as_secs_f64();
    }
}

/// Axum middleware recording one measurement per request.
///
/// Uses the matched route template so ids in paths don't explode cardinality.
pub async fn metrics_middleware(
    State(metrics): State<Arc<dyn HttpMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    metrics.record(&method, &route, response.status().as_u16(), started.elapsed());
    response
}
