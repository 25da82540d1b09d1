//! Catalog Gateway
//!
//! REST facade over the catalog RPC boundary:
//! - Parses and validates HTTP input into typed RPC requests
//! - Bounds every backend call with a deadline
//! - Maps backend error categories onto HTTP status codes
//! - Access logging with trace IDs, per-route metrics and rate limiting

pub mod client;
pub mod config;
pub mod logging;
pub mod server;

pub use client::RemoteCatalogClient;
pub use config::GatewayConfig;
pub use server::{
    shutdown_signal, ApiError, AppState, ErrorBody, GatewayServer, HttpMetrics, InMemoryMetrics,
    NoopMetrics, RateLimitConfig, RateLimiter,
};
