//! Per-route rate limiting middleware for the gateway.
//!
//! Rules are keyed by the matched route template (`/api/v1/items/{id}`), the
//! same label the metrics middleware uses, so every item id shares one
//! bucket. The gateway ships with no rules, so by default this is a
//! pass-through.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::error::ApiError;

/// Configuration for a rate-limited route.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed within the window.
    pub max_requests: u32,
    /// Time window duration.
    pub window: Duration,
}

/// Fixed window for one route template
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    admitted: u32,
}

impl Window {
    fn open(now: Instant) -> Self {
        Self {
            started: now,
            admitted: 0,
        }
    }

    fn admit(&mut self, config: &RateLimitConfig, now: Instant) -> bool {
        if now.duration_since(self.started) >= config.window {
            *self = Self::open(now);
        }
        if self.admitted >= config.max_requests {
            return false;
        }
        self.admitted += 1;
        true
    }
}

/// Shared rate limiter state (clone-friendly via Arc).
#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    rules: Arc<HashMap<String, RateLimitConfig>>,
}

impl RateLimiter {
    /// Build a limiter from `(route template, config)` pairs.
    pub fn new(rules: impl IntoIterator<Item = (String, RateLimitConfig)>) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            rules: Arc::new(rules.into_iter().collect()),
        }
    }

    /// A limiter with no rules: every request is allowed.
    pub fn pass_through() -> Self {
        Self::default()
    }

    /// Returns `true` if a request on `route` is within limits.
    ///
    /// Routes without a rule are always allowed.
    pub fn check(&self, route: &str) -> bool {
        let Some(config) = self.rules.get(route) else {
            return true;
        };
        let now = Instant::now();
        self.windows
            .entry(route.to_string())
            .or_insert_with(|| Window::open(now))
            .admit(config, now)
    }
}

/// Axum middleware function for rate limiting.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(route) = request.extensions().get::<MatchedPath>() {
        if !limiter.check(route.as_str()) {
            tracing::warn!(route = %route.as_str(), "Rate limit exceeded");
            return ApiError::too_many_requests().into_response();
        }
    }

    next.run(request).await
}
