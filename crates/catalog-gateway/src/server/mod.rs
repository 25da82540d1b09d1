//! Gateway Server
//!
//! HTTP server exposing the item catalog as REST under `/api/v1`.
//! The backend is injected as a [`CatalogRpc`], so the same router serves a
//! remote catalog service or an in-process one.

pub mod deadline;
pub mod error;
mod handlers;
pub mod logging_middleware;
pub mod metrics;
pub mod rate_limit;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use handlers::{AppState, CreateItemBody, HealthResponse, ListParams};
pub use metrics::{HttpMetrics, InMemoryMetrics, NoopMetrics};
pub use rate_limit::{RateLimitConfig, RateLimiter};

use axum::{http::Method, middleware, routing::get, Router};
use catalog_core::CatalogRpc;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::GatewayConfig;

/// Catalog Gateway Server
///
/// All external dependencies are injected through the constructor.
pub struct GatewayServer {
    config: GatewayConfig,
    catalog: Arc<dyn CatalogRpc>,
    metrics: Arc<dyn HttpMetrics>,
    rate_limiter: RateLimiter,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, catalog: Arc<dyn CatalogRpc>) -> Self {
        Self {
            config,
            catalog,
            metrics: Arc::new(NoopMetrics),
            rate_limiter: RateLimiter::pass_through(),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn HttpMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        let app_state = AppState {
            catalog: self.catalog.clone(),
            call_timeout: self.config.call_timeout,
        };

        let items = Router::new()
            .route(
                "/items",
                get(handlers::list_items).post(handlers::create_item),
            )
            .route(
                "/items/{id}",
                get(handlers::get_item)
                    .put(handlers::update_item)
                    .delete(handlers::delete_item),
            );

        let mut router = Router::new()
            .route("/health", get(handlers::health))
            .nest("/api/v1", items)
            .with_state(app_state)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit::rate_limit_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                self.metrics.clone(),
                metrics::metrics_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            // Access log with trace IDs
            .layer(middleware::from_fn(
                logging_middleware::http_logging_middleware,
            ));

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Run the gateway server until a shutdown signal arrives
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: tokio::net::TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!("[Gateway] Starting on {}", addr);
        info!(
            "[Gateway] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );

        let router = self.router();
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        info!("[Gateway] Stopped");
        Ok(())
    }

    /// Start the server in the background
    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
