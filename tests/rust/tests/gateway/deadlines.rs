//! Per-call deadline enforcement

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use catalog_gateway::server::error::INTERNAL_MESSAGE;
use catalog_gateway::{GatewayConfig, GatewayServer};
use serde_json::json;
use tests::http::send;
use tests::mocks::SlowCatalog;

#[tokio::test(start_paused = true)]
async fn slow_backend_yields_500_after_default_deadline() {
    let router = GatewayServer::new(GatewayConfig::default(), Arc::new(SlowCatalog::default()))
        .router();

    let started = tokio::time::Instant::now();
    let (status, body) = send(&router, "GET", "/api/v1/items/abc", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": INTERNAL_MESSAGE}));
    assert!(started.elapsed() >= Duration::from_secs(5));
    assert!(started.elapsed() < Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn configured_deadline_is_used() {
    let config = GatewayConfig {
        call_timeout: Duration::from_millis(200),
        ..GatewayConfig::default()
    };
    let router = GatewayServer::new(config, Arc::new(SlowCatalog::default())).router();

    let started = tokio::time::Instant::now();
    let (status, _) = send(
        &router,
        "POST",
        "/api/v1/items",
        Some(r#"{"title":"Widget","description":"","tags":[],"imageUrl":""}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(started.elapsed() < Duration::from_secs(1));
}
