//! Input validation happens before any backend call

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use catalog_core::CatalogService;
use catalog_gateway::server::error::INTERNAL_MESSAGE;
use catalog_gateway::{GatewayConfig, GatewayServer};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::http::send;
use tests::mocks::{CountingCatalog, FailingItemRepository, MockItemRepository};

fn counting_router() -> (Router, Arc<CountingCatalog>) {
    let inner = Arc::new(CatalogService::new(Arc::new(MockItemRepository::new())));
    let counting = Arc::new(CountingCatalog::new(inner));
    let router = GatewayServer::new(GatewayConfig::default(), counting.clone()).router();
    (router, counting)
}

#[tokio::test]
async fn malformed_create_body_is_400_without_backend_call() {
    let (router, backend) = counting_router();

    let (status, body) = send(&router, "POST", "/api/v1/items", Some("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn create_missing_field_is_400_without_backend_call() {
    let (router, backend) = counting_router();

    let (status, _) = send(
        &router,
        "POST",
        "/api/v1/items",
        Some(r#"{"title":"Widget","description":"A widget","tags":[]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn create_wrong_type_is_400_without_backend_call() {
    let (router, backend) = counting_router();

    let (status, _) = send(
        &router,
        "POST",
        "/api/v1/items",
        Some(r#"{"title":"Widget","description":"d","tags":"tools","imageUrl":""}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn malformed_update_body_is_400_without_backend_call() {
    let (router, backend) = counting_router();

    let (status, _) = send(&router, "PUT", "/api/v1/items/abc", Some(r#"{"title":42}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn bad_pagination_is_400_without_backend_call() {
    let (router, backend) = counting_router();

    for uri in [
        "/api/v1/items?page=abc",
        "/api/v1/items?limit=ten",
        "/api/v1/items?page=0",
        "/api/v1/items?page=-1",
    ] {
        let (status, body) = send(&router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn non_positive_limit_still_reaches_backend() {
    let (router, backend) = counting_router();

    let (status, _) = send(&router, "GET", "/api/v1/items?limit=0", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn empty_title_is_400_from_backend() {
    let (router, backend) = counting_router();

    let (status, body) = send(
        &router,
        "POST",
        "/api/v1/items",
        Some(r#"{"title":"","description":"","tags":[],"imageUrl":""}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "title must not be empty"}));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn internal_failure_detail_is_hidden() {
    let catalog = CatalogService::new(Arc::new(FailingItemRepository));
    let router = GatewayServer::new(GatewayConfig::default(), Arc::new(catalog)).router();

    for (method, uri, body) in [
        ("GET", "/api/v1/items", None),
        ("GET", "/api/v1/items/abc", None),
        ("DELETE", "/api/v1/items/abc", None),
        ("PUT", "/api/v1/items/abc", Some(r#"{"title":"Gadget"}"#)),
        (
            "POST",
            "/api/v1/items",
            Some(r#"{"title":"Widget","description":"","tags":[],"imageUrl":""}"#),
        ),
    ] {
        let (status, json) = send(&router, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(json, json!({"error": INTERNAL_MESSAGE}));
    }
}
