//! End-to-end REST behavior for `/api/v1/items`

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use catalog_core::CatalogService;
use catalog_gateway::{GatewayConfig, GatewayServer};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::fixtures::{numbered_items, test_item};
use tests::http::send;
use tests::mocks::MockItemRepository;

fn router_over(repo: MockItemRepository) -> Router {
    let catalog = CatalogService::new(Arc::new(repo));
    GatewayServer::new(GatewayConfig::default(), Arc::new(catalog)).router()
}

#[tokio::test]
async fn create_widget() {
    let router = router_over(MockItemRepository::new());

    let (status, body) = send(
        &router,
        "POST",
        "/api/v1/items",
        Some(r#"{"title":"Widget","description":"A widget","tags":["tools"],"imageUrl":"http://x/w.png"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["title"], "Widget");
    assert_eq!(body["description"], "A widget");
    assert_eq!(body["tags"], json!(["tools"]));
    assert_eq!(body["imageUrl"], "http://x/w.png");
    assert_eq!(body["rating"], 0.0);
    assert_eq!(body["reviewCount"], 0);
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn list_second_page() {
    let router = router_over(MockItemRepository::new().with_items(numbered_items(12)));

    let (status, body) = send(&router, "GET", "/api/v1/items?page=2&limit=5", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 12);
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 3);
    let titles: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Item 07", "Item 06", "Item 05", "Item 04", "Item 03"]);
}

#[tokio::test]
async fn list_defaults_to_first_page_of_ten() {
    let router = router_over(MockItemRepository::new().with_items(numbered_items(12)));

    let (status, body) = send(&router, "GET", "/api/v1/items", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn get_unknown_id_is_404_with_json_body() {
    let router = router_over(MockItemRepository::new());

    let (status, body) = send(&router, "GET", "/api/v1/items/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "item not found"}));
}

#[tokio::test]
async fn update_title_only_keeps_other_fields() {
    let item = test_item("Widget");
    let router = router_over(MockItemRepository::new().with_item(item.clone()));

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (status, body) = send(
        &router,
        "PUT",
        &format!("/api/v1/items/{}", item.id),
        Some(r#"{"title":"Gadget"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Gadget");
    assert_eq!(body["description"], item.description.as_str());
    assert_eq!(body["tags"], json!(item.tags));
    assert_eq!(body["imageUrl"], item.image_url.as_str());
    assert_ne!(body["updatedAt"], body["createdAt"]);
}

#[tokio::test]
async fn update_with_empty_description_clears_it() {
    let item = test_item("Widget");
    let router = router_over(MockItemRepository::new().with_item(item.clone()));

    let (status, body) = send(
        &router,
        "PUT",
        &format!("/api/v1/items/{}", item.id),
        Some(r#"{"description":""}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "");
    assert_eq!(body["title"], "Widget");
}

#[tokio::test]
async fn update_with_null_field_leaves_it_unchanged() {
    let item = test_item("Widget");
    let router = router_over(MockItemRepository::new().with_item(item.clone()));

    let (status, body) = send(
        &router,
        "PUT",
        &format!("/api/v1/items/{}", item.id),
        Some(r#"{"description":null,"tags":["new"]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], item.description.as_str());
    assert_eq!(body["tags"], json!(["new"]));
}

#[tokio::test]
async fn update_with_empty_body_refreshes_updated_at() {
    let item = test_item("Widget");
    let router = router_over(MockItemRepository::new().with_item(item.clone()));

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (status, body) = send(
        &router,
        "PUT",
        &format!("/api/v1/items/{}", item.id),
        Some("{}"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Widget");
    assert_eq!(body["description"], item.description.as_str());
    assert_eq!(body["tags"], json!(item.tags));
    assert_eq!(body["imageUrl"], item.image_url.as_str());

    let updated_at: DateTime<Utc> = body["updatedAt"].as_str().unwrap().parse().unwrap();
    assert!(updated_at > item.updated_at);
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let router = router_over(MockItemRepository::new());

    let (status, body) = send(
        &router,
        "PUT",
        "/api/v1/items/missing",
        Some(r#"{"title":"Gadget"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "item not found");
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let item = test_item("Widget");
    let router = router_over(MockItemRepository::new().with_item(item.clone()));
    let path = format!("/api/v1/items/{}", item.id);

    let (status, body) = send(&router, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "item deleted"}));

    let (status, _) = send(&router, "GET", &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tags_query_narrows_to_tagged_items() {
    let mut items = numbered_items(3);
    items[1].tags = vec!["blue".to_string()];
    let router = router_over(MockItemRepository::new().with_items(items));

    let (status, body) = send(&router, "GET", "/api/v1/items?tags=blue,green", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Item 02");
}
