//! Gateway and catalog service wired together over real sockets

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use catalog_gateway::{GatewayConfig, GatewayServer, RemoteCatalogClient};
use catalog_service::{open_catalog, serve};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tests::async_helpers::{with_timeout, DEFAULT_TIMEOUT};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct Stack {
    gateway: SocketAddr,
    service_health: SocketAddr,
    stop: Vec<oneshot::Sender<()>>,
    _data: tempfile::TempDir,
}

impl Stack {
    async fn start() -> Self {
        let data = tempfile::tempdir().unwrap();
        let db_path = data.path().join("catalog.db");
        let catalog = open_catalog(db_path.to_str().unwrap()).unwrap();

        let rpc_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let http_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let rpc_addr = rpc_listener.local_addr().unwrap();
        let service_health = http_listener.local_addr().unwrap();

        let (service_stop, service_rx) = oneshot::channel::<()>();
        tokio::spawn(serve(rpc_listener, http_listener, Arc::new(catalog), async move {
            let _ = service_rx.await;
        }));

        let client =
            RemoteCatalogClient::new(format!("http://{}", rpc_addr), Duration::from_secs(5))
                .unwrap();
        let gateway_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let gateway = gateway_listener.local_addr().unwrap();

        let (gateway_stop, gateway_rx) = oneshot::channel::<()>();
        let server = GatewayServer::new(GatewayConfig::default(), Arc::new(client));
        tokio::spawn(server.serve(gateway_listener, async move {
            let _ = gateway_rx.await;
        }));

        Self {
            gateway,
            service_health,
            stop: vec![service_stop, gateway_stop],
            _data: data,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.gateway, path)
    }

    fn shutdown(self) {
        for tx in self.stop {
            let _ = tx.send(());
        }
    }
}

#[tokio::test]
async fn item_lifecycle_through_both_services() {
    let stack = Stack::start().await;
    let http = reqwest::Client::new();

    with_timeout(DEFAULT_TIMEOUT, async {
        let created: Value = http
            .post(stack.url("/api/v1/items"))
            .json(&json!({
                "title": "Widget",
                "description": "A widget",
                "tags": ["tools"],
                "imageUrl": "http://x/w.png"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["rating"], 0.0);

        let listed: Value = http
            .get(stack.url("/api/v1/items?page=1&limit=5"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["items"][0]["id"], id.as_str());

        let response = http
            .put(stack.url(&format!("/api/v1/items/{}", id)))
            .json(&json!({"title": "Gadget"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Value = response.json().await.unwrap();
        assert_eq!(updated["title"], "Gadget");
        assert_eq!(updated["description"], "A widget");

        let response = http
            .delete(stack.url(&format!("/api/v1/items/{}", id)))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = http
            .get(stack.url(&format!("/api/v1/items/{}", id)))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "item not found"}));
    })
    .await;

    stack.shutdown();
}

#[tokio::test]
async fn validation_errors_cross_the_wire() {
    let stack = Stack::start().await;
    let http = reqwest::Client::new();

    with_timeout(DEFAULT_TIMEOUT, async {
        let response = http
            .post(stack.url("/api/v1/items"))
            .json(&json!({"title": "", "description": "", "tags": [], "imageUrl": ""}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "title must not be empty"}));
    })
    .await;

    stack.shutdown();
}

#[tokio::test]
async fn both_health_endpoints_respond() {
    let stack = Stack::start().await;

    with_timeout(DEFAULT_TIMEOUT, async {
        let gateway: Value = reqwest::get(stack.url("/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(gateway["status"], "ok");

        let service: Value = reqwest::get(format!("http://{}/health", stack.service_health))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(service["status"], "ok");
    })
    .await;

    stack.shutdown();
}
