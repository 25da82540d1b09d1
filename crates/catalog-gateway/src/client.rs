//! HTTP/JSON client for the remote catalog service.
//!
//! Each [`CatalogRpc`] method is a POST to `/rpc/catalog.CatalogService/{Method}`.
//! A non-2xx reply carries an [`RpcStatus`] envelope that is turned back into
//! a categorized [`CatalogError`]; anything else becomes an internal error.

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use catalog_core::rpc::{
    method_path, CREATE_ITEM, DELETE_ITEM, GET_ITEM, LIST_ITEMS, TIMEOUT_HEADER, UPDATE_ITEM,
};
use catalog_core::{
    CatalogError, CatalogResult, CatalogRpc, CreateItemRequest, DeleteItemRequest,
    DeleteItemResponse, GetItemRequest, Item, ItemPage, ListItemsRequest, RpcStatus,
    UpdateItemRequest,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the catalog service RPC endpoint
#[derive(Clone)]
pub struct RemoteCatalogClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RemoteCatalogClient {
    /// Create a client; `timeout` bounds each call and is forwarded to the
    /// server so it can stop work the caller no longer waits for.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("catalog-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<Req, Resp>(&self, method: &str, request: &Req) -> CatalogResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, method_path(method));
        debug!(method, url = %url, "[Catalog] RPC call");

        let response = self
            .client
            .post(&url)
            .header(TIMEOUT_HEADER, self.timeout.as_millis().to_string())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(method, "[Catalog] RPC call timed out");
                    CatalogError::deadline_exceeded()
                } else {
                    warn!(method, error = %e, "[Catalog] RPC transport failure");
                    CatalogError::internal(format!("transport error: {}", e))
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<Resp>().await.map_err(|e| {
                warn!(method, error = %e, "[Catalog] Undecodable RPC response");
                CatalogError::internal(format!("invalid response: {}", e))
            });
        }

        let body = response.bytes().await.unwrap_or_default();
        match serde_json::from_slice::<RpcStatus>(&body) {
            Ok(rpc_status) => Err(rpc_status.into()),
            Err(_) => {
                warn!(method, status = %status, "[Catalog] RPC failed without status envelope");
                Err(CatalogError::internal(format!(
                    "unexpected response status {}",
                    status
                )))
            }
        }
    }
}

#[async_trait]
impl CatalogRpc for RemoteCatalogClient {
    async fn list_items(&self, request: ListItemsRequest) -> CatalogResult<ItemPage> {
        self.call(LIST_ITEMS, &request).await
    }

    async fn get_item(&self, request: GetItemRequest) -> CatalogResult<Item> {
        self.call(GET_ITEM, &request).await
    }

    async fn create_item(&self, request: CreateItemRequest) -> CatalogResult<Item> {
        self.call(CREATE_ITEM, &request).await
    }

    async fn update_item(&self, request: UpdateItemRequest) -> CatalogResult<Item> {
        self.call(UPDATE_ITEM, &request).await
    }

    async fn delete_item(&self, request: DeleteItemRequest) -> CatalogResult<DeleteItemResponse> {
        self.call(DELETE_ITEM, &request).await
    }
}
