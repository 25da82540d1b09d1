//! Wire messages for the catalog RPC transport

use serde::{Deserialize, Serialize};

use crate::domain::{ItemPatch, ItemPage};
use crate::error::{CatalogError, ErrorCategory};

/// Path prefix shared by every RPC method
pub const RPC_PREFIX: &str = "/rpc/catalog.CatalogService";

/// Header carrying the caller's remaining budget in milliseconds
pub const TIMEOUT_HEADER: &str = "x-catalog-timeout-ms";

pub const LIST_ITEMS: &str = "ListItems";
pub const GET_ITEM: &str = "GetItem";
pub const CREATE_ITEM: &str = "CreateItem";
pub const UPDATE_ITEM: &str = "UpdateItem";
pub const DELETE_ITEM: &str = "DeleteItem";

/// Full path for an RPC method
pub fn method_path(method: &str) -> String {
    format!("{}/{}", RPC_PREFIX, method)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsRequest {
    pub page: i32,
    pub limit: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

pub type ListItemsResponse = ItemPage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetItemRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub id: String,
    #[serde(flatten)]
    pub patch: ItemPatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItemRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItemResponse {
    pub message: String,
}

/// Error envelope returned with every non-2xx RPC response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcStatus {
    pub code: ErrorCategory,
    pub message: String,
}

impl From<&CatalogError> for RpcStatus {
    fn from(err: &CatalogError) -> Self {
        Self {
            code: err.category(),
            message: err.message().to_string(),
        }
    }
}

impl From<RpcStatus> for CatalogError {
    fn from(status: RpcStatus) -> Self {
        CatalogError::new(status.code, status.message)
    }
}
