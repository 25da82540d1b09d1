//! Catalog RPC boundary
//!
//! [`CatalogRpc`] is the typed interface the gateway consumes and the
//! catalog service exposes. Each method returns either a success value or a
//! [`CatalogError`](crate::CatalogError) carrying a category tag.
//!
//! ```text
//! Gateway ──CatalogRpc──► RemoteCatalogClient ──HTTP/JSON──► RPC server ──► CatalogService
//!    └──────────────────CatalogRpc (in-process)───────────────────────────► CatalogService
//! ```

pub mod messages;

use async_trait::async_trait;

use crate::domain::{Item, ItemPage};
use crate::error::CatalogResult;

pub use messages::*;

/// The five catalog operations
#[async_trait]
pub trait CatalogRpc: Send + Sync {
    async fn list_items(&self, request: ListItemsRequest) -> CatalogResult<ItemPage>;

    async fn get_item(&self, request: GetItemRequest) -> CatalogResult<Item>;

    async fn create_item(&self, request: CreateItemRequest) -> CatalogResult<Item>;

    async fn update_item(&self, request: UpdateItemRequest) -> CatalogResult<Item>;

    async fn delete_item(&self, request: DeleteItemRequest) -> CatalogResult<DeleteItemResponse>;
}
