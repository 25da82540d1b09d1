//! Catalog service - domain rules over the item repository

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::{Item, ItemPage, PageRequest};
use crate::error::{CatalogError, CatalogResult};
use crate::repository::{ItemQuery, ItemRepository};
use crate::rpc::{
    CatalogRpc, CreateItemRequest, DeleteItemRequest, DeleteItemResponse, GetItemRequest,
    ListItemsRequest, UpdateItemRequest,
};

const ITEM_NOT_FOUND: &str = "item not found";

/// Service for managing catalog items
///
/// Holds only an immutable repository handle, so a single instance can be
/// shared across concurrent requests without extra locking.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn ItemRepository>,
}

impl CatalogService {
    /// Create a new CatalogService
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    /// List one page of items, newest first
    pub async fn list(&self, page: i32, limit: i32, tags: &[String]) -> CatalogResult<ItemPage> {
        let window = PageRequest::new(page, limit)
            .ok_or_else(|| CatalogError::invalid_argument("page must be a positive integer"))?;

        let query = ItemQuery {
            require_tags: !tags.is_empty(),
            offset: window.offset(),
            limit: i64::from(window.limit),
        };

        let total = self.repository.count(&query).await.map_err(|e| {
            error!(error = %e, "Failed to count items");
            CatalogError::internal("failed to count items")
        })?;

        let items = self.repository.list(&query).await.map_err(|e| {
            error!(error = %e, "Failed to fetch items");
            CatalogError::internal("failed to fetch items")
        })?;

        debug!(
            page = window.page,
            limit = window.limit,
            total,
            returned = items.len(),
            "[CatalogService] Listed items"
        );

        Ok(ItemPage {
            items,
            total,
            page: window.page,
            total_pages: window.total_pages(total),
        })
    }

    /// Get an item by ID
    pub async fn get(&self, id: &str) -> CatalogResult<Item> {
        self.repository
            .get(id)
            .await
            .map_err(|e| {
                error!(item_id = %id, error = %e, "Failed to get item");
                CatalogError::internal("failed to get item")
            })?
            .ok_or_else(|| CatalogError::not_found(ITEM_NOT_FOUND))
    }

    /// Create a new item
    pub async fn create(&self, request: CreateItemRequest) -> CatalogResult<Item> {
        ensure_title(&request.title)?;

        let item = Item::new(request.title)
            .with_description(request.description)
            .with_tags(request.tags)
            .with_image_url(request.image_url);

        self.repository.create(&item).await.map_err(|e| {
            error!(error = %e, "Failed to create item");
            CatalogError::internal("failed to create item")
        })?;

        info!(item_id = %item.id, title = %item.title, "[CatalogService] Created item");

        Ok(item)
    }

    /// Apply a partial update; only supplied fields change
    pub async fn update(&self, request: UpdateItemRequest) -> CatalogResult<Item> {
        let UpdateItemRequest { id, patch } = request;
        if let Some(title) = &patch.title {
            ensure_title(title)?;
        }

        let item = self
            .repository
            .update(&id, &patch, Utc::now())
            .await
            .map_err(|e| {
                error!(item_id = %id, error = %e, "Failed to update item");
                CatalogError::internal("failed to update item")
            })?
            .ok_or_else(|| CatalogError::not_found(ITEM_NOT_FOUND))?;

        info!(item_id = %item.id, "[CatalogService] Updated item");

        Ok(item)
    }

    /// Permanently remove an item
    pub async fn delete(&self, id: &str) -> CatalogResult<()> {
        let deleted = self.repository.delete(id).await.map_err(|e| {
            error!(item_id = %id, error = %e, "Failed to delete item");
            CatalogError::internal("failed to delete item")
        })?;
        if !deleted {
            return Err(CatalogError::not_found(ITEM_NOT_FOUND));
        }

        info!(item_id = %id, "[CatalogService] Deleted item");

        Ok(())
    }
}

fn ensure_title(title: &str) -> CatalogResult<()> {
    if title.is_empty() {
        return Err(CatalogError::invalid_argument("title must not be empty"));
    }
    Ok(())
}

#[async_trait]
impl CatalogRpc for CatalogService {
    async fn list_items(&self, request: ListItemsRequest) -> CatalogResult<ItemPage> {
        self.list(request.page, request.limit, &request.tags).await
    }

    async fn get_item(&self, request: GetItemRequest) -> CatalogResult<Item> {
        self.get(&request.id).await
    }

    async fn create_item(&self, request: CreateItemRequest) -> CatalogResult<Item> {
        self.create(request).await
    }

    async fn update_item(&self, request: UpdateItemRequest) -> CatalogResult<Item> {
        self.update(request).await
    }

    async fn delete_item(&self, request: DeleteItemRequest) -> CatalogResult<DeleteItemResponse> {
        self.delete(&request.id).await?;
        Ok(DeleteItemResponse {
            message: "item deleted".to_string(),
        })
    }
}
