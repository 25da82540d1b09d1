//! Repository traits for data access
//!
//! These traits define the interface for item storage without specifying
//! the implementation (SQLite, in-memory, etc.)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Item, ItemPatch};

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// Filter and window for listing items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Only items with a non-empty tag list
    pub require_tags: bool,
    pub offset: i64,
    pub limit: i64,
}

/// Item repository trait
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Count items matching the query filter (offset/limit ignored)
    async fn count(&self, query: &ItemQuery) -> RepoResult<i64>;

    /// Get a window of matching items, newest `created_at` first
    async fn list(&self, query: &ItemQuery) -> RepoResult<Vec<Item>>;

    /// Get an item by ID
    async fn get(&self, id: &str) -> RepoResult<Option<Item>>;

    /// Persist a new item
    async fn create(&self, item: &Item) -> RepoResult<()>;

    /// Write only the fields supplied in `patch` and stamp `updated_at`.
    ///
    /// The write and the read-back of the stored row happen as one step, so
    /// concurrent patches on different fields never clobber each other.
    /// Returns `None` when the id does not exist.
    async fn update(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<Item>>;

    /// Remove an item. Returns false when the id does not exist.
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}
