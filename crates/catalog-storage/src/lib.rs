//! Catalog Storage Layer
//!
//! The persisted item store: SQLite with numbered schema migrations.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  CatalogService                      │
//! ├──────────────────────────────────────────────────────┤
//! │             ItemRepository (trait)                   │
//! ├──────────────────────────────────────────────────────┤
//! │              SqliteItemRepository                    │
//! ├──────────────────────────────────────────────────────┤
//! │                   Database                           │
//! │           (SQLite + schema_migrations)               │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use catalog_storage::{Database, SqliteItemRepository};
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! let db = Arc::new(Mutex::new(Database::open(&path)?));
//! let item_repo = SqliteItemRepository::new(db.clone());
//! ```

mod database;
mod repositories;

pub use database::{Database, IN_MEMORY};
pub use repositories::*;

/// Default database file name.
pub const DATABASE_FILE: &str = "catalog.db";

/// Get the default database path for the current platform.
pub fn default_database_path() -> Option<std::path::PathBuf> {
    dirs::data_local_dir().map(|p| p.join("catalog").join(DATABASE_FILE))
}
