//! SQLite implementation of ItemRepository.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use catalog_core::{Item, ItemPatch, ItemQuery, ItemRepository};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tokio::sync::Mutex;

use crate::Database;

const ITEM_COLUMNS: &str =
    "id, title, description, tags, image_url, rating, review_count, created_at, updated_at";

/// Rows with at least one tag
const HAS_TAGS: &str = "json_array_length(tags) > 0";

/// SQLite-backed implementation of ItemRepository.
pub struct SqliteItemRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteItemRepository {
    /// Create a new SQLite item repository.
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Fixed-width RFC3339 so that text order matches time order.
    fn format_datetime(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    fn parse_datetime(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
        let tags_json: String = row.get(3)?;
        let tags: Vec<String> = serde_json::from_str(&tags_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(Item {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            tags,
            image_url: row.get(4)?,
            rating: row.get(5)?,
            review_count: row.get(6)?,
            created_at: Self::parse_datetime(7, &row.get::<_, String>(7)?)?,
            updated_at: Self::parse_datetime(8, &row.get::<_, String>(8)?)?,
        })
    }

    fn where_clause(query: &ItemQuery) -> String {
        if query.require_tags {
            format!("WHERE {}", HAS_TAGS)
        } else {
            String::new()
        }
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn count(&self, query: &ItemQuery) -> Result<i64> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let sql = format!("SELECT COUNT(*) FROM items {}", Self::where_clause(query));
        let total = conn.query_row(&sql, [], |row| row.get(0))?;

        Ok(total)
    }

    async fn list(&self, query: &ItemQuery) -> Result<Vec<Item>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let sql = format!(
            "SELECT {} FROM items {} ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
            ITEM_COLUMNS,
            Self::where_clause(query)
        );
        let mut stmt = conn.prepare(&sql)?;

        let items = stmt
            .query_map(params![query.limit, query.offset], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "[ItemRepository::list] Returning {} items (offset {}, limit {})",
            items.len(),
            query.offset,
            query.limit
        );

        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let sql = format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS);
        let item = conn
            .query_row(&sql, params![id], Self::row_to_item)
            .optional()?;

        Ok(item)
    }

    async fn create(&self, item: &Item) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT INTO items (id, title, description, tags, image_url, rating, review_count, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id,
                item.title,
                item.description,
                serde_json::to_string(&item.tags)?,
                item.image_url,
                item.rating,
                item.review_count,
                Self::format_datetime(&item.created_at),
                Self::format_datetime(&item.updated_at),
            ],
        )?;

        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Item>> {
        let tags = patch.tags.as_ref().map(serde_json::to_string).transpose()?;

        let db = self.db.lock().await;
        let conn = db.connection();

        // NULL binds leave the column as stored; rating, review_count and
        // created_at are not writable here
        let rows_affected = conn.execute(
            "UPDATE items
             SET title = COALESCE(?2, title),
                 description = COALESCE(?3, description),
                 tags = COALESCE(?4, tags),
                 image_url = COALESCE(?5, image_url),
                 updated_at = MAX(?6, created_at)
             WHERE id = ?1",
            params![
                id,
                patch.title,
                patch.description,
                tags,
                patch.image_url,
                Self::format_datetime(&updated_at),
            ],
        )?;
        if rows_affected == 0 {
            return Ok(None);
        }

        let sql = format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS);
        let item = conn
            .query_row(&sql, params![id], Self::row_to_item)
            .optional()?;

        Ok(item)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let rows_affected = conn.execute("DELETE FROM items WHERE id = ?", params![id])?;

        Ok(rows_affected > 0)
    }
}
