//! Pagination value objects

use serde::{Deserialize, Serialize};

use super::Item;

/// Page size used when the caller supplies none or a non-positive one
pub const DEFAULT_PAGE_LIMIT: i32 = 10;

/// A validated page request: `page >= 1`, `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i32,
    pub limit: i32,
}

impl PageRequest {
    /// Normalize raw inputs. Returns `None` when `page < 1`.
    ///
    /// A non-positive `limit` falls back to [`DEFAULT_PAGE_LIMIT`].
    pub fn new(page: i32, limit: i32) -> Option<Self> {
        if page < 1 {
            return None;
        }
        Some(Self {
            page,
            limit: effective_limit(limit),
        })
    }

    /// Number of rows to skip
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// Total number of pages for `total` rows (ceiling division)
    pub fn total_pages(&self, total: i64) -> i64 {
        total_pages(total, self.limit)
    }
}

/// Replace a non-positive limit with the default
pub fn effective_limit(limit: i32) -> i32 {
    if limit <= 0 {
        DEFAULT_PAGE_LIMIT
    } else {
        limit
    }
}

/// `ceil(total / limit)` for `limit > 0`
pub fn total_pages(total: i64, limit: i32) -> i64 {
    let limit = i64::from(limit.max(1));
    (total + limit - 1) / limit
}

/// One page of items plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total: i64,
    pub page: i32,
    pub total_pages: i64,
}
