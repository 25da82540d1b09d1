//! Item entity - a single catalog entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item is the only catalog entity.
///
/// `rating` and `review_count` are server-maintained; the create/update
/// surface never sets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, assigned at creation and never reused
    pub id: String,

    /// Display title, never empty for a stored item
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Ordered tag list
    pub tags: Vec<String>,

    /// Image location
    pub image_url: String,

    /// Average rating
    pub rating: f64,

    /// Number of reviews
    pub review_count: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item with a fresh id and zeroed counters
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            image_url: String::new(),
            rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Apply a partial update stamped at `updated_at`.
    ///
    /// Only fields present in the patch are touched. `updated_at` is bumped
    /// even when the patch is empty, and never moves before `created_at`.
    pub fn apply(&mut self, patch: &ItemPatch, updated_at: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        self.updated_at = updated_at.max(self.created_at);
    }
}

/// Partial update for an [`Item`].
///
/// `None` means "not supplied"; `Some(String::new())` is an explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
