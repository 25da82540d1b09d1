//! Catalog error taxonomy
//!
//! Every failure leaving the Catalog Service is classified into exactly one
//! [`ErrorCategory`]. Transports map the category to their own status
//! vocabulary; nothing downstream inspects storage-specific detail.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Closed set of failure kinds, independent of any transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    NotFound,
    InvalidArgument,
    /// Reserved; no current operation produces it.
    Unauthenticated,
    /// Store failures, cancellation, deadlines and anything uncategorized
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::InvalidArgument => "invalid_argument",
            ErrorCategory::Unauthenticated => "unauthenticated",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized catalog failure with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{category}: {message}")]
pub struct CatalogError {
    category: ErrorCategory,
    message: String,
}

impl CatalogError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::NotFound, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InvalidArgument, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unauthenticated, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Internal, message)
    }

    /// The call did not finish within its deadline
    pub fn deadline_exceeded() -> Self {
        Self::internal("deadline exceeded")
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.category == ErrorCategory::NotFound
    }
}
