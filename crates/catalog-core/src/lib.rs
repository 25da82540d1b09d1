//! # Catalog Core Library
//!
//! Domain logic, entities, and business rules for the item catalog.
//!
//! ## Modules
//!
//! - `config` - Environment variable parsing helpers
//! - `domain` - Core entity (Item) and pagination value objects
//! - `error` - Transport-independent error taxonomy
//! - `repository` - Data access traits
//! - `rpc` - The typed RPC boundary and its wire messages
//! - `service` - Catalog service implementing the RPC boundary

pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod rpc;
pub mod service;

// Re-export commonly used types
pub use domain::*;
pub use error::{CatalogError, CatalogResult, ErrorCategory};
pub use repository::*;
pub use rpc::*;
pub use service::*;
