//! Domain services
//!
//! Business logic that operates on domain entities via repositories.

mod catalog_service;

pub use catalog_service::*;
