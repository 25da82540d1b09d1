//! Gateway integration tests
//!
//! The REST surface driven in-process against an in-process catalog.

mod deadlines;
mod items_api;
mod validation;
