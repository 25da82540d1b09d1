//! Domain entities and value objects
//!
//! - Entities (Item)
//! - Value objects (ItemPatch, PageRequest, ItemPage)

mod item;
mod page;

pub use item::{Item, ItemPatch};
pub use page::{effective_limit, total_pages, ItemPage, PageRequest, DEFAULT_PAGE_LIMIT};
