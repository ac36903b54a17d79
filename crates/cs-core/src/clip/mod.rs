//! Clipboard item model and list operations.
mod item;
mod normalize;
pub mod query;

pub use item::{ClipItem, ClipType};
pub use normalize::collapse_duplicate_content;
pub use query::SortOrder;
