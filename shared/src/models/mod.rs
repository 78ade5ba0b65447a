//! Data models
//!
//! Records as the remote API returns them. Server ids arrive as `_id`
//! (Mongo style) and are also accepted as `id`.

pub mod blog;
pub mod catalog_item;
pub mod dashboard;
pub mod product;
pub mod profile;
pub mod query;

// Re-exports
pub use blog::*;
pub use catalog_item::*;
pub use dashboard::*;
pub use product::*;
pub use profile::*;
pub use query::*;
