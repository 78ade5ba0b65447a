//! Shared types for the catalog admin workspace
//!
//! Wire-level types used by both the admin client and the mock backend:
//! response envelopes, entity models, request DTOs and list filters.

pub mod client;
pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::FieldErrors;
pub use request::FilterState;
pub use response::{ApiBody, Envelope, ListPage, ListPayload, PaginationInfo};
