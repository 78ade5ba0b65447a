//! Editor forms
//!
//! Each form validates locally into [`FieldErrors`](shared::FieldErrors)
//! before anything is sent, then submits through [`CatalogApi`](crate::api::CatalogApi).

pub mod blog;
pub mod login;
pub mod product;
pub mod profile;

pub use blog::{BlockDraft, BlogDraft, BlogEditor};
pub use login::{LOGIN_FAILED, LoginForm};
pub use product::{ProductDraft, ProductEditor};
pub use profile::ProfileEditor;
