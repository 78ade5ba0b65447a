//! Catalog Admin Client - headless admin for the catalog API
//!
//! Typed calls to the `/api/v1` surface plus the state behind every admin
//! screen: session, route guard, list controllers with optimistic updates,
//! pagination, editors and image staging.

pub mod api;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod forms;
pub mod list;
pub mod options;
pub mod pagination;
pub mod routes;
pub mod session;
pub mod upload;
pub mod widgets;

pub use api::CatalogApi;
pub use client::{ApiRequest, FormBody, HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use list::{FetchOutcome, ListController, ListError};
pub use session::{Session, SessionHandle, SessionManager};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, ProfileUpdate};
pub use shared::{Envelope, FilterState, ListPage};

/// Network client with its session restored from disk
pub async fn connect(
    config: &ClientConfig,
) -> ClientResult<(CatalogApi<NetworkHttpClient>, SessionManager)> {
    let session = SessionManager::from_config(config, SessionHandle::default());
    session.restore().await;
    let http = NetworkHttpClient::new(config, session.handle().clone())?;
    Ok((CatalogApi::new(http), session))
}
