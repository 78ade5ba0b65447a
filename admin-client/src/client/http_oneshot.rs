// admin-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory transport
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use serde::de::DeserializeOwned;
use shared::Envelope;
use tower::ServiceExt;

use super::{API_PREFIX, ApiRequest, HttpClient, RequestBody, decode_response};
use crate::config::DEFAULT_TOKEN_HEADER;
use crate::session::SessionHandle;
use crate::{ClientError, ClientResult};

/// Oneshot HTTP client (in-memory calls)
///
/// Uses the tower `oneshot` pattern to call a `Router` directly. Intended
/// for same-process client/server setups such as tests against the mock
/// backend; there is no network and no timeout.
///
/// # Example
///
/// ```ignore
/// let router = catalog_mock::router(catalog_mock::MockState::default().shared());
/// let client = OneshotHttpClient::new(router, SessionHandle::default());
/// let api = CatalogApi::new(client);
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token_header: String,
    session: SessionHandle,
}

impl OneshotHttpClient {
    /// Create a new oneshot client over an initialised router (state applied)
    pub fn new(router: Router, session: SessionHandle) -> Self {
        Self {
            router,
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            session,
        }
    }

    /// Override the token header name
    pub fn with_token_header(mut self, header: impl Into<String>) -> Self {
        self.token_header = header.into();
        self
    }

    /// Path plus encoded query string
    fn uri(request: &ApiRequest) -> ClientResult<String> {
        let mut url = reqwest::Url::parse("http://in-process")
            .map_err(|e| ClientError::Internal(format!("Invalid base URL: {}", e)))?;
        url.set_path(&format!("{}{}", API_PREFIX, request.normalized_path()));
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        })
    }

    async fn build_request(&self, request: ApiRequest) -> ClientResult<Request<Body>> {
        let uri = Self::uri(&request)?;
        let mut builder = Request::builder().method(request.method).uri(uri);

        if let Some(token) = self.session.token().await {
            builder = builder.header(self.token_header.as_str(), token);
        }

        let result = match request.body {
            RequestBody::Empty => builder.body(Body::empty()),
            RequestBody::Json(value) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&value)?)),
            RequestBody::Form(form) => {
                let boundary = format!("----catalog-admin-{}", uuid::Uuid::new_v4().simple());
                builder
                    .header(
                        http::header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={}", boundary),
                    )
                    .body(Body::from(form.encode(&boundary)))
            }
        };
        result.map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn send<T: DeserializeOwned + Send>(
        &self,
        request: ApiRequest,
    ) -> ClientResult<Envelope<T>> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            "Dispatching in-process request"
        );
        let request = self.build_request(request).await?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        decode_response(status, &body_bytes)
    }

    fn session(&self) -> &SessionHandle {
        &self.session
    }
}
