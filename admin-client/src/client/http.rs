// admin-client/src/client/http.rs
// HTTP client - network transport

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::Envelope;

use super::{API_PREFIX, ApiRequest, RequestBody, decode_response};
use crate::session::SessionHandle;
use crate::{ClientConfig, ClientResult};

/// HTTP client trait
///
/// One primitive: send a typed request, get back `{status, data}`.
/// The session token is attached on every call when present.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send<T: DeserializeOwned + Send>(&self, request: ApiRequest)
    -> ClientResult<Envelope<T>>;

    /// Session the token is read from
    fn session(&self) -> &SessionHandle;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token_header: String,
    session: SessionHandle,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: SessionHandle) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_header: config.token_header.clone(),
            session,
        })
    }

    /// Base URL without the API prefix
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, request: &ApiRequest) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, request.normalized_path())
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn send<T: DeserializeOwned + Send>(
        &self,
        request: ApiRequest,
    ) -> ClientResult<Envelope<T>> {
        let url = self.url(&request);
        tracing::debug!(method = %request.method, %url, "Sending API request");

        let mut req = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = self.session.token().await {
            req = req.header(self.token_header.as_str(), token);
        }
        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.json(&value),
            RequestBody::Form(form) => req.multipart(form.into_reqwest()?),
        };

        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        decode_response(status, &bytes)
    }

    fn session(&self) -> &SessionHandle {
        &self.session
    }
}
