//! Client configuration

use std::path::PathBuf;

/// Header the backend reads the session token from
pub const DEFAULT_TOKEN_HEADER: &str = "token";

/// Client configuration for connecting to the catalog API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000"); `/api/v1` is appended per request
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Name of the header carrying the session token
    pub token_header: String,

    /// Where the session (token + admin record) is persisted
    pub session_path: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            session_path: default_session_path(),
        }
    }

    /// Read configuration from the environment
    ///
    /// | variable | default |
    /// |----------|---------|
    /// | `CATALOG_API_URL` | `http://localhost:5000` |
    /// | `CATALOG_API_TIMEOUT` | `30` |
    /// | `CATALOG_TOKEN_HEADER` | `token` |
    /// | `CATALOG_SESSION_PATH` | `.catalog-admin/session.json` |
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("CATALOG_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
        );
        if let Some(timeout) = std::env::var("CATALOG_API_TIMEOUT")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(header) = std::env::var("CATALOG_TOKEN_HEADER") {
            config.token_header = header;
        }
        if let Ok(path) = std::env::var("CATALOG_SESSION_PATH") {
            config.session_path = PathBuf::from(path);
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the token header name
    pub fn with_token_header(mut self, header: impl Into<String>) -> Self {
        self.token_header = header.into();
        self
    }

    /// Set the session file location
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = path.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".catalog-admin").join("session.json")
}
