//! Mock server configuration

/// Settings read from the environment
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// `MOCK_PORT`, default 5000
    pub port: u16,
    /// `MOCK_ADMIN_EMAIL`, default `admin@example.com`
    pub admin_email: String,
    /// `MOCK_ADMIN_PASSWORD`, default `admin123`
    pub admin_password: String,
}

impl MockConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("MOCK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            admin_email: std::env::var("MOCK_ADMIN_EMAIL")
                .map(|e| e.trim().to_lowercase())
                .unwrap_or(defaults.admin_email),
            admin_password: std::env::var("MOCK_ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}
