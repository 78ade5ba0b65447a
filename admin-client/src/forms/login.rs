//! Login form

use shared::FieldErrors;
use shared::models::AdminProfile;

use crate::api::CatalogApi;
use crate::client::HttpClient;
use crate::session::SessionManager;
use crate::{ClientError, ClientResult};

/// Shown for any failed login, whatever the server said
pub const LOGIN_FAILED: &str = "Incorrect email or password. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub errors: FieldErrors,
    /// Form-level message under the fields
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.errors.clear("email");
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.errors.clear("password");
    }

    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        errors.check(self.email.trim().is_empty(), "email", "Email is required");
        errors.check(self.password.trim().is_empty(), "password", "Password is required");
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate, then log in and persist the session
    pub async fn submit<C: HttpClient>(
        &mut self,
        session: &SessionManager,
        api: &CatalogApi<C>,
    ) -> ClientResult<AdminProfile> {
        self.error = None;
        if !self.validate() {
            return Err(ClientError::Form(self.errors.clone()));
        }

        self.submitting = true;
        let result = session.login(api, &self.email, &self.password).await;
        self.submitting = false;

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Login failed");
            self.error = Some(LOGIN_FAILED.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let mut form = LoginForm::new(" ", "");
        assert!(!form.validate());
        assert_eq!(form.errors.get("email"), Some("Email is required"));
        assert_eq!(form.errors.get("password"), Some("Password is required"));

        form.set_email("admin@example.com");
        assert!(form.errors.get("email").is_none());
        assert!(form.errors.get("password").is_some());
    }
}
