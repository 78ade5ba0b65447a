//! Admin profile editor

use std::sync::Arc;

use shared::FieldErrors;
use shared::client::ProfileUpdate;
use shared::models::AdminProfile;

use crate::api::CatalogApi;
use crate::client::HttpClient;
use crate::session::SessionManager;
use crate::{ClientError, ClientResult};

/// View, edit and change password of the logged-in admin
#[derive(Debug)]
pub struct ProfileEditor<C> {
    api: Arc<CatalogApi<C>>,
    session: SessionManager,
    pub profile: Option<AdminProfile>,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub old_password: String,
    pub new_password: String,
    pub errors: FieldErrors,
    pub password_error: Option<String>,
    pub loading: bool,
}

impl<C: HttpClient> ProfileEditor<C> {
    pub fn new(api: Arc<CatalogApi<C>>, session: SessionManager) -> Self {
        Self {
            api,
            session,
            profile: None,
            name: String::new(),
            email: String::new(),
            avatar: String::new(),
            old_password: String::new(),
            new_password: String::new(),
            errors: FieldErrors::new(),
            password_error: None,
            loading: false,
        }
    }

    fn fill(&mut self, profile: AdminProfile) {
        self.name = profile.name.clone();
        self.email = profile.email.clone();
        self.avatar = profile.avatar.clone().unwrap_or_default();
        self.profile = Some(profile);
    }

    /// Fetch the profile of the logged-in admin
    pub async fn load(&mut self) -> ClientResult<&AdminProfile> {
        let id = self
            .session
            .handle()
            .admin()
            .await
            .map(|a| a.id)
            .ok_or(ClientError::NotLoggedIn)?;

        self.loading = true;
        let result = self.api.get_profile(&id).await;
        self.loading = false;

        let profile = result.inspect_err(|e| tracing::warn!(error = %e, "Failed to load profile"))?;
        self.fill(profile);
        self.profile.as_ref().ok_or(ClientError::NotLoggedIn)
    }

    fn update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            avatar: Some(self.avatar.clone()).filter(|a| !a.is_empty()),
            old_password: None,
            new_password: None,
        }
    }

    async fn send(&mut self, update: ProfileUpdate) -> ClientResult<AdminProfile> {
        self.loading = true;
        let result = self.api.update_profile(&update).await;
        self.loading = false;
        let profile = result?;
        self.session.update_admin(profile.clone()).await?;
        self.fill(profile.clone());
        Ok(profile)
    }

    /// Save name and email (both required)
    pub async fn save(&mut self) -> ClientResult<AdminProfile> {
        let mut errors = FieldErrors::new();
        errors.check(self.name.trim().is_empty(), "name", "Name is required");
        errors.check(self.email.trim().is_empty(), "email", "Email is required");
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors.into());
        }
        self.errors = FieldErrors::new();

        let update = self.update();
        self.send(update)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to update profile"))
    }

    /// Change the password; both old and new are required
    pub async fn change_password(&mut self) -> ClientResult<AdminProfile> {
        self.password_error = None;
        let mut errors = FieldErrors::new();
        errors.check(self.old_password.is_empty(), "oldPassword", "Required");
        errors.check(self.new_password.is_empty(), "newPassword", "Required");
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors.into());
        }
        self.errors = FieldErrors::new();

        let mut update = self.update();
        update.old_password = Some(self.old_password.clone());
        update.new_password = Some(self.new_password.clone());

        match self.send(update).await {
            Ok(profile) => {
                self.old_password.clear();
                self.new_password.clear();
                Ok(profile)
            }
            Err(e) => {
                self.password_error = Some(e.user_message("Failed to change password"));
                Err(e)
            }
        }
    }
}
