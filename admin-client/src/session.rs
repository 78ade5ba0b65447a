//! Admin session lifecycle
//!
//! The session is created at login, persisted to a small JSON file (token
//! plus admin record), restored at start-up and removed at logout. Every
//! transport reads the token through a shared [`SessionHandle`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::client::{LoginRequest, LoginResponse};
use shared::models::AdminProfile;
use tokio::sync::RwLock;

use crate::api::CatalogApi;
use crate::client::HttpClient;
use crate::{ClientConfig, ClientResult};

/// Current authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub is_authenticated: bool,
    pub token: Option<String>,
    pub user: Option<AdminProfile>,
}

impl Session {
    pub fn authenticated(token: impl Into<String>, admin: AdminProfile) -> Self {
        Self {
            is_authenticated: true,
            token: Some(token.into()),
            user: Some(admin),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Id of the logged-in admin
    pub fn admin_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

/// On-disk form of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub admin: AdminProfile,
}

/// Session file storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, session: &StoredSession) -> ClientResult<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the stored session; a missing or unreadable file yields `None`
    pub fn load(&self) -> Option<StoredSession> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to parse stored session"
                );
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Shared, cloneable view of the current session
#[derive(Debug, Clone, Default)]
pub struct SessionHandle(Arc<RwLock<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(RwLock::new(session)))
    }

    /// Token to send, if any
    pub async fn token(&self) -> Option<String> {
        self.0.read().await.token.clone()
    }

    pub async fn snapshot(&self) -> Session {
        self.0.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.0.read().await.is_authenticated
    }

    pub async fn admin(&self) -> Option<AdminProfile> {
        self.0.read().await.user.clone()
    }

    pub async fn set(&self, session: Session) {
        *self.0.write().await = session;
    }

    pub async fn clear(&self) {
        *self.0.write().await = Session::anonymous();
    }
}

/// Owns the session file and the shared handle
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: SessionStore,
    handle: SessionHandle,
}

impl SessionManager {
    pub fn new(store: SessionStore, handle: SessionHandle) -> Self {
        Self { store, handle }
    }

    pub fn from_config(config: &ClientConfig, handle: SessionHandle) -> Self {
        Self::new(SessionStore::new(config.session_path.clone()), handle)
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Rebuild the session from the stored file
    pub async fn restore(&self) -> Session {
        let session = match self.store.load() {
            Some(stored) if !stored.token.is_empty() => {
                tracing::debug!(admin = %stored.admin.email, "Restored stored session");
                Session::authenticated(stored.token, stored.admin)
            }
            _ => Session::anonymous(),
        };
        self.handle.set(session.clone()).await;
        session
    }

    /// Persist a successful login and mark the session authenticated
    pub async fn establish(&self, response: LoginResponse) -> ClientResult<AdminProfile> {
        self.store.save(&StoredSession {
            token: response.token.clone(),
            admin: response.admin.clone(),
        })?;
        self.handle
            .set(Session::authenticated(response.token, response.admin.clone()))
            .await;
        tracing::info!(admin = %response.admin.email, "Admin logged in");
        Ok(response.admin)
    }

    /// Exchange credentials for a token.
    ///
    /// The email is trimmed and lower-cased, the password trimmed. Field
    /// validation is the caller's job (see `forms::login`).
    pub async fn login<C: HttpClient>(
        &self,
        api: &CatalogApi<C>,
        email: &str,
        password: &str,
    ) -> ClientResult<AdminProfile> {
        let request = LoginRequest {
            email: email.trim().to_lowercase(),
            password: password.trim().to_string(),
        };
        let response = api.login(&request).await?;
        self.establish(response).await
    }

    /// Forget the session both in memory and on disk
    pub async fn logout(&self) -> ClientResult<()> {
        self.handle.clear().await;
        self.store.delete()?;
        tracing::info!("Admin logged out");
        Ok(())
    }

    /// Replace the stored admin record after a profile update
    pub async fn update_admin(&self, admin: AdminProfile) -> ClientResult<()> {
        let Some(token) = self.handle.token().await else {
            return Err(crate::ClientError::NotLoggedIn);
        };
        self.store.save(&StoredSession {
            token: token.clone(),
            admin: admin.clone(),
        })?;
        self.handle.set(Session::authenticated(token, admin)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminProfile {
        AdminProfile {
            id: "a1".into(),
            name: "Admin".into(),
            email: "admin@example.com".into(),
            phone: None,
            avatar: None,
            created_at: None,
            updated_at: None,
            last_login: None,
        }
    }

    #[tokio::test]
    async fn test_establish_restore_logout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let manager = SessionManager::new(SessionStore::new(&path), SessionHandle::default());

        manager
            .establish(LoginResponse {
                token: "tok".into(),
                admin: admin(),
            })
            .await
            .unwrap();
        assert!(path.exists());
        assert_eq!(manager.handle().token().await.as_deref(), Some("tok"));

        // A fresh manager picks the stored session up
        let other = SessionManager::new(SessionStore::new(&path), SessionHandle::default());
        let restored = other.restore().await;
        assert!(restored.is_authenticated);
        assert_eq!(restored.admin_id(), Some("a1"));

        other.logout().await.unwrap();
        assert!(!path.exists());
        assert!(!other.handle().is_authenticated().await);
        assert!(other.handle().token().await.is_none());
    }

    #[tokio::test]
    async fn test_restore_without_file_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SessionManager::new(
            SessionStore::new(dir.path().join("missing.json")),
            SessionHandle::default(),
        );
        assert_eq!(manager.restore().await, Session::anonymous());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let manager = SessionManager::new(SessionStore::new(&path), SessionHandle::default());
        assert!(!manager.restore().await.is_authenticated);
    }

    #[tokio::test]
    async fn test_update_admin_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SessionManager::new(
            SessionStore::new(dir.path().join("s.json")),
            SessionHandle::default(),
        );
        let err = manager.update_admin(admin()).await.unwrap_err();
        assert!(matches!(err, crate::ClientError::NotLoggedIn));
    }
}
