//! Admin profile

use axum::{
    Json,
    extract::{Path, State},
};
use shared::ApiBody;
use shared::client::ProfileUpdate;
use shared::models::AdminProfile;
use tracing::info;

use super::Authenticated;
use crate::error::{AppError, AppResult};
use crate::state::SharedState;

/// GET /profile/{id}
pub async fn get_one(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiBody<AdminProfile>>> {
    let store = state.read().await;
    if store.admin.id != id {
        return Err(AppError::not_found("Admin not found"));
    }
    Ok(Json(ApiBody::ok(store.admin.clone())))
}

/// PUT /profile
///
/// A password change needs both fields and a matching old password.
pub async fn update(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Json(req): Json<ProfileUpdate>,
) -> AppResult<Json<ApiBody<AdminProfile>>> {
    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::validation("Name and email are required"));
    }

    let mut store = state.write().await;
    let password_change = match (req.old_password.as_deref(), req.new_password.as_deref()) {
        (None, None) => None,
        (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() => {
            if old != store.password {
                return Err(AppError::validation("Old password is incorrect"));
            }
            Some(new.to_string())
        }
        _ => {
            return Err(AppError::validation(
                "Both old and new password are required",
            ));
        }
    };

    let now = store.stamp();
    if let Some(password) = password_change {
        store.password = password;
        info!("Admin password changed");
    }
    store.admin.name = name.to_string();
    store.admin.email = email.to_string();
    if let Some(avatar) = req.avatar {
        store.admin.avatar = Some(avatar);
    }
    store.admin.updated_at = Some(now);

    Ok(Json(ApiBody::ok_with_message(store.admin.clone(), "Profile updated")))
}
