//! Admin login

use axum::{Json, extract::State};
use shared::ApiBody;
use shared::client::{LoginRequest, LoginResponse};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::SharedState;

/// POST /admin/login
pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiBody<LoginResponse>>> {
    let email = req.email.trim().to_lowercase();
    let admin = {
        let mut store = state.write().await;
        if store.admin.email.to_lowercase() != email || store.password != req.password {
            return Err(AppError::InvalidCredentials(
                "Invalid email or password".to_string(),
            ));
        }
        let now = store.stamp();
        store.admin.last_login = Some(now);
        store.admin.clone()
    };

    let token = state.issue_token().await;
    info!(email = %admin.email, "Admin logged in");
    Ok(Json(ApiBody::ok_with_message(
        LoginResponse { token, admin },
        "Login successful",
    )))
}
