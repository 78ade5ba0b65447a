//! Customer queries (contact form)

use axum::{
    Json,
    extract::{Query as QueryString, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::ApiBody;
use shared::models::Query;
use tracing::info;

use super::{Authenticated, ListQuery, paginate};
use crate::error::{AppError, AppResult};
use crate::state::{SharedState, new_id};

/// Public contact form body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

/// GET /contact, newest first
pub async fn list(
    _auth: Authenticated,
    State(state): State<SharedState>,
    QueryString(query): QueryString<ListQuery>,
) -> AppResult<Json<ApiBody<Value>>> {
    let mut rows = state.read().await.queries.clone();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let (queries, pagination) = paginate(rows, query.page(), query.limit());
    Ok(Json(ApiBody::ok(json!({
        "queries": queries,
        "pagination": pagination,
    }))))
}

/// POST /contact, no token needed
pub async fn submit(
    State(state): State<SharedState>,
    Json(req): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ApiBody<Query>>)> {
    if req.first_name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.message.trim().is_empty()
    {
        return Err(AppError::validation("Name, email and message are required"));
    }

    let mut store = state.write().await;
    let now = store.stamp();
    let query = Query {
        id: Some(new_id()),
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: req.phone.trim().to_string(),
        message: req.message.trim().to_string(),
        created_at: Some(now),
    };
    store.queries.push(query.clone());
    info!(email = %query.email, "Contact query received");

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::ok_with_message(query, "Message sent")),
    ))
}
