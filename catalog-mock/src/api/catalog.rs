//! Category, material and size endpoints
//!
//! The three lists share one set of handlers; the first path segment picks
//! the list. Category and size answer with a bare array, material with a
//! paginated object.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use shared::ApiBody;
use shared::client::{CatalogItemCreate, CatalogItemUpdate};
use shared::models::{CatalogItem, CatalogKind};
use tracing::info;

use super::{Authenticated, ListQuery, paginate};
use crate::error::{AppError, AppResult};
use crate::state::SharedState;

fn parse_kind(kind: &str) -> AppResult<CatalogKind> {
    match kind {
        "category" => Ok(CatalogKind::Category),
        "material" => Ok(CatalogKind::Material),
        "size" => Ok(CatalogKind::Size),
        other => Err(AppError::not_found(format!("Route /{other} not found"))),
    }
}

/// Newest first, then filtered by search text and active flag
fn filtered(items: &[CatalogItem], query: &ListQuery) -> Vec<CatalogItem> {
    let search = query.search();
    let active = query.active();
    let mut rows: Vec<CatalogItem> = items
        .iter()
        .filter(|i| search.is_empty() || i.name.to_lowercase().contains(&search))
        .filter(|i| active.is_none_or(|a| i.is_active == a))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

/// GET /{kind}
pub async fn list(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(kind): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiBody<Value>>> {
    let kind = parse_kind(&kind)?;
    let rows = filtered(state.read().await.catalog(kind), &query);

    let data = match kind {
        CatalogKind::Material => {
            let (page, pagination) = paginate(rows, query.page(), query.limit());
            json!({ "materials": page, "pagination": pagination })
        }
        CatalogKind::Category | CatalogKind::Size => json!(rows),
    };
    Ok(Json(ApiBody::ok(data)))
}

/// POST /{kind}
pub async fn create(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(kind): Path<String>,
    Json(req): Json<CatalogItemCreate>,
) -> AppResult<(StatusCode, Json<ApiBody<CatalogItem>>)> {
    let kind = parse_kind(&kind)?;
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!("{} name is required", kind.label())));
    }

    let mut store = state.write().await;
    let exists = store
        .catalog(kind)
        .iter()
        .any(|i| i.name.eq_ignore_ascii_case(name));
    if exists {
        return Err(AppError::conflict(format!("{} already exists", kind.label())));
    }
    let item = store.add_catalog(kind, name);
    info!(kind = %kind, id = %item.id, name = %item.name, "Catalog item created");

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::ok_with_message(item, format!("{} created", kind.label()))),
    ))
}

/// PUT /{kind}/{id}
pub async fn update(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path((kind, id)): Path<(String, String)>,
    Json(req): Json<CatalogItemUpdate>,
) -> AppResult<Json<ApiBody<CatalogItem>>> {
    let kind = parse_kind(&kind)?;
    let name = req.name.as_deref().map(str::trim);
    if name.is_some_and(str::is_empty) {
        return Err(AppError::validation(format!("{} name is required", kind.label())));
    }

    let mut store = state.write().await;
    if let Some(name) = name {
        let clash = store
            .catalog(kind)
            .iter()
            .any(|i| i.id != id && i.name.eq_ignore_ascii_case(name));
        if clash {
            return Err(AppError::conflict(format!("{} already exists", kind.label())));
        }
    }

    let now = store.stamp();
    let item = store
        .catalog_mut(kind)
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| AppError::not_found(format!("{} not found", kind.label())))?;
    if let Some(name) = name {
        item.name = name.to_string();
    }
    if let Some(is_active) = req.is_active {
        item.is_active = is_active;
    }
    item.updated_at = Some(now);

    Ok(Json(ApiBody::ok_with_message(
        item.clone(),
        format!("{} updated", kind.label()),
    )))
}

/// DELETE /{kind}/{id}
pub async fn delete(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<ApiBody<Value>>> {
    let kind = parse_kind(&kind)?;
    let mut store = state.write().await;
    let items = store.catalog_mut(kind);
    let before = items.len();
    items.retain(|i| i.id != id);
    if items.len() == before {
        return Err(AppError::not_found(format!("{} not found", kind.label())));
    }
    info!(kind = %kind, id = %id, "Catalog item deleted");

    Ok(Json(ApiBody::ok_with_message(
        json!({ "id": id }),
        format!("{} deleted", kind.label()),
    )))
}
