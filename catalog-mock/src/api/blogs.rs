//! Blog endpoints

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use shared::ApiBody;
use shared::models::Blog;
use tracing::info;

use super::Authenticated;
use super::form::ParsedForm;
use crate::error::{AppError, AppResult};
use crate::state::{SharedState, new_id};

fn not_found() -> AppError {
    AppError::not_found("Blog not found")
}

/// GET /blogs, newest first and unpaginated
pub async fn list(
    _auth: Authenticated,
    State(state): State<SharedState>,
) -> AppResult<Json<ApiBody<Vec<Blog>>>> {
    let mut rows = state.read().await.blogs.clone();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(ApiBody::ok(rows)))
}

/// GET /blogs/{id}
pub async fn get_one(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiBody<Blog>>> {
    let store = state.read().await;
    let blog = store.blogs.iter().find(|b| b.id == id).ok_or_else(not_found)?;
    Ok(Json(ApiBody::ok(blog.clone())))
}

/// POST /blogs
pub async fn create(
    _auth: Authenticated,
    State(state): State<SharedState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiBody<Blog>>)> {
    let form = ParsedForm::read(multipart).await?;
    let title = form.text("title").unwrap_or_default().trim().to_string();
    if title.is_empty() {
        return Err(AppError::validation("Title is required"));
    }

    let mut store = state.write().await;
    let now = store.stamp();
    let blog = Blog {
        id: new_id(),
        title,
        description: form.text("description").unwrap_or_default().to_string(),
        images: form.files("images").into_iter().map(|f| f.url()).collect(),
        content: form.content_blocks().unwrap_or_default(),
        is_active: form.text("isActive").is_none_or(|v| v == "true"),
        created_at: Some(now),
        updated_at: Some(now),
    };
    store.blogs.push(blog.clone());
    info!(id = %blog.id, title = %blog.title, "Blog created");

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::ok_with_message(blog, "Blog created")),
    ))
}

/// PUT /blogs/{id}
pub async fn update(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiBody<Blog>>> {
    let form = ParsedForm::read(multipart).await?;
    let blocks = form.content_blocks();

    let mut store = state.write().await;
    let now = store.stamp();
    let blog = store.blogs.iter_mut().find(|b| b.id == id).ok_or_else(not_found)?;

    if let Some(title) = form.text("title").map(str::trim).filter(|t| !t.is_empty()) {
        blog.title = title.to_string();
    }
    if let Some(description) = form.text("description") {
        blog.description = description.to_string();
    }
    if let Some(active) = form.text("isActive") {
        blog.is_active = active == "true";
    }
    if form.has("existingImages[]") || form.has("images") {
        let mut images: Vec<String> = form
            .texts("existingImages[]")
            .into_iter()
            .map(str::to_string)
            .collect();
        images.extend(form.files("images").into_iter().map(|f| f.url()));
        blog.images = images;
    }
    if let Some(blocks) = blocks {
        blog.content = blocks;
    }
    blog.updated_at = Some(now);

    Ok(Json(ApiBody::ok_with_message(blog.clone(), "Blog updated")))
}

/// DELETE /blogs/{id}
pub async fn delete(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiBody<Value>>> {
    let mut store = state.write().await;
    let before = store.blogs.len();
    store.blogs.retain(|b| b.id != id);
    if store.blogs.len() == before {
        return Err(not_found());
    }
    info!(id = %id, "Blog deleted");
    Ok(Json(ApiBody::ok_with_message(json!({ "id": id }), "Blog deleted")))
}
