//! Product endpoints
//!
//! Create and update are multipart. Every scalar arrives as text; images
//! arrive as `images` file parts, and on update the kept URLs arrive as
//! `existingImages`.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use shared::ApiBody;
use shared::models::{CatalogKind, DashboardCounts, Product};
use tracing::info;

use super::form::ParsedForm;
use super::{Authenticated, ListQuery, paginate};
use crate::error::{AppError, AppResult};
use crate::state::{SharedState, new_id};

fn not_found() -> AppError {
    AppError::not_found("Product not found")
}

fn parse_number<T: std::str::FromStr>(
    form: &ParsedForm,
    field: &str,
    label: &str,
) -> AppResult<Option<T>> {
    match form.text(field).map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::validation(format!("{label} must be a number"))),
    }
}

/// GET /products
pub async fn list(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiBody<Value>>> {
    let search = query.search();
    let mut rows: Vec<Product> = state
        .read()
        .await
        .products
        .iter()
        .filter(|p| search.is_empty() || p.name.to_lowercase().contains(&search))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let (products, pagination) = paginate(rows, query.page(), query.limit());
    Ok(Json(ApiBody::ok(json!({
        "products": products,
        "pagination": pagination,
    }))))
}

/// GET /products/{id}
pub async fn get_one(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiBody<Product>>> {
    let store = state.read().await;
    let product = store.products.iter().find(|p| p.id == id).ok_or_else(not_found)?;
    Ok(Json(ApiBody::ok(product.clone())))
}

/// POST /products
pub async fn create(
    _auth: Authenticated,
    State(state): State<SharedState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiBody<Product>>)> {
    let form = ParsedForm::read(multipart).await?;

    let name = form.text("name").unwrap_or_default().trim().to_string();
    let category = form.text("category").unwrap_or_default().trim().to_string();
    let material = form.text("material").unwrap_or_default().trim().to_string();
    if name.is_empty() || category.is_empty() || material.is_empty() {
        return Err(AppError::validation("Name, category and material are required"));
    }
    let quantity: u32 = parse_number(&form, "quantityPerPack", "Quantity")?.unwrap_or_default();
    let price: f64 = parse_number(&form, "pricePerPack", "Price")?.unwrap_or_default();
    if quantity == 0 || price <= 0.0 {
        return Err(AppError::validation("Price and quantity must be greater than 0"));
    }
    let images: Vec<String> = form.files("images").into_iter().map(|f| f.url()).collect();
    if images.is_empty() {
        return Err(AppError::validation("At least one image is required"));
    }

    let mut store = state.write().await;
    let now = store.stamp();
    let product = Product {
        id: new_id(),
        name,
        category,
        material,
        size: form.text("size").filter(|s| !s.is_empty()).map(str::to_string),
        quantity_per_pack: quantity,
        price_per_pack: price,
        description: form.text("description").map(str::to_string),
        is_active: form.text("isActive").is_none_or(|v| v == "true"),
        images,
        created_at: Some(now),
        updated_at: Some(now),
    };
    store.products.push(product.clone());
    info!(id = %product.id, name = %product.name, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ApiBody::ok_with_message(product, "Product created")),
    ))
}

/// PUT /products/{id}
///
/// Only the fields present in the body change, so `isActive` alone flips
/// the flag.
pub async fn update(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiBody<Product>>> {
    let form = ParsedForm::read(multipart).await?;
    let quantity: Option<u32> = parse_number(&form, "quantityPerPack", "Quantity")?;
    let price: Option<f64> = parse_number(&form, "pricePerPack", "Price")?;

    let mut store = state.write().await;
    let now = store.stamp();
    let product = store
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(not_found)?;

    for (field, target) in [
        ("name", &mut product.name),
        ("category", &mut product.category),
        ("material", &mut product.material),
    ] {
        if let Some(value) = form.text(field).map(str::trim).filter(|v| !v.is_empty()) {
            *target = value.to_string();
        }
    }
    if let Some(size) = form.text("size") {
        product.size = Some(size.to_string()).filter(|s| !s.is_empty());
    }
    if let Some(description) = form.text("description") {
        product.description = Some(description.to_string());
    }
    if let Some(quantity) = quantity {
        product.quantity_per_pack = quantity;
    }
    if let Some(price) = price {
        product.price_per_pack = price;
    }
    if let Some(active) = form.text("isActive") {
        product.is_active = active == "true";
    }
    if form.has("existingImages") || form.has("images") {
        let mut images: Vec<String> = form
            .texts("existingImages")
            .into_iter()
            .map(str::to_string)
            .collect();
        images.extend(form.files("images").into_iter().map(|f| f.url()));
        product.images = images;
    }
    product.updated_at = Some(now);

    Ok(Json(ApiBody::ok_with_message(product.clone(), "Product updated")))
}

/// DELETE /products/{id}
pub async fn delete(
    _auth: Authenticated,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiBody<Value>>> {
    let mut store = state.write().await;
    let before = store.products.len();
    store.products.retain(|p| p.id != id);
    if store.products.len() == before {
        return Err(not_found());
    }
    info!(id = %id, "Product deleted");
    Ok(Json(ApiBody::ok_with_message(json!({ "id": id }), "Product deleted")))
}

/// GET /products/dashboard/counts
pub async fn counts(
    _auth: Authenticated,
    State(state): State<SharedState>,
) -> AppResult<Json<ApiBody<DashboardCounts>>> {
    let store = state.read().await;
    Ok(Json(ApiBody::ok(DashboardCounts {
        products: store.products.len() as u64,
        category: store.catalog(CatalogKind::Category).len() as u64,
        material: store.catalog(CatalogKind::Material).len() as u64,
    })))
}
