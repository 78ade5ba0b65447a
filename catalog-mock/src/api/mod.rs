//! `/api/v1` routes
//!
//! Protected handlers take an [`Authenticated`] extractor, which checks the
//! `token` header against the tokens issued at login.

pub mod auth;
pub mod blogs;
pub mod catalog;
pub mod contact;
pub mod form;
pub mod products;
pub mod profile;

use axum::{
    Router,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post, put},
};
use serde::Deserialize;
use shared::PaginationInfo;

use crate::error::AppError;
use crate::state::SharedState;

/// Header carrying the session token
pub const TOKEN_HEADER: &str = "token";

/// Proof that the request carried a valid token
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

impl FromRequestParts<SharedState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;
        if state.has_token(token).await {
            Ok(Authenticated)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// Query string of list endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// `"true"`/`"false"`; anything else means no filter
    #[serde(default)]
    pub is_active: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn search(&self) -> String {
        self.search.as_deref().unwrap_or_default().trim().to_lowercase()
    }

    pub fn active(&self) -> Option<bool> {
        match self.is_active.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(10).max(1)
    }
}

/// Slice one page out of `items`
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> (Vec<T>, PaginationInfo) {
    let info = PaginationInfo::new(page, limit, items.len() as u64);
    let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    let slice = items.into_iter().skip(offset).take(limit as usize).collect();
    (slice, info)
}

/// Routes relative to `/api/v1`
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/admin/login", post(auth::login))
        .route("/products", get(products::list).post(products::create))
        .route("/products/dashboard/counts", get(products::counts))
        .route(
            "/products/{id}",
            get(products::get_one)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/blogs", get(blogs::list).post(blogs::create))
        .route(
            "/blogs/{id}",
            get(blogs::get_one).put(blogs::update).delete(blogs::delete),
        )
        .route("/contact", get(contact::list).post(contact::submit))
        .route("/profile", put(profile::update))
        .route("/profile/{id}", get(profile::get_one))
        .route("/{kind}", get(catalog::list).post(catalog::create))
        .route("/{kind}/{id}", put(catalog::update).delete(catalog::delete))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let (page, info) = paginate((1..=12).collect::<Vec<_>>(), 3, 5);
        assert_eq!(page, vec![11, 12]);
        assert_eq!(info.total_pages, 3);

        let (page, info) = paginate(Vec::<u8>::new(), 1, 10);
        assert!(page.is_empty());
        assert_eq!(info.total_pages, 1);
    }

    #[test]
    fn test_active_filter_parsing() {
        let q = ListQuery {
            is_active: Some("undefined".into()),
            ..Default::default()
        };
        assert_eq!(q.active(), None);
        let q = ListQuery {
            is_active: Some("true".into()),
            ..Default::default()
        };
        assert_eq!(q.active(), Some(true));
    }
}
