//! API Response types
//!
//! Every payload from the remote API is wrapped in a JSON body:
//! ```json
//! {
//!     "message": "Category created",
//!     "data": { ... }
//! }
//! ```
//! The HTTP status travels alongside it; together they form an [`Envelope`].

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Raw response body as sent by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiBody<T> {
    /// Human-readable message (present on errors, sometimes on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiBody<T> {
    /// Create a successful body
    pub fn ok(data: T) -> Self {
        Self {
            message: None,
            data: Some(data),
        }
    }

    /// Create a successful body with a message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Create an error body
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Response envelope handed back to callers: `{status, data}`
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub status: StatusCode,
    pub data: T,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status,
            data,
            message: None,
        }
    }

    /// Map the payload, keeping status and message
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            status: self.status,
            data: f(self.data),
            message: self.message,
        }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

/// Pagination metadata as returned by paginated list endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Total number of pages
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    /// Current page (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Total number of items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

fn default_total_pages() -> u32 {
    1
}

impl PaginationInfo {
    /// Build pagination metadata for a page of `limit` items out of `total`
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            1
        } else {
            (total.div_ceil(limit as u64) as u32).max(1)
        };
        Self {
            total_pages,
            page: Some(page),
            limit: Some(limit),
            total: Some(total),
        }
    }
}

/// Paginated list object: `{ <plural>: [...], pagination: {...} }`
#[derive(Debug, Deserialize)]
pub struct PagedPayload<T> {
    #[serde(
        alias = "categories",
        alias = "materials",
        alias = "sizes",
        alias = "products",
        alias = "blogs",
        alias = "queries",
        alias = "data"
    )]
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Option<PaginationInfo>,
}

/// List payload as it appears under `data`
///
/// Some endpoints answer with a bare array, others with a paginated object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Flat(Vec<T>),
    Paged(PagedPayload<T>),
}

/// Normalised list result
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> ListPage<T> {
    /// A single page holding every item
    pub fn single(items: Vec<T>) -> Self {
        Self {
            items,
            total_pages: 1,
        }
    }
}

impl<T> From<ListPayload<T>> for ListPage<T> {
    fn from(payload: ListPayload<T>) -> Self {
        match payload {
            ListPayload::Flat(items) => ListPage::single(items),
            ListPayload::Paged(paged) => ListPage {
                items: paged.items,
                total_pages: paged
                    .pagination
                    .map(|p| p.total_pages.max(1))
                    .unwrap_or(1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_list_is_single_page() {
        let payload: ListPayload<String> = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        let page = ListPage::from(payload);
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_paged_list_uses_plural_key() {
        let payload: ListPayload<String> = serde_json::from_str(
            r#"{"materials": ["wood"], "pagination": {"totalPages": 4}}"#,
        )
        .unwrap();
        let page = ListPage::from(payload);
        assert_eq!(page.items, vec!["wood"]);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_paged_list_without_pagination() {
        let payload: ListPayload<String> =
            serde_json::from_str(r#"{"queries": []}"#).unwrap();
        let page = ListPage::from(payload);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_pagination_info_rounds_up() {
        let info = PaginationInfo::new(1, 10, 21);
        assert_eq!(info.total_pages, 3);
        assert_eq!(PaginationInfo::new(1, 10, 0).total_pages, 1);
    }

    #[test]
    fn test_error_body_carries_message() {
        let body: ApiBody<serde_json::Value> =
            serde_json::from_str(r#"{"message": "Category already exists"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Category already exists"));
        assert!(body.data.is_none());
    }
}
