//! Request types for list screens
//!
//! [`FilterState`] is the per-screen filter: search text, page, page size,
//! sort field and active-only flag. It is ephemeral and never persisted.

use serde::{Deserialize, Serialize};

/// Default items per page
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Page sizes offered by paginated screens
pub const PAGE_LIMIT_CHOICES: &[u32] = &[5, 10, 20, 50];

/// Filter state of a list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Search keyword (already debounced)
    #[serde(default)]
    pub search: String,

    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Sort field understood by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// `Some(true)` lists active rows only; `None` lists everything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: default_page(),
            limit: default_limit(),
            sort_by: None,
            is_active: None,
        }
    }
}

impl FilterState {
    /// Set the search text, returning to the first page
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page = 1;
        self
    }

    /// Set the page
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size, returning to the first page
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self.page = 1;
        self
    }

    /// Restrict to active (or inactive) rows
    pub fn with_active(mut self, is_active: Option<bool>) -> Self {
        self.is_active = is_active;
        self.page = 1;
        self
    }

    /// Offset of the first row on the current page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }

    /// Query-string pairs in the order the API expects
    ///
    /// `search`, `page` and `limit` are always sent; `isActive` and `sortBy`
    /// only when set.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("search".to_string(), self.search.clone()),
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(is_active) = self.is_active {
            query.push(("isActive".to_string(), is_active.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sortBy".to_string(), sort_by.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_query() {
        let query = FilterState::default().to_query();
        assert_eq!(
            query,
            vec![
                ("search".to_string(), String::new()),
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let filter = FilterState::default().with_page(4).with_search("cup");
        assert_eq!(filter.page, 1);
        let filter = filter.with_page(3).with_limit(20);
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 20);
        let filter = filter.with_page(2).with_active(Some(true));
        assert_eq!(filter.page, 1);
        assert!(filter.to_query().contains(&("isActive".to_string(), "true".to_string())));
    }

    #[test]
    fn test_offset() {
        let filter = FilterState::default().with_limit(5).with_page(3);
        assert_eq!(filter.offset(), 10);
    }
}
