//! Dropdown option lists for the product editor
//!
//! Active categories, materials and sizes, fetched on demand and cached
//! until refreshed.

use std::collections::HashMap;
use std::sync::Arc;

use shared::FilterState;
use shared::models::{CatalogItem, CatalogKind};
use tokio::sync::RwLock;

use crate::ClientResult;
use crate::api::CatalogApi;
use crate::client::HttpClient;

/// Upper bound on options fetched per list
const OPTION_LIMIT: u32 = 1000;

#[derive(Debug)]
pub struct OptionCache<C> {
    api: Arc<CatalogApi<C>>,
    lists: RwLock<HashMap<CatalogKind, Arc<Vec<CatalogItem>>>>,
}

impl<C: HttpClient> OptionCache<C> {
    pub fn new(api: Arc<CatalogApi<C>>) -> Self {
        Self {
            api,
            lists: RwLock::new(HashMap::new()),
        }
    }

    /// Cached options of one kind, fetched on first use
    pub async fn get(&self, kind: CatalogKind) -> ClientResult<Arc<Vec<CatalogItem>>> {
        if let Some(list) = self.lists.read().await.get(&kind) {
            return Ok(Arc::clone(list));
        }
        self.refresh(kind).await
    }

    /// Fetch one kind again and replace the cached list
    pub async fn refresh(&self, kind: CatalogKind) -> ClientResult<Arc<Vec<CatalogItem>>> {
        let filter = FilterState::default()
            .with_limit(OPTION_LIMIT)
            .with_active(Some(true));
        let page = self.api.list_catalog(kind, &filter).await?;
        let list: Arc<Vec<CatalogItem>> =
            Arc::new(page.items.into_iter().filter(|i| i.is_active).collect());
        tracing::debug!(kind = %kind, count = list.len(), "Option list refreshed");
        self.lists.write().await.insert(kind, Arc::clone(&list));
        Ok(list)
    }

    /// Refresh every kind
    pub async fn refresh_all(&self) -> ClientResult<()> {
        for kind in CatalogKind::ALL {
            self.refresh(kind).await?;
        }
        Ok(())
    }

    /// Option names of one kind
    pub async fn names(&self, kind: CatalogKind) -> ClientResult<Vec<String>> {
        Ok(self.get(kind).await?.iter().map(|i| i.name.clone()).collect())
    }

    /// Forget one kind so the next read fetches it
    pub async fn invalidate(&self, kind: CatalogKind) {
        self.lists.write().await.remove(&kind);
    }
}
