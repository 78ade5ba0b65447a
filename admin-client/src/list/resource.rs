//! Resource seams of the list controller
//!
//! A resource is whatever a list screen talks to. Capabilities are split so
//! a read-only resource (customer queries) simply has no toggle or delete.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{Blog, CatalogItem, CatalogKind, Product, Query};
use shared::{FilterState, ListPage};

use crate::ClientResult;
use crate::api::CatalogApi;
use crate::client::HttpClient;

/// A row of a list screen
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

/// Rows with an active flag
pub trait Activatable: Record {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, is_active: bool);
}

/// Rows with an editable name
pub trait Named: Record {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}

/// Fetch one page of rows
#[async_trait]
pub trait ListResource: Send + Sync + 'static {
    type Item: Record;

    /// Singular, capitalised ("Category")
    fn label(&self) -> &'static str;

    /// Plural, lower case ("categories")
    fn plural(&self) -> &'static str;

    async fn fetch(&self, filter: &FilterState) -> ClientResult<ListPage<Self::Item>>;
}

/// Set a row's active flag
#[async_trait]
pub trait ToggleResource: ListResource<Item: Activatable> {
    async fn set_active(&self, id: &str, is_active: bool) -> ClientResult<()>;
}

/// Delete a row
#[async_trait]
pub trait RemoveResource: ListResource {
    async fn remove(&self, id: &str) -> ClientResult<()>;
}

/// Create and rename rows by name
#[async_trait]
pub trait NamedResource: ListResource<Item: Named> {
    async fn create(&self, name: &str) -> ClientResult<Self::Item>;
    async fn rename(&self, id: &str, name: &str) -> ClientResult<Self::Item>;
}

// =============================================================================
// Record impls
// =============================================================================

impl Record for CatalogItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Activatable for CatalogItem {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}

impl Named for CatalogItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Activatable for Product {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}

impl Record for Blog {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Activatable for Blog {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}

impl Record for Query {
    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

// =============================================================================
// API-backed resources
// =============================================================================

/// Category, material or size list
#[derive(Debug)]
pub struct CatalogResource<C> {
    api: Arc<CatalogApi<C>>,
    kind: CatalogKind,
}

impl<C> CatalogResource<C> {
    pub fn new(api: Arc<CatalogApi<C>>, kind: CatalogKind) -> Self {
        Self { api, kind }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListResource for CatalogResource<C> {
    type Item = CatalogItem;

    fn label(&self) -> &'static str {
        self.kind.label()
    }

    fn plural(&self) -> &'static str {
        self.kind.plural()
    }

    async fn fetch(&self, filter: &FilterState) -> ClientResult<ListPage<CatalogItem>> {
        self.api.list_catalog(self.kind, filter).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ToggleResource for CatalogResource<C> {
    async fn set_active(&self, id: &str, is_active: bool) -> ClientResult<()> {
        self.api
            .update_catalog(self.kind, id, &shared::client::CatalogItemUpdate::active(is_active))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<C: HttpClient + 'static> RemoveResource for CatalogResource<C> {
    async fn remove(&self, id: &str) -> ClientResult<()> {
        self.api.delete_catalog(self.kind, id).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> NamedResource for CatalogResource<C> {
    async fn create(&self, name: &str) -> ClientResult<CatalogItem> {
        self.api.create_catalog(self.kind, name).await
    }

    async fn rename(&self, id: &str, name: &str) -> ClientResult<CatalogItem> {
        self.api
            .update_catalog(self.kind, id, &shared::client::CatalogItemUpdate::rename(name))
            .await
    }
}

/// Product list (paged, no search)
#[derive(Debug)]
pub struct ProductResource<C> {
    api: Arc<CatalogApi<C>>,
}

impl<C> ProductResource<C> {
    pub fn new(api: Arc<CatalogApi<C>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListResource for ProductResource<C> {
    type Item = Product;

    fn label(&self) -> &'static str {
        "Product"
    }

    fn plural(&self) -> &'static str {
        "products"
    }

    async fn fetch(&self, filter: &FilterState) -> ClientResult<ListPage<Product>> {
        self.api.list_products(filter.page, filter.limit).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ToggleResource for ProductResource<C> {
    async fn set_active(&self, id: &str, is_active: bool) -> ClientResult<()> {
        self.api.set_product_active(id, is_active).await?;
        Ok(())
    }
}

#[async_trait]
impl<C: HttpClient + 'static> RemoveResource for ProductResource<C> {
    async fn remove(&self, id: &str) -> ClientResult<()> {
        self.api.delete_product(id).await
    }
}

/// Blog list (unpaged)
#[derive(Debug)]
pub struct BlogResource<C> {
    api: Arc<CatalogApi<C>>,
}

impl<C> BlogResource<C> {
    pub fn new(api: Arc<CatalogApi<C>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListResource for BlogResource<C> {
    type Item = Blog;

    fn label(&self) -> &'static str {
        "Blog"
    }

    fn plural(&self) -> &'static str {
        "blogs"
    }

    async fn fetch(&self, _filter: &FilterState) -> ClientResult<ListPage<Blog>> {
        self.api.list_blogs().await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ToggleResource for BlogResource<C> {
    async fn set_active(&self, id: &str, is_active: bool) -> ClientResult<()> {
        self.api.set_blog_active(id, is_active).await?;
        Ok(())
    }
}

#[async_trait]
impl<C: HttpClient + 'static> RemoveResource for BlogResource<C> {
    async fn remove(&self, id: &str) -> ClientResult<()> {
        self.api.delete_blog(id).await
    }
}

/// Customer queries (read-only, paged)
#[derive(Debug)]
pub struct QueryResource<C> {
    api: Arc<CatalogApi<C>>,
}

impl<C> QueryResource<C> {
    pub fn new(api: Arc<CatalogApi<C>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListResource for QueryResource<C> {
    type Item = Query;

    fn label(&self) -> &'static str {
        "Query"
    }

    fn plural(&self) -> &'static str {
        "queries"
    }

    async fn fetch(&self, filter: &FilterState) -> ClientResult<ListPage<Query>> {
        self.api.list_queries(filter.page, filter.limit).await
    }
}
