//! Typed endpoint wrappers
//!
//! One method per remote call. Paths are relative to `/api/v1`; the
//! transport adds the prefix and the token header.

use serde::de::IgnoredAny;
use shared::client::{
    CatalogItemCreate, CatalogItemUpdate, LoginRequest, LoginResponse, ProfileUpdate,
};
use shared::models::{AdminProfile, Blog, CatalogItem, CatalogKind, DashboardCounts, Product, Query};
use shared::{FilterState, ListPage, ListPayload};

use crate::ClientResult;
use crate::client::{ApiRequest, FormBody, HttpClient};
use crate::session::SessionHandle;

/// Catalog admin API over any transport
#[derive(Debug, Clone)]
pub struct CatalogApi<C> {
    http: C,
}

impl<C: HttpClient> CatalogApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn session(&self) -> &SessionHandle {
        self.http.session()
    }

    // ========== Auth ==========

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let req = ApiRequest::post("/admin/login").json(request)?;
        Ok(self.http.send(req).await?.into_data())
    }

    // ========== Category / Material / Size ==========

    /// List one catalog kind with search, active filter and paging
    pub async fn list_catalog(
        &self,
        kind: CatalogKind,
        filter: &FilterState,
    ) -> ClientResult<ListPage<CatalogItem>> {
        let req = ApiRequest::get(format!("/{}", kind.path())).with_query(filter.to_query());
        let payload: ListPayload<CatalogItem> = self.http.send(req).await?.into_data();
        Ok(payload.into())
    }

    pub async fn create_catalog(&self, kind: CatalogKind, name: &str) -> ClientResult<CatalogItem> {
        let req = ApiRequest::post(format!("/{}", kind.path())).json(&CatalogItemCreate {
            name: name.to_string(),
        })?;
        Ok(self.http.send(req).await?.into_data())
    }

    pub async fn update_catalog(
        &self,
        kind: CatalogKind,
        id: &str,
        update: &CatalogItemUpdate,
    ) -> ClientResult<CatalogItem> {
        let req = ApiRequest::put(format!("/{}/{}", kind.path(), id)).json(update)?;
        Ok(self.http.send(req).await?.into_data())
    }

    pub async fn delete_catalog(&self, kind: CatalogKind, id: &str) -> ClientResult<()> {
        let req = ApiRequest::delete(format!("/{}/{}", kind.path(), id));
        self.http.send::<IgnoredAny>(req).await?;
        Ok(())
    }

    // ========== Products ==========

    pub async fn list_products(&self, page: u32, limit: u32) -> ClientResult<ListPage<Product>> {
        let req = ApiRequest::get("/products")
            .with_query([("page", page.to_string()), ("limit", limit.to_string())]);
        let payload: ListPayload<Product> = self.http.send(req).await?.into_data();
        Ok(payload.into())
    }

    pub async fn get_product(&self, id: &str) -> ClientResult<Product> {
        let req = ApiRequest::get(format!("/products/{}", id));
        Ok(self.http.send(req).await?.into_data())
    }

    pub async fn create_product(&self, form: FormBody) -> ClientResult<Product> {
        let req = ApiRequest::post("/products").form(form);
        Ok(self.http.send(req).await?.into_data())
    }

    pub async fn update_product(&self, id: &str, form: FormBody) -> ClientResult<Product> {
        let req = ApiRequest::put(format!("/products/{}", id)).form(form);
        Ok(self.http.send(req).await?.into_data())
    }

    /// Flip the active flag; the update endpoint is multipart so the flag
    /// travels as the string `"true"`/`"false"`
    pub async fn set_product_active(&self, id: &str, is_active: bool) -> ClientResult<Product> {
        self.update_product(id, FormBody::new().text("isActive", is_active))
            .await
    }

    pub async fn delete_product(&self, id: &str) -> ClientResult<()> {
        let req = ApiRequest::delete(format!("/products/{}", id));
        self.http.send::<IgnoredAny>(req).await?;
        Ok(())
    }

    pub async fn dashboard_counts(&self) -> ClientResult<DashboardCounts> {
        let req = ApiRequest::get("/products/dashboard/counts");
        Ok(self.http.send(req).await?.into_data())
    }

    // ========== Blogs ==========

    pub async fn list_blogs(&self) -> ClientResult<ListPage<Blog>> {
        let payload: ListPayload<Blog> =
            self.http.send(ApiRequest::get("/blogs")).await?.into_data();
        Ok(payload.into())
    }

    pub async fn get_blog(&self, id: &str) -> ClientResult<Blog> {
        let req = ApiRequest::get(format!("/blogs/{}", id));
        Ok(self.http.send(req).await?.into_data())
    }

    pub async fn create_blog(&self, form: FormBody) -> ClientResult<Blog> {
        let req = ApiRequest::post("/blogs").form(form);
        Ok(self.http.send(req).await?.into_data())
    }

    pub async fn update_blog(&self, id: &str, form: FormBody) -> ClientResult<Blog> {
        let req = ApiRequest::put(format!("/blogs/{}", id)).form(form);
        Ok(self.http.send(req).await?.into_data())
    }

    pub async fn set_blog_active(&self, id: &str, is_active: bool) -> ClientResult<Blog> {
        self.update_blog(id, FormBody::new().text("isActive", is_active))
            .await
    }

    pub async fn delete_blog(&self, id: &str) -> ClientResult<()> {
        let req = ApiRequest::delete(format!("/blogs/{}", id));
        self.http.send::<IgnoredAny>(req).await?;
        Ok(())
    }

    // ========== Customer queries ==========

    pub async fn list_queries(&self, page: u32, limit: u32) -> ClientResult<ListPage<Query>> {
        let req = ApiRequest::get("/contact")
            .with_query([("page", page.to_string()), ("limit", limit.to_string())]);
        let payload: ListPayload<Query> = self.http.send(req).await?.into_data();
        Ok(payload.into())
    }

    // ========== Profile ==========

    pub async fn get_profile(&self, id: &str) -> ClientResult<AdminProfile> {
        let req = ApiRequest::get(format!("/profile/{}", id));
        Ok(self.http.send(req).await?.into_data())
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<AdminProfile> {
        let req = ApiRequest::put("/profile").json(update)?;
        Ok(self.http.send(req).await?.into_data())
    }
}
