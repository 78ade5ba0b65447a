//! List screens driven end to end against the mock backend

use std::sync::Arc;

use admin_client::list::{CatalogResource, ProductResource, QueryResource};
use admin_client::{
    CatalogApi, ClientError, FetchOutcome, ListController, ListError, OneshotHttpClient,
    SessionHandle, SessionManager, session::SessionStore,
};
use catalog_mock::{MockConfig, MockState};
use shared::models::CatalogKind;

struct Harness {
    api: Arc<CatalogApi<OneshotHttpClient>>,
    _dir: tempfile::TempDir,
}

async fn logged_in(state: MockState) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let handle = SessionHandle::default();
    let http = OneshotHttpClient::new(catalog_mock::router(state.shared()), handle.clone());
    let api = Arc::new(CatalogApi::new(http));
    let manager = SessionManager::new(SessionStore::new(dir.path().join("session.json")), handle);
    manager
        .login(&*api, "admin@example.com", "admin123")
        .await
        .unwrap();
    Harness { api, _dir: dir }
}

#[tokio::test]
async fn test_category_create_toggle_delete() {
    let h = logged_in(MockState::new(MockConfig::default())).await;
    let list = ListController::new(CatalogResource::new(h.api.clone(), CatalogKind::Category));
    assert_eq!(list.refresh().await.unwrap(), FetchOutcome::Applied);
    assert!(list.items().await.is_empty());

    list.open_create_form().await;
    list.set_create_input("Trays").await;
    let created = list.create().await.unwrap();
    let items = list.items().await;
    assert_eq!(items[0].id, created.id);
    assert_eq!(items[0].name, "Trays");
    assert!(items[0].is_active);
    assert!(!list.snapshot().await.create_form.open);

    assert!(!list.toggle(&created.id).await.unwrap());
    assert!(!list.items().await[0].is_active);
    list.refresh().await.unwrap();
    assert!(!list.items().await[0].is_active);

    list.request_delete(&created.id).await.unwrap();
    assert!(list.snapshot().await.is_delete_dialog_open());
    list.confirm_delete().await.unwrap();
    assert!(list.items().await.iter().all(|c| c.id != created.id));
    list.refresh().await.unwrap();
    assert!(list.items().await.is_empty());
}

#[tokio::test]
async fn test_duplicate_create_shows_server_message() {
    let h = logged_in(MockState::seeded(MockConfig::default())).await;
    let list = ListController::new(CatalogResource::new(h.api.clone(), CatalogKind::Size));
    list.refresh().await.unwrap();

    list.set_create_input("small").await;
    let err = list.create().await.unwrap_err();
    assert!(matches!(err, ListError::Client(ClientError::Api { status: 409, .. })));
    let snapshot = list.snapshot().await;
    assert_eq!(snapshot.errors.get(admin_client::list::Slot::Create), Some("Size already exists"));
    assert_eq!(snapshot.create_form.input, "small");
}

#[tokio::test]
async fn test_rename_and_search() {
    let h = logged_in(MockState::seeded(MockConfig::default())).await;
    let list = ListController::new(CatalogResource::new(h.api.clone(), CatalogKind::Material));
    list.refresh().await.unwrap();
    let wood = list
        .items()
        .await
        .iter()
        .find(|m| m.name == "Wood")
        .cloned()
        .unwrap();

    list.begin_edit(&wood.id).await.unwrap();
    list.set_edit_input("Birch wood").await.unwrap();
    let renamed = list.save_edit().await.unwrap();
    assert_eq!(renamed.name, "Birch wood");

    assert_eq!(list.set_search("birch").await.unwrap(), FetchOutcome::Applied);
    let items = list.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, wood.id);
    assert_eq!(list.set_search("birch").await.unwrap(), FetchOutcome::Skipped);
}

#[tokio::test]
async fn test_material_paging_steps_back_after_last_delete() {
    let h = logged_in(MockState::seeded(MockConfig::default())).await;
    let list = ListController::new(CatalogResource::new(h.api.clone(), CatalogKind::Material));
    list.set_limit(2).await.unwrap();
    assert_eq!(list.snapshot().await.total_pages, 2);

    list.set_page(2).await.unwrap();
    let items = list.items().await;
    assert_eq!(items.len(), 1);

    list.delete(&items[0].id).await.unwrap();
    let snapshot = list.snapshot().await;
    assert_eq!(snapshot.filter.page, 1);
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.total_pages, 1);
}

#[tokio::test]
async fn test_product_toggle_and_queries_list() {
    let h = logged_in(MockState::seeded(MockConfig::default())).await;
    let products = ListController::new(ProductResource::new(h.api.clone()));
    products.refresh().await.unwrap();
    let first = products.items().await[0].clone();
    assert!(first.is_active);

    assert!(!products.toggle(&first.id).await.unwrap());
    let stored = h.api.get_product(&first.id).await.unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.images, first.images);

    let queries = ListController::new(QueryResource::new(h.api.clone()));
    queries.refresh().await.unwrap();
    assert_eq!(queries.items().await.len(), 2);
}

#[tokio::test]
async fn test_expired_token_surfaces_load_error() {
    let handle = SessionHandle::default();
    let http = OneshotHttpClient::new(
        catalog_mock::router(MockState::seeded(MockConfig::default()).shared()),
        handle,
    );
    let api = Arc::new(CatalogApi::new(http));
    let list = ListController::new(CatalogResource::new(api, CatalogKind::Category));

    assert!(list.refresh().await.is_err());
    let snapshot = list.snapshot().await;
    assert!(!snapshot.loaded);
    assert_eq!(
        snapshot.errors.get(admin_client::list::Slot::Load),
        Some("Unauthorized, token missing or invalid")
    );
}
