use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use shared::ListPage;

use super::*;
use crate::ClientResult;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: String,
    name: String,
    active: bool,
    created_at: Option<DateTime<Utc>>,
}

impl Record for Row {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Activatable for Row {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, is_active: bool) {
        self.active = is_active;
    }
}

impl Named for Row {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + ChronoDuration::minutes(minute)
}

/// In-memory resource that counts every call
#[derive(Default)]
struct MockResource {
    rows: Mutex<Vec<Row>>,
    fetches: AtomicUsize,
    mutations: AtomicUsize,
    fail_toggle: Mutex<HashSet<String>>,
    fetch_delays: Mutex<VecDeque<Duration>>,
    toggle_delay: Mutex<Option<Duration>>,
}

impl MockResource {
    fn with_rows(n: usize) -> Self {
        let rows = (0..n)
            .map(|i| Row {
                id: format!("r{i}"),
                name: format!("row {i}"),
                active: true,
                created_at: Some(at(i as i64)),
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(AtomicOrdering::SeqCst)
    }

    fn mutations(&self) -> usize {
        self.mutations.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl ListResource for MockResource {
    type Item = Row;

    fn label(&self) -> &'static str {
        "Row"
    }

    fn plural(&self) -> &'static str {
        "rows"
    }

    async fn fetch(&self, filter: &FilterState) -> ClientResult<ListPage<Row>> {
        self.fetches.fetch_add(1, AtomicOrdering::SeqCst);
        let delay = self.fetch_delays.lock().unwrap().pop_front();
        // Snapshot before any delay so a slow response carries old data
        let mut matching: Vec<Row> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name.contains(&filter.search))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let limit = filter.limit.max(1) as usize;
        let total_pages = matching.len().div_ceil(limit).max(1) as u32;
        let items = matching.into_iter().skip(filter.offset()).take(limit).collect();
        Ok(ListPage { items, total_pages })
    }
}

#[async_trait]
impl ToggleResource for MockResource {
    async fn set_active(&self, id: &str, is_active: bool) -> ClientResult<()> {
        self.mutations.fetch_add(1, AtomicOrdering::SeqCst);
        let delay = *self.toggle_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_toggle.lock().unwrap().contains(id) {
            return Err(ClientError::Internal("toggle refused".into()));
        }
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|r| r.id == id) {
            row.active = is_active;
        }
        Ok(())
    }
}

#[async_trait]
impl RemoveResource for MockResource {
    async fn remove(&self, id: &str) -> ClientResult<()> {
        self.mutations.fetch_add(1, AtomicOrdering::SeqCst);
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl NamedResource for MockResource {
    async fn create(&self, name: &str) -> ClientResult<Row> {
        self.mutations.fetch_add(1, AtomicOrdering::SeqCst);
        if name == "Duplicate" {
            return Err(ClientError::Api {
                status: 409,
                message: "Row already exists".into(),
            });
        }
        let mut rows = self.rows.lock().unwrap();
        let row = Row {
            id: format!("r{}", rows.len() + 100),
            name: name.to_string(),
            active: true,
            created_at: Some(at(10_000 + rows.len() as i64)),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn rename(&self, id: &str, name: &str) -> ClientResult<Row> {
        self.mutations.fetch_add(1, AtomicOrdering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        row.name = name.to_string();
        Ok(row.clone())
    }
}

async fn loaded(rows: usize) -> Arc<ListController<MockResource>> {
    let controller = Arc::new(ListController::new(MockResource::with_rows(rows)));
    assert_eq!(controller.refresh().await.unwrap(), FetchOutcome::Applied);
    controller
}

#[tokio::test]
async fn test_refresh_sorts_newest_first() {
    let controller = loaded(3).await;
    let items = controller.items().await;
    let ids: Vec<&str> = items.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r2", "r1", "r0"]);
    assert!(!controller.snapshot().await.loading);
}

#[test]
fn test_undated_rows_sort_last_in_server_order() {
    let mut rows = vec![
        Row {
            id: "x".into(),
            name: "x".into(),
            active: true,
            created_at: None,
        },
        Row {
            id: "old".into(),
            name: "o".into(),
            active: true,
            created_at: Some(at(1)),
        },
        Row {
            id: "y".into(),
            name: "y".into(),
            active: true,
            created_at: None,
        },
        Row {
            id: "new".into(),
            name: "n".into(),
            active: true,
            created_at: Some(at(2)),
        },
    ];
    rows.sort_by(newest_first);
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old", "x", "y"]);
}

#[tokio::test]
async fn test_empty_create_sends_nothing() {
    let controller = loaded(2).await;
    controller.open_create_form().await;
    controller.set_create_input("   ").await;

    let err = controller.create().await.unwrap_err();
    assert!(matches!(err, ListError::Validation(_)));

    let state = controller.snapshot().await;
    assert_eq!(state.errors.create.as_deref(), Some("Row name is required!"));
    assert_eq!(controller.resource().mutations(), 0);
    assert!(state.create_form.open);

    // Typing clears the stale error
    controller.set_create_input("T").await;
    assert!(controller.snapshot().await.errors.create.is_none());
}

#[tokio::test]
async fn test_create_refetches_and_resets_form() {
    let controller = loaded(2).await;
    let before = controller.resource().fetches();
    controller.open_create_form().await;
    controller.set_create_input("  Trays ").await;

    let created = controller.create().await.unwrap();
    assert_eq!(created.name, "Trays");

    let state = controller.snapshot().await;
    assert_eq!(controller.resource().fetches(), before + 1);
    assert_eq!(state.items[0].name, "Trays");
    assert_eq!(state.create_form, CreateForm::default());
    assert!(!state.creating);
}

#[tokio::test]
async fn test_create_failure_uses_server_message() {
    let controller = loaded(1).await;
    controller.set_create_input("Duplicate").await;
    assert!(controller.create().await.is_err());
    let state = controller.snapshot().await;
    assert_eq!(state.errors.create.as_deref(), Some("Row already exists"));
    assert_eq!(state.create_form.input, "Duplicate");
    assert!(!state.creating);
}

#[tokio::test]
async fn test_toggle_success() {
    let controller = loaded(2).await;
    assert!(!controller.toggle("r0").await.unwrap());

    let state = controller.snapshot().await;
    let row = state.items.iter().find(|r| r.id == "r0").unwrap();
    assert!(!row.active);
    assert!(state.toggling.is_empty());
    assert!(state.errors.is_empty());
}

#[tokio::test]
async fn test_toggle_failure_rolls_back() {
    let controller = loaded(2).await;
    controller
        .resource()
        .fail_toggle
        .lock()
        .unwrap()
        .insert("r1".into());

    assert!(controller.set_active("r1", false).await.is_err());

    let state = controller.snapshot().await;
    let row = state.items.iter().find(|r| r.id == "r1").unwrap();
    assert!(row.active);
    assert!(state.toggling.is_empty());
    assert!(state.errors.create.is_none());
    assert!(state.errors.update.is_none());
    assert_eq!(state.errors.toggle.as_deref(), Some("Failed to update row status!"));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_toggles_roll_back_independently() {
    let controller = loaded(2).await;
    *controller.resource().toggle_delay.lock().unwrap() = Some(Duration::from_millis(50));
    controller
        .resource()
        .fail_toggle
        .lock()
        .unwrap()
        .insert("r0".into());

    let (a, b) = tokio::join!(
        controller.set_active("r0", false),
        controller.set_active("r1", false)
    );
    assert!(a.is_err());
    assert!(b.is_ok());

    let items = controller.items().await;
    assert!(items.iter().find(|r| r.id == "r0").unwrap().active);
    assert!(!items.iter().find(|r| r.id == "r1").unwrap().active);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_survives_overlapping_refresh() {
    let controller = loaded(2).await;
    *controller.resource().toggle_delay.lock().unwrap() = Some(Duration::from_millis(50));
    controller
        .resource()
        .fetch_delays
        .lock()
        .unwrap()
        .push_back(Duration::from_millis(10));

    let (toggled, refreshed) = tokio::join!(controller.set_active("r0", false), async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        controller.refresh().await
    });
    assert!(!toggled.unwrap());
    assert_eq!(refreshed.unwrap(), FetchOutcome::Applied);

    let state = controller.snapshot().await;
    assert!(!state.items.iter().find(|r| r.id == "r0").unwrap().active);
    assert!(state.toggling.is_empty());
    let stored = controller.resource().rows.lock().unwrap().clone();
    assert!(!stored.iter().find(|r| r.id == "r0").unwrap().active);
}

#[tokio::test(start_paused = true)]
async fn test_busy_row_refused_before_request() {
    let controller = loaded(1).await;
    *controller.resource().toggle_delay.lock().unwrap() = Some(Duration::from_millis(50));

    let (first, second) = tokio::join!(controller.set_active("r0", false), controller.delete("r0"));
    assert!(first.is_ok());
    assert!(matches!(second, Err(ListError::Busy(ref id)) if id == "r0"));
    assert_eq!(controller.resource().mutations(), 1);
}

#[tokio::test]
async fn test_rename_validation_and_patch() {
    let controller = loaded(2).await;
    controller.begin_edit("r0").await.unwrap();
    assert_eq!(controller.snapshot().await.editing.unwrap().input, "row 0");

    controller.set_edit_input(" ").await.unwrap();
    assert!(matches!(controller.save_edit().await, Err(ListError::Validation(_))));
    assert_eq!(
        controller.snapshot().await.errors.update.as_deref(),
        Some("Row name is required!")
    );
    assert_eq!(controller.resource().mutations(), 0);

    let fetches = controller.resource().fetches();
    controller.rename("r0", "Cups").await.unwrap();
    let state = controller.snapshot().await;
    assert_eq!(state.items.iter().find(|r| r.id == "r0").unwrap().name, "Cups");
    assert!(state.editing.is_none());
    assert!(state.updating.is_empty());
    assert_eq!(controller.resource().fetches(), fetches);
}

#[tokio::test]
async fn test_delete_is_two_step() {
    let controller = loaded(2).await;
    controller.request_delete("r0").await.unwrap();
    assert!(controller.snapshot().await.is_delete_dialog_open());

    controller.cancel_delete().await;
    assert!(!controller.snapshot().await.is_delete_dialog_open());
    assert_eq!(controller.resource().mutations(), 0);
    assert!(matches!(controller.confirm_delete().await, Err(ListError::NoPendingDelete)));

    controller.request_delete("r0").await.unwrap();
    controller.confirm_delete().await.unwrap();
    let state = controller.snapshot().await;
    assert!(state.items.iter().all(|r| r.id != "r0"));
    assert!(state.pending_delete.is_none());
    assert!(state.deleting.is_empty());
}

#[tokio::test]
async fn test_deleting_last_row_steps_back_one_page() {
    let controller = Arc::new(ListController::with_filter(
        MockResource::with_rows(11),
        FilterState::default().with_limit(5),
    ));
    controller.refresh().await.unwrap();
    assert_eq!(controller.snapshot().await.total_pages, 3);

    controller.set_page(3).await.unwrap();
    let state = controller.snapshot().await;
    assert_eq!(state.items.len(), 1);
    let last_id = state.items[0].id.clone();

    let before = controller.resource().fetches();
    controller.delete(&last_id).await.unwrap();

    let state = controller.snapshot().await;
    assert_eq!(state.filter.page, 2);
    assert_eq!(controller.resource().fetches(), before + 1);
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.total_pages, 2);
}

#[tokio::test]
async fn test_deleting_on_first_page_does_not_refetch() {
    let controller = loaded(1).await;
    let before = controller.resource().fetches();
    controller.delete("r0").await.unwrap();
    let state = controller.snapshot().await;
    assert!(state.items.is_empty());
    assert_eq!(state.filter.page, 1);
    assert_eq!(controller.resource().fetches(), before);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    let resource = MockResource::with_rows(3);
    resource.rows.lock().unwrap()[0].name = "alpha".into();
    resource.rows.lock().unwrap()[1].name = "beta".into();
    resource
        .fetch_delays
        .lock()
        .unwrap()
        .extend([Duration::from_millis(200), Duration::from_millis(10)]);
    let controller = ListController::new(resource);

    let (slow, fast) = tokio::join!(controller.set_search("alpha"), controller.set_search("beta"));
    assert_eq!(slow.unwrap(), FetchOutcome::Discarded);
    assert_eq!(fast.unwrap(), FetchOutcome::Applied);

    let state = controller.snapshot().await;
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "beta");
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_fetches_once() {
    let controller = loaded(3).await;
    let before = controller.resource().fetches();
    let input = controller.bind_search(crate::debounce::DEFAULT_DEBOUNCE);

    for (i, text) in ["r", "ro", "row", "row 1"].into_iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        input.push(text);
    }
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(controller.resource().fetches(), before + 1);
    let state = controller.snapshot().await;
    assert_eq!(state.filter.search, "row 1");
    assert_eq!(state.items.len(), 1);
}

#[tokio::test]
async fn test_page_size_change_resets_page() {
    let controller = Arc::new(ListController::with_filter(
        MockResource::with_rows(12),
        FilterState::default().with_limit(5),
    ));
    controller.refresh().await.unwrap();
    controller.set_page(2).await.unwrap();
    controller.set_limit(10).await.unwrap();
    let state = controller.snapshot().await;
    assert_eq!(state.filter.page, 1);
    assert_eq!(state.filter.limit, 10);
    assert_eq!(state.total_pages, 2);
}

#[tokio::test]
async fn test_set_page_before_first_load_is_not_rewritten() {
    let controller = ListController::with_filter(
        MockResource::with_rows(3),
        FilterState::default().with_limit(1),
    );
    assert_eq!(controller.set_page(3).await.unwrap(), FetchOutcome::Applied);
    let state = controller.snapshot().await;
    assert_eq!(state.filter.page, 3);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "r0");
}

#[tokio::test]
async fn test_set_page_reaches_page_added_since_last_fetch() {
    let controller = ListController::with_filter(
        MockResource::with_rows(3),
        FilterState::default().with_limit(1),
    );
    controller.refresh().await.unwrap();
    controller.resource().rows.lock().unwrap().push(Row {
        id: "late".into(),
        name: "late".into(),
        active: true,
        created_at: Some(at(-1)),
    });

    controller.set_page(4).await.unwrap();
    let state = controller.snapshot().await;
    assert_eq!(state.filter.page, 4);
    assert_eq!(state.total_pages, 4);
    assert_eq!(state.items[0].id, "late");

    // Page 0 is floored to the first page
    controller.set_page(0).await.unwrap();
    assert_eq!(controller.snapshot().await.filter.page, 1);
}
