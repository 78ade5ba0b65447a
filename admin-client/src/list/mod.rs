//! Entity list controller
//!
//! One generic controller drives every list screen (categories, materials,
//! sizes, products, blogs, customer queries). It owns the screen state and
//! exposes one async method per user action. Which actions exist depends on
//! the capabilities of the resource it wraps.
//!
//! The state lock is never held across a request. Each fetch takes a ticket
//! and only the newest ticket may apply its result, so a slow response can
//! never overwrite a newer one.

pub mod optimistic;
pub mod resource;
pub mod state;

pub use optimistic::{Rollback, apply_optimistic};
pub use resource::{
    Activatable, BlogResource, CatalogResource, ListResource, Named, NamedResource,
    ProductResource, QueryResource, Record, RemoveResource, ToggleResource,
};
pub use state::{CreateForm, EditState, ErrorSlots, ListState, Slot};

use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::Duration;

use shared::FilterState;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::ClientError;
use crate::debounce::Debouncer;

/// Controller refusals and failed requests
#[derive(Debug, Error)]
pub enum ListError {
    /// Input rejected before any request
    #[error("{0}")]
    Validation(String),

    /// Another request for this row is still in flight
    #[error("Row {0} is busy")]
    Busy(String),

    #[error("No row with id {0}")]
    UnknownId(String),

    #[error("No delete awaiting confirmation")]
    NoPendingDelete,

    #[error("No row is being edited")]
    NotEditing,

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type ListResult<T> = Result<T, ListError>;

/// What became of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result replaced the list
    Applied,
    /// A newer fetch was issued meanwhile; result dropped
    Discarded,
    /// Nothing changed, no request sent
    Skipped,
}

/// Newest first; rows without a timestamp keep server order at the end
fn newest_first<T: Record>(a: &T, b: &T) -> Ordering {
    match (a.created_at(), b.created_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Generic list screen controller
pub struct ListController<R: ListResource> {
    resource: R,
    state: RwLock<ListState<R::Item>>,
    /// Ticket of the newest fetch issued
    latest_fetch: AtomicU64,
}

impl<R: ListResource> std::fmt::Debug for ListController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("resource", &self.resource.label())
            .field("latest_fetch", &self.latest_fetch.load(AtomicOrdering::SeqCst))
            .finish()
    }
}

impl<R: ListResource> ListController<R> {
    pub fn new(resource: R) -> Self {
        Self::with_filter(resource, FilterState::default())
    }

    pub fn with_filter(resource: R, filter: FilterState) -> Self {
        Self {
            resource,
            state: RwLock::new(ListState::new(filter)),
            latest_fetch: AtomicU64::new(0),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Consistent copy of the whole screen state
    pub async fn snapshot(&self) -> ListState<R::Item> {
        self.state.read().await.clone()
    }

    pub async fn items(&self) -> Arc<Vec<R::Item>> {
        Arc::clone(&self.state.read().await.items)
    }

    pub async fn filter(&self) -> FilterState {
        self.state.read().await.filter.clone()
    }

    fn fallback(&self, verb: &str) -> String {
        format!("Failed to {} {}!", verb, self.resource.label().to_lowercase())
    }

    fn name_required(&self) -> String {
        format!("{} name is required!", self.resource.label())
    }

    // ========== Fetching ==========

    /// Fetch the current filter and replace the list
    pub async fn refresh(&self) -> ListResult<FetchOutcome> {
        let ticket = self.latest_fetch.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        let filter = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.filter.clone()
        };

        tracing::debug!(
            resource = self.resource.plural(),
            ticket,
            page = filter.page,
            search = %filter.search,
            "Fetching list"
        );
        let result = self.resource.fetch(&filter).await;

        let mut state = self.state.write().await;
        if ticket != self.latest_fetch.load(AtomicOrdering::SeqCst) {
            tracing::debug!(
                resource = self.resource.plural(),
                ticket,
                "Discarding stale list response"
            );
            return Ok(FetchOutcome::Discarded);
        }
        state.loading = false;

        match result {
            Ok(page) => {
                let mut items = page.items;
                items.sort_by(newest_first);
                state.items = Arc::new(items);
                state.total_pages = page.total_pages.max(1);
                state.loaded = true;
                state.errors.clear(Slot::Load);
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!(
                    resource = self.resource.plural(),
                    error = %e,
                    "Failed to fetch list"
                );
                let fallback = format!("Failed to load {}!", self.resource.plural());
                state.errors.set(Slot::Load, e.user_message(&fallback));
                Err(e.into())
            }
        }
    }

    /// Apply a new search term (already debounced), back to page 1
    pub async fn set_search(&self, search: impl Into<String>) -> ListResult<FetchOutcome> {
        let search = search.into();
        {
            let mut state = self.state.write().await;
            if state.filter.search == search && state.loaded {
                return Ok(FetchOutcome::Skipped);
            }
            state.filter = state.filter.clone().with_search(search);
        }
        self.refresh().await
    }

    /// Go to a page (1-based).
    ///
    /// The page is sent as asked; keeping it in range is the job of the
    /// page window, whose prev/next carry no target at the edges.
    pub async fn set_page(&self, page: u32) -> ListResult<FetchOutcome> {
        {
            let mut state = self.state.write().await;
            let page = page.max(1);
            if state.filter.page == page && state.loaded {
                return Ok(FetchOutcome::Skipped);
            }
            state.filter = state.filter.clone().with_page(page);
        }
        self.refresh().await
    }

    /// Change the page size; always returns to page 1
    pub async fn set_limit(&self, limit: u32) -> ListResult<FetchOutcome> {
        {
            let mut state = self.state.write().await;
            state.filter = state.filter.clone().with_limit(limit);
        }
        self.refresh().await
    }

    /// Restrict to active rows (`Some(true)`), inactive rows, or none
    pub async fn set_active_filter(&self, is_active: Option<bool>) -> ListResult<FetchOutcome> {
        {
            let mut state = self.state.write().await;
            state.filter = state.filter.clone().with_active(is_active);
        }
        self.refresh().await
    }
}

/// Debounced search box bound to a controller
///
/// Dropping it stops forwarding.
#[derive(Debug)]
pub struct SearchInput {
    debouncer: Debouncer<String>,
    task: JoinHandle<()>,
}

impl SearchInput {
    /// Record a keystroke
    pub fn push(&self, text: impl Into<String>) {
        self.debouncer.push(text.into());
    }
}

impl Drop for SearchInput {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<R: ListResource> ListController<R> {
    /// Feed search text through a debouncer into [`set_search`](Self::set_search)
    pub fn bind_search(self: &Arc<Self>, delay: Duration) -> SearchInput {
        let (debouncer, mut settled) = Debouncer::new(delay);
        let controller = Arc::clone(self);
        let task = tokio::spawn(async move {
            while let Some(text) = settled.recv().await {
                if let Err(e) = controller.set_search(text).await {
                    tracing::warn!(error = %e, "Search refresh failed");
                }
            }
        });
        SearchInput { debouncer, task }
    }
}

// ========== Create / rename ==========

impl<R: NamedResource> ListController<R> {
    pub async fn open_create_form(&self) {
        self.state.write().await.create_form.open = true;
    }

    pub async fn close_create_form(&self) {
        let mut state = self.state.write().await;
        state.create_form = CreateForm::default();
        state.errors.clear(Slot::Create);
    }

    /// Typing into the create input clears a stale create error
    pub async fn set_create_input(&self, text: impl Into<String>) {
        let mut state = self.state.write().await;
        state.create_form.input = text.into();
        state.errors.clear(Slot::Create);
    }

    /// Submit the create form.
    ///
    /// A blank name is refused without a request. On success the input is
    /// cleared, the form collapses and the current page is fetched again.
    pub async fn create(&self) -> ListResult<R::Item> {
        let name = {
            let mut state = self.state.write().await;
            let name = state.create_form.input.trim().to_string();
            if name.is_empty() {
                let message = self.name_required();
                state.errors.set(Slot::Create, message.clone());
                return Err(ListError::Validation(message));
            }
            if state.creating {
                return Err(ListError::Busy("create".to_string()));
            }
            state.creating = true;
            state.errors.clear(Slot::Create);
            name
        };

        let result = self.resource.create(&name).await;

        {
            let mut state = self.state.write().await;
            state.creating = false;
            match &result {
                Ok(_) => state.create_form = CreateForm::default(),
                Err(e) => {
                    tracing::warn!(resource = self.resource.plural(), error = %e, "Create failed");
                    state.errors.set(Slot::Create, e.user_message(&self.fallback("create")));
                }
            }
        }

        let created = result?;
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Refresh after create failed");
        }
        Ok(created)
    }

    /// Enter rename mode for a row
    pub async fn begin_edit(&self, id: &str) -> ListResult<()> {
        let mut state = self.state.write().await;
        let name = state
            .items
            .iter()
            .find(|r| r.id() == id)
            .map(|r| r.name().to_string())
            .ok_or_else(|| ListError::UnknownId(id.to_string()))?;
        state.editing = Some(EditState {
            id: id.to_string(),
            input: name,
        });
        state.errors.clear(Slot::Update);
        Ok(())
    }

    pub async fn set_edit_input(&self, text: impl Into<String>) -> ListResult<()> {
        let mut state = self.state.write().await;
        let edit = state.editing.as_mut().ok_or(ListError::NotEditing)?;
        edit.input = text.into();
        Ok(())
    }

    pub async fn cancel_edit(&self) {
        self.state.write().await.editing = None;
    }

    /// Save the rename; the row is patched in place on success
    pub async fn save_edit(&self) -> ListResult<R::Item> {
        let (id, name) = {
            let mut state = self.state.write().await;
            let edit = state.editing.clone().ok_or(ListError::NotEditing)?;
            let name = edit.input.trim().to_string();
            if name.is_empty() {
                let message = self.name_required();
                state.errors.set(Slot::Update, message.clone());
                return Err(ListError::Validation(message));
            }
            if state.is_busy(&edit.id) {
                return Err(ListError::Busy(edit.id));
            }
            state.updating.insert(edit.id.clone());
            (edit.id, name)
        };

        let result = self.resource.rename(&id, &name).await;

        let mut state = self.state.write().await;
        state.updating.remove(&id);
        match result {
            Ok(updated) => {
                if let Some((items, _)) =
                    apply_optimistic(&state.items, &id, |r| r.set_name(name.clone()))
                {
                    state.items = items;
                }
                state.editing = None;
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(resource = self.resource.plural(), %id, error = %e, "Rename failed");
                state.errors.set(Slot::Update, e.user_message(&self.fallback("update")));
                Err(e.into())
            }
        }
    }

    /// Rename in one step
    pub async fn rename(&self, id: &str, name: impl Into<String>) -> ListResult<R::Item> {
        self.begin_edit(id).await?;
        self.set_edit_input(name).await?;
        self.save_edit().await
    }
}

// ========== Toggle ==========

impl<R: ToggleResource> ListController<R> {
    /// Set a row's active flag optimistically.
    ///
    /// The row flips at once; if the request fails it is put back and the
    /// toggle error is set. Returns the value now held.
    pub async fn set_active(&self, id: &str, is_active: bool) -> ListResult<bool> {
        let rollback = {
            let mut state = self.state.write().await;
            if state.is_busy(id) {
                return Err(ListError::Busy(id.to_string()));
            }
            let (items, rollback) = apply_optimistic(&state.items, id, |r| r.set_active(is_active))
                .ok_or_else(|| ListError::UnknownId(id.to_string()))?;
            state.items = items;
            state.toggling.insert(id.to_string());
            state.errors.clear(Slot::Toggle);
            rollback
        };

        let result = self.resource.set_active(id, is_active).await;

        let mut state = self.state.write().await;
        state.toggling.remove(id);
        match result {
            Ok(()) => {
                // A fetch may have landed meanwhile with the old flag
                if let Some((items, _)) =
                    apply_optimistic(&state.items, id, |r| r.set_active(is_active))
                {
                    state.items = items;
                }
                Ok(is_active)
            }
            Err(e) => {
                tracing::warn!(
                    resource = self.resource.plural(),
                    %id,
                    error = %e,
                    "Toggle failed, rolling back"
                );
                if let Some(items) = rollback.restore(&state.items) {
                    state.items = items;
                }
                let fallback = format!(
                    "Failed to update {} status!",
                    self.resource.label().to_lowercase()
                );
                state.errors.set(Slot::Toggle, e.user_message(&fallback));
                Err(e.into())
            }
        }
    }

    /// Flip a row's active flag
    pub async fn toggle(&self, id: &str) -> ListResult<bool> {
        let current = self
            .state
            .read()
            .await
            .items
            .iter()
            .find(|r| r.id() == id)
            .map(|r| r.is_active())
            .ok_or_else(|| ListError::UnknownId(id.to_string()))?;
        self.set_active(id, !current).await
    }
}

// ========== Delete ==========

impl<R: RemoveResource> ListController<R> {
    /// First step: open the confirmation dialog for a row
    pub async fn request_delete(&self, id: &str) -> ListResult<()> {
        let mut state = self.state.write().await;
        if !state.items.iter().any(|r| r.id() == id) {
            return Err(ListError::UnknownId(id.to_string()));
        }
        state.pending_delete = Some(id.to_string());
        Ok(())
    }

    /// Close the dialog; nothing is sent
    pub async fn cancel_delete(&self) {
        self.state.write().await.pending_delete = None;
    }

    /// Second step: delete the pending row.
    ///
    /// Removing the last row of a page past the first steps back one page
    /// and fetches it once. On failure the dialog stays open.
    pub async fn confirm_delete(&self) -> ListResult<()> {
        let id = {
            let mut state = self.state.write().await;
            let id = state.pending_delete.clone().ok_or(ListError::NoPendingDelete)?;
            if state.is_busy(&id) {
                return Err(ListError::Busy(id));
            }
            state.deleting.insert(id.clone());
            id
        };

        let result = self.resource.remove(&id).await;

        let step_back = {
            let mut state = self.state.write().await;
            state.deleting.remove(&id);
            if let Err(e) = result {
                tracing::warn!(resource = self.resource.plural(), %id, error = %e, "Delete failed");
                state.errors.set(Slot::Delete, e.user_message(&self.fallback("delete")));
                return Err(e.into());
            }
            let remaining: Vec<R::Item> =
                state.items.iter().filter(|r| r.id() != id).cloned().collect();
            state.items = Arc::new(remaining);
            state.pending_delete = None;
            state.errors.clear(Slot::Delete);

            if state.items.is_empty() && state.filter.page > 1 {
                let page = state.filter.page - 1;
                state.filter = state.filter.clone().with_page(page);
                state.total_pages = state.total_pages.saturating_sub(1).max(page);
                true
            } else {
                false
            }
        };

        if step_back && let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Refresh after delete failed");
        }
        Ok(())
    }

    /// Delete in one step
    pub async fn delete(&self, id: &str) -> ListResult<()> {
        self.request_delete(id).await?;
        self.confirm_delete().await
    }
}

#[cfg(test)]
mod tests;
