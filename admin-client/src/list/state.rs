//! Screen state of a list controller

use std::collections::HashSet;
use std::sync::Arc;

use shared::FilterState;

use crate::pagination::{PageWindow, page_window};

/// Title of the delete confirmation dialog
pub const DELETE_DIALOG_TITLE: &str = "Delete Confirmation";
/// Body of the delete confirmation dialog
pub const DELETE_DIALOG_MESSAGE: &str = "Are you sure you want to delete this item?";

/// Which operation an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Create,
    Update,
    Toggle,
    Delete,
    Load,
}

/// One message slot per operation; setting one never touches another
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlots {
    pub create: Option<String>,
    pub update: Option<String>,
    pub toggle: Option<String>,
    pub delete: Option<String>,
    pub load: Option<String>,
}

impl ErrorSlots {
    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::Create => &mut self.create,
            Slot::Update => &mut self.update,
            Slot::Toggle => &mut self.toggle,
            Slot::Delete => &mut self.delete,
            Slot::Load => &mut self.load,
        }
    }

    pub fn set(&mut self, slot: Slot, message: impl Into<String>) {
        *self.slot_mut(slot) = Some(message.into());
    }

    pub fn clear(&mut self, slot: Slot) {
        *self.slot_mut(slot) = None;
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Create => self.create.as_deref(),
            Slot::Update => self.update.as_deref(),
            Slot::Toggle => self.toggle.as_deref(),
            Slot::Delete => self.delete.as_deref(),
            Slot::Load => self.load.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The collapsible create form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub open: bool,
    pub input: String,
}

/// Inline rename of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: String,
    pub input: String,
}

/// Everything a list screen renders
#[derive(Debug, Clone)]
pub struct ListState<T> {
    /// Rows, newest first; replaced wholesale on every change
    pub items: Arc<Vec<T>>,
    pub filter: FilterState,
    pub total_pages: u32,
    /// Set once the first fetch has been applied
    pub loaded: bool,

    pub loading: bool,
    pub creating: bool,
    pub updating: HashSet<String>,
    pub toggling: HashSet<String>,
    pub deleting: HashSet<String>,

    pub errors: ErrorSlots,
    pub create_form: CreateForm,
    pub editing: Option<EditState>,
    /// Row awaiting delete confirmation; the dialog is open while set
    pub pending_delete: Option<String>,
}

impl<T> ListState<T> {
    pub fn new(filter: FilterState) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            filter,
            total_pages: 1,
            loaded: false,
            loading: false,
            creating: false,
            updating: HashSet::new(),
            toggling: HashSet::new(),
            deleting: HashSet::new(),
            errors: ErrorSlots::default(),
            create_form: CreateForm::default(),
            editing: None,
            pending_delete: None,
        }
    }

    /// A row with a rename, toggle or delete in flight
    pub fn is_busy(&self, id: &str) -> bool {
        self.updating.contains(id) || self.toggling.contains(id) || self.deleting.contains(id)
    }

    pub fn is_delete_dialog_open(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn page_window(&self) -> PageWindow {
        page_window(self.filter.page, self.total_pages)
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}
