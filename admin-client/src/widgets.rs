//! Small stateful inputs

/// Multi-value picker over a fixed option list
///
/// Every change is ignored while disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSelect {
    pub label: String,
    pub options: Vec<String>,
    selected: Vec<String>,
    pub disabled: bool,
    pub required: bool,
    open: bool,
}

impl MultiSelect {
    pub fn new(label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            label: label.into(),
            options,
            ..Default::default()
        }
    }

    pub fn with_selected(mut self, selected: Vec<String>) -> Self {
        self.selected = selected;
        self
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|s| s == value)
    }

    pub fn is_open(&self) -> bool {
        self.open && !self.disabled
    }

    pub fn toggle_open(&mut self) {
        if !self.disabled {
            self.open = !self.open;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Select or unselect `value`
    pub fn toggle(&mut self, value: &str) {
        if self.disabled {
            return;
        }
        if self.is_selected(value) {
            self.selected.retain(|s| s != value);
        } else {
            self.selected.push(value.to_string());
        }
    }

    pub fn remove(&mut self, value: &str) {
        if !self.disabled {
            self.selected.retain(|s| s != value);
        }
    }

    /// Text shown in the closed box
    pub fn placeholder(&self) -> String {
        format!("Select {}...", self.label.to_lowercase())
    }

    /// Comma-joined value submitted with the form
    pub fn value(&self) -> String {
        self.selected.join(",")
    }

    /// Required and nothing picked
    pub fn is_missing(&self) -> bool {
        self.required && self.selected.is_empty()
    }
}
