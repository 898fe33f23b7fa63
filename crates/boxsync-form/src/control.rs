//! Form boundary: the controls the synchronizer reads and writes.
//!
//! The traits keep the synchronizer independent of whatever hosts the form.
//! The `Memory*` implementations back the CLI and the tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use boxsync_core::SelectOption;
use tokio::sync::broadcast;

/// Capacity of the per-control change channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// A single-choice control.
pub trait SelectControl: Send + Sync {
    /// Current value; empty means nothing selected.
    fn value(&self) -> String;

    /// Current option list, in display order.
    fn options(&self) -> Vec<SelectOption>;

    /// Replaces the whole option list.
    fn replace_options(&self, options: Vec<SelectOption>);

    /// Change events carrying the value the control changed to.
    fn subscribe(&self) -> broadcast::Receiver<String>;
}

/// Looks up controls by their stable identifier.
pub trait FormDocument {
    fn select(&self, id: &str) -> Option<Arc<dyn SelectControl>>;
}

/// Non-blocking inline notice shown next to the box control.
pub trait NoticeSink: Send + Sync {
    fn show(&self, message: &str);
    fn clear(&self);
}

#[derive(Debug, Default)]
struct SelectState {
    value: String,
    options: Vec<SelectOption>,
}

/// In-memory [`SelectControl`].
#[derive(Debug)]
pub struct MemorySelect {
    state: Mutex<SelectState>,
    changes: broadcast::Sender<String>,
}

impl MemorySelect {
    #[must_use]
    pub fn new(options: Vec<SelectOption>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(SelectState {
                value: String::new(),
                options,
            }),
            changes,
        }
    }

    /// Sets the value the way a user would and fires a change event.
    pub fn select(&self, value: &str) {
        self.lock().value = value.to_owned();
        // No subscribers simply means nobody is listening yet.
        let _ = self.changes.send(value.to_owned());
    }

    /// Option values in display order.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.lock().options.iter().map(|o| o.value.clone()).collect()
    }

    /// Option labels in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.lock().options.iter().map(|o| o.label.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SelectState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemorySelect {
    fn default() -> Self {
        Self::new(vec![SelectOption::placeholder()])
    }
}

impl SelectControl for MemorySelect {
    fn value(&self) -> String {
        self.lock().value.clone()
    }

    fn options(&self) -> Vec<SelectOption> {
        self.lock().options.clone()
    }

    fn replace_options(&self, options: Vec<SelectOption>) {
        self.lock().options = options;
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}

/// In-memory [`FormDocument`] holding controls by id.
#[derive(Default)]
pub struct MemoryForm {
    controls: HashMap<String, Arc<dyn SelectControl>>,
}

impl MemoryForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `control` under `id`, replacing any previous control.
    pub fn insert(&mut self, id: &str, control: Arc<dyn SelectControl>) {
        self.controls.insert(id.to_owned(), control);
    }
}

impl FormDocument for MemoryForm {
    fn select(&self, id: &str) -> Option<Arc<dyn SelectControl>> {
        self.controls.get(id).cloned()
    }
}

/// In-memory [`NoticeSink`] remembering the notice currently shown.
#[derive(Debug, Default)]
pub struct MemoryNotice {
    current: Mutex<Option<String>>,
}

impl MemoryNotice {
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NoticeSink for MemoryNotice {
    fn show(&self, message: &str) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.to_owned());
    }

    fn clear(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_select_starts_with_placeholder() {
        let select = MemorySelect::default();
        assert_eq!(select.values(), [""]);
        assert_eq!(select.labels(), ["---------"]);
        assert_eq!(select.value(), "");
    }

    #[test]
    fn memory_select_broadcasts_selected_value() {
        let select = MemorySelect::default();
        let mut changes = select.subscribe();
        select.select("7");
        assert_eq!(changes.try_recv().unwrap(), "7");
        assert_eq!(select.value(), "7");
    }

    #[test]
    fn memory_select_select_without_subscribers_does_not_panic() {
        let select = MemorySelect::default();
        select.select("3");
        assert_eq!(select.value(), "3");
    }

    #[test]
    fn memory_form_resolves_registered_ids_only() {
        let mut form = MemoryForm::new();
        form.insert("id_edition", Arc::new(MemorySelect::default()));
        assert!(form.select("id_edition").is_some());
        assert!(form.select("id_box").is_none());
    }

    #[test]
    fn memory_notice_show_and_clear() {
        let notice = MemoryNotice::default();
        assert!(notice.current().is_none());
        notice.show("boom");
        assert_eq!(notice.current().as_deref(), Some("boom"));
        notice.clear();
        assert!(notice.current().is_none());
    }
}
