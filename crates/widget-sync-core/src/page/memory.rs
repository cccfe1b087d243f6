//! In-memory page surfaces for headless sessions and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use url::Url;

use super::traits::{History, Page, Picker, WidgetHost};

/// A document with a fixed set of mounted elements.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    hidden: bool,
    containers: HashMap<String, String>,
    // keyed by element id
    pickers: HashMap<&'static str, String>,
    loader_visible: bool,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount an empty container element.
    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.containers.insert(container_id.into(), String::new());
        self
    }

    /// Mount an empty picker control.
    pub fn with_picker(mut self, picker: Picker) -> Self {
        self.pickers.insert(picker.element_id(), String::new());
        self
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn container_markup(&self, container_id: &str) -> Option<&str> {
        self.containers.get(container_id).map(String::as_str)
    }

    pub fn picker_value(&self, picker: Picker) -> Option<&str> {
        self.pickers.get(picker.element_id()).map(String::as_str)
    }

    /// Value of a mounted picker, looked up by its element id.
    pub fn element_value(&self, element_id: &str) -> Option<&str> {
        self.pickers.get(element_id).map(String::as_str)
    }

    pub fn loader_visible(&self) -> bool {
        self.loader_visible
    }
}

impl Page for MemoryPage {
    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn replace_container(&mut self, container_id: &str, markup: &str) -> bool {
        match self.containers.get_mut(container_id) {
            Some(content) => {
                *content = markup.to_string();
                true
            }
            None => false,
        }
    }

    fn show_loader(&mut self) {
        self.loader_visible = true;
    }

    fn has_picker(&self, picker: Picker) -> bool {
        self.pickers.contains_key(picker.element_id())
    }

    fn set_picker_value(&mut self, picker: Picker, value: &str) -> bool {
        match self.pickers.get_mut(picker.element_id()) {
            Some(current) => {
                *current = value.to_string();
                true
            }
            None => false,
        }
    }
}

/// An address bar that records replacements.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    url: Url,
    replacements: usize,
}

impl MemoryHistory {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            replacements: 0,
        }
    }

    /// Number of `replace_url` calls so far.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl History for MemoryHistory {
    fn current_url(&self) -> Url {
        self.url.clone()
    }

    fn replace_url(&mut self, url: Url) {
        self.url = url;
        self.replacements += 1;
    }
}

/// A widget host whose readiness can be flipped from another task.
///
/// Clones share state, so a test or driver can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct SharedHost {
    ready: Arc<AtomicBool>,
    reloads: Arc<Mutex<Vec<String>>>,
}

impl SharedHost {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(ready)),
            reloads: Arc::default(),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Widget ids passed to `request_reload`, in call order.
    pub fn reloads(&self) -> Vec<String> {
        self.reloads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl WidgetHost for SharedHost {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn request_reload(&mut self, widget_id: &str) {
        self.reloads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(widget_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_page_missing_container_is_untouched() {
        let mut page = MemoryPage::new().with_container("root");
        assert!(page.replace_container("root", "<div></div>"));
        assert!(!page.replace_container("other", "<p></p>"));
        assert_eq!(page.container_markup("root"), Some("<div></div>"));
        assert_eq!(page.container_markup("other"), None);
    }

    #[test]
    fn test_memory_page_pickers() {
        let mut page = MemoryPage::new().with_picker(Picker::Date);
        assert!(page.has_picker(Picker::Date));
        assert!(!page.has_picker(Picker::Event));
        assert!(page.set_picker_value(Picker::Date, "2024-03-15"));
        assert!(!page.set_picker_value(Picker::Event, "12"));
        assert_eq!(page.picker_value(Picker::Date), Some("2024-03-15"));
        assert_eq!(page.element_value("datePicker"), Some("2024-03-15"));
        assert_eq!(page.element_value("eventPicker"), None);
    }

    #[test]
    fn test_memory_history_counts_replacements() {
        let mut history = MemoryHistory::new(Url::parse("https://example.org/a").unwrap());
        history.replace_url(Url::parse("https://example.org/a?x=1").unwrap());
        assert_eq!(history.replacements(), 1);
        assert_eq!(history.current_url().query(), Some("x=1"));
    }

    #[test]
    fn test_shared_host_clones_share_state() {
        let observer = SharedHost::new(false);
        let mut host = observer.clone();

        assert!(!host.is_ready());
        observer.set_ready(true);
        assert!(host.is_ready());

        host.request_reload("NewPersonWidget");
        assert_eq!(observer.reloads(), vec!["NewPersonWidget".to_string()]);
        assert_eq!(observer.reload_count(), 1);
    }
}
