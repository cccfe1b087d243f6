//! Capabilities the controller needs from the embedding page.

use serde::{Deserialize, Serialize};
use url::Url;

/// The two picker controls bound after the widget signals readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Picker {
    /// Date input; values are `YYYY-MM-DD`.
    Date,
    /// Event selection; values are event identifiers or empty.
    Event,
}

impl Picker {
    /// Element id used by the widget template.
    pub fn element_id(&self) -> &'static str {
        match self {
            Picker::Date => "datePicker",
            Picker::Event => "eventPicker",
        }
    }
}

/// The document the widget is mounted in.
pub trait Page {
    /// Whether the tab is currently in the background.
    fn is_hidden(&self) -> bool;

    /// Replace the contents of the container element.
    ///
    /// Returns `false` without side effects if the container does not exist.
    fn replace_container(&mut self, container_id: &str, markup: &str) -> bool;

    /// Reveal the loading indicator, if the page has one.
    fn show_loader(&mut self);

    /// Whether the picker control is mounted.
    fn has_picker(&self, picker: Picker) -> bool;

    /// Set a picker's displayed value. Returns `false` if it is not mounted.
    fn set_picker_value(&mut self, picker: Picker, value: &str) -> bool;
}

/// The browser address bar.
pub trait History {
    fn current_url(&self) -> Url;

    /// Replace the current history entry without navigating.
    fn replace_url(&mut self, url: Url);
}

/// The remote widget host.
pub trait WidgetHost {
    /// Whether the host's reload hook is available yet.
    fn is_ready(&self) -> bool;

    /// Re-render the widget from its mount element attributes.
    fn request_reload(&mut self, widget_id: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picker_element_ids() {
        assert_eq!(Picker::Date.element_id(), "datePicker");
        assert_eq!(Picker::Event.element_id(), "eventPicker");
    }
}
