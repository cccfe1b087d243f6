use serde::{Deserialize, Serialize};

use crate::scheduler::TimerHandle;

/// Everything that can happen to a mounted widget.
///
/// Events use owned types so they can cross task boundaries and be logged
/// or replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageEvent {
    /// Initial page load: read the URL and mount the widget.
    PageLoaded,
    /// The host signalled that a widget finished loading.
    WidgetReady { widget_id: String },
    /// The post-ready delay has passed; pickers should now be mounted.
    ReadyDelayElapsed,
    /// The date picker changed (`YYYY-MM-DD`).
    DatePicked { value: String },
    /// The event picker changed. `None` or blank clears the selection.
    EventPicked { event_id: Option<String> },
    /// The tab moved to the background or foreground.
    VisibilityChanged { hidden: bool },
    /// A refresh timer fired.
    RefreshTick { handle: TimerHandle },
    /// Time for another reload-hook availability check.
    ReloadHookPoll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_event_serde_roundtrip() {
        let events = vec![
            PageEvent::PageLoaded,
            PageEvent::WidgetReady {
                widget_id: "NewPersonWidget".to_string(),
            },
            PageEvent::DatePicked {
                value: "2024-03-15".to_string(),
            },
            PageEvent::EventPicked { event_id: None },
            PageEvent::VisibilityChanged { hidden: true },
            PageEvent::RefreshTick {
                handle: TimerHandle(3),
            },
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: PageEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, back);
        }
    }
}
