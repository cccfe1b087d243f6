use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scheduler::TimerChange;
use crate::widget::HookStatus;

/// What a dispatched event did, and what the runtime must schedule next.
///
/// Effects within one dispatch are in the order they happened. Timer and
/// hook effects drive the runtime; the rest are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Mirror a refresh timer start or cancellation.
    Timer(TimerChange),
    /// Begin checking the reload hook every `interval`.
    AwaitReloadHook { interval: Duration },
    /// Stop checking the reload hook.
    ReloadHookSettled { status: HookStatus },
    /// Deliver `ReadyDelayElapsed` after `delay`.
    ScheduleReadyDelay { delay: Duration },
    /// The mount element was rewritten.
    MarkupWritten,
    /// The address bar was replaced with `url`.
    UrlReplaced { url: String },
    /// The host was asked to reload the widget.
    ReloadRequested,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TimerHandle;

    #[test]
    fn test_effect_serde_roundtrip() {
        let effect = Effect::Timer(TimerChange::Started {
            handle: TimerHandle(1),
            interval: Duration::from_secs(30),
        });
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}
