use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::page::WidgetHost;

/// Result of one availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookStatus {
    Ready,
    Pending,
    TimedOut,
}

/// Bounded wait for the host's reload hook.
///
/// Each [`ReloadHookWait::poll`] is one attempt; after `max_attempts`
/// unsuccessful attempts the wait reports `TimedOut` and stays finished.
#[derive(Debug, Clone)]
pub struct ReloadHookWait {
    attempts: u32,
    max_attempts: u32,
    finished: Option<HookStatus>,
}

impl ReloadHookWait {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts: max_attempts.max(1),
            finished: None,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    pub fn poll(&mut self, host: &impl WidgetHost) -> HookStatus {
        if let Some(status) = self.finished {
            return status;
        }

        self.attempts += 1;

        if host.is_ready() {
            debug!(event = "core.widget.reload_hook_ready", attempts = self.attempts);
            self.finished = Some(HookStatus::Ready);
            return HookStatus::Ready;
        }

        if self.attempts >= self.max_attempts {
            warn!(
                event = "core.widget.reload_hook_timed_out",
                attempts = self.attempts,
                "Widget host never became ready; leaving widget unrefreshed"
            );
            self.finished = Some(HookStatus::TimedOut);
            return HookStatus::TimedOut;
        }

        HookStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SharedHost;

    #[test]
    fn test_ready_on_first_attempt() {
        let host = SharedHost::new(true);
        let mut wait = ReloadHookWait::new(3);
        assert_eq!(wait.poll(&host), HookStatus::Ready);
        assert_eq!(wait.attempts(), 1);
        assert!(wait.is_finished());
    }

    #[test]
    fn test_becomes_ready_after_pending() {
        let host = SharedHost::new(false);
        let mut wait = ReloadHookWait::new(5);
        assert_eq!(wait.poll(&host), HookStatus::Pending);
        assert_eq!(wait.poll(&host), HookStatus::Pending);
        host.set_ready(true);
        assert_eq!(wait.poll(&host), HookStatus::Ready);
        assert_eq!(wait.attempts(), 3);
    }

    #[test]
    fn test_times_out_after_max_attempts_and_stays_finished() {
        let host = SharedHost::new(false);
        let mut wait = ReloadHookWait::new(2);
        assert_eq!(wait.poll(&host), HookStatus::Pending);
        assert_eq!(wait.poll(&host), HookStatus::TimedOut);

        host.set_ready(true);
        assert_eq!(wait.poll(&host), HookStatus::TimedOut);
        assert_eq!(wait.attempts(), 2);
    }

    #[test]
    fn test_zero_budget_still_checks_once() {
        let host = SharedHost::new(false);
        let mut wait = ReloadHookWait::new(0);
        assert_eq!(wait.poll(&host), HookStatus::TimedOut);
    }
}
