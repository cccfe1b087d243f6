use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::params::ParameterSet;

use super::types::{
    RefreshPolicy, SchedulerState, SchedulerStats, TickOutcome, TimerChange, TimerHandle,
};

/// Owns the single recurring auto-refresh timer.
///
/// Key invariant: at most one timer is live. `start` always cancels the
/// current timer before creating the next one, and every change is reported
/// as a [`TimerChange`] so the runtime can mirror it.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    state: SchedulerState,
    interval: Duration,
    next_handle: u64,
    stats: SchedulerStats,
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: SchedulerState::Idle,
            interval,
            next_handle: 1,
            stats: SchedulerStats::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running(_))
    }

    pub fn active_handle(&self) -> Option<TimerHandle> {
        match self.state {
            SchedulerState::Running(handle) => Some(handle),
            SchedulerState::Idle => None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Cancel any live timer, then start a fresh one.
    pub fn start(&mut self) -> Vec<TimerChange> {
        let mut changes = self.stop();

        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.state = SchedulerState::Running(handle);
        self.stats.starts += 1;

        info!(
            event = "core.scheduler.timer_started",
            handle = %handle,
            interval_ms = self.interval.as_millis() as u64
        );

        changes.push(TimerChange::Started {
            handle,
            interval: self.interval,
        });
        changes
    }

    /// Cancel the live timer, if any. Calling while idle is a no-op.
    pub fn stop(&mut self) -> Vec<TimerChange> {
        let SchedulerState::Running(handle) = self.state else {
            return Vec::new();
        };

        self.state = SchedulerState::Idle;
        self.stats.cancels += 1;
        info!(event = "core.scheduler.timer_cancelled", handle = %handle);

        vec![TimerChange::Cancelled { handle }]
    }

    /// Decide what a tick of `handle` should do.
    pub fn on_tick(&mut self, handle: TimerHandle, hidden: bool) -> TickOutcome {
        if self.active_handle() != Some(handle) {
            debug!(event = "core.scheduler.tick_stale", handle = %handle);
            return TickOutcome::Stale;
        }

        if hidden {
            self.stats.skipped_ticks += 1;
            debug!(event = "core.scheduler.tick_skipped_hidden", handle = %handle);
            return TickOutcome::SkippedHidden;
        }

        self.stats.reload_ticks += 1;
        debug!(event = "core.scheduler.tick_reload", handle = %handle);
        TickOutcome::Reload
    }

    /// Bring the timer in line with the refresh policy for `params`.
    ///
    /// An active policy restarts the timer so the next refresh is a full
    /// interval after the state it reflects.
    pub fn reconcile(
        &mut self,
        params: &ParameterSet,
        hidden: bool,
        today: NaiveDate,
    ) -> (RefreshPolicy, Vec<TimerChange>) {
        let policy = RefreshPolicy::derive(params, hidden, today);
        debug!(event = "core.scheduler.reconciled", policy = ?policy, hidden = hidden);

        let changes = match policy {
            RefreshPolicy::Active => self.start(),
            RefreshPolicy::Inactive => self.stop(),
        };
        (policy, changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(30);

    fn march_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn params(date: &str) -> ParameterSet {
        [("Date", date)].into_iter().collect()
    }

    #[test]
    fn test_new_scheduler_is_idle() {
        let scheduler = RefreshScheduler::new(INTERVAL);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.active_handle(), None);
        assert_eq!(scheduler.interval(), INTERVAL);
    }

    #[test]
    fn test_start_reports_started_timer() {
        let mut scheduler = RefreshScheduler::new(INTERVAL);
        let changes = scheduler.start();

        let handle = scheduler.active_handle().unwrap();
        assert_eq!(
            changes,
            vec![TimerChange::Started {
                handle,
                interval: INTERVAL
            }]
        );
    }

    #[test]
    fn test_restart_cancels_previous_timer_first() {
        let mut scheduler = RefreshScheduler::new(INTERVAL);
        scheduler.start();
        let first = scheduler.active_handle().unwrap();

        let changes = scheduler.start();
        let second = scheduler.active_handle().unwrap();

        assert_ne!(first, second);
        assert_eq!(changes[0], TimerChange::Cancelled { handle: first });
        assert!(matches!(changes[1], TimerChange::Started { handle, .. } if handle == second));
        assert_eq!(scheduler.stats().live_timers(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = RefreshScheduler::new(INTERVAL);
        assert!(scheduler.stop().is_empty());

        scheduler.start();
        assert_eq!(scheduler.stop().len(), 1);
        assert!(scheduler.stop().is_empty());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.stats().live_timers(), 0);
    }

    #[test]
    fn test_tick_outcomes() {
        let mut scheduler = RefreshScheduler::new(INTERVAL);
        scheduler.start();
        let old = scheduler.active_handle().unwrap();
        scheduler.start();
        let live = scheduler.active_handle().unwrap();

        assert_eq!(scheduler.on_tick(old, false), TickOutcome::Stale);
        assert_eq!(scheduler.on_tick(live, true), TickOutcome::SkippedHidden);
        assert_eq!(scheduler.on_tick(live, false), TickOutcome::Reload);
        assert!(scheduler.is_running(), "hidden ticks keep the timer alive");

        let stats = scheduler.stats();
        assert_eq!(stats.reload_ticks, 1);
        assert_eq!(stats.skipped_ticks, 1);
    }

    #[test]
    fn test_tick_after_stop_is_stale() {
        let mut scheduler = RefreshScheduler::new(INTERVAL);
        scheduler.start();
        let handle = scheduler.active_handle().unwrap();
        scheduler.stop();
        assert_eq!(scheduler.on_tick(handle, false), TickOutcome::Stale);
    }

    #[test]
    fn test_reconcile_follows_policy() {
        let mut scheduler = RefreshScheduler::new(INTERVAL);

        let (policy, _) = scheduler.reconcile(&params("3/15/2024"), false, march_15());
        assert_eq!(policy, RefreshPolicy::Active);
        assert!(scheduler.is_running());

        let (policy, changes) = scheduler.reconcile(&params("3/16/2024"), false, march_15());
        assert_eq!(policy, RefreshPolicy::Inactive);
        assert!(!scheduler.is_running());
        assert!(matches!(changes.as_slice(), [TimerChange::Cancelled { .. }]));

        let (policy, changes) = scheduler.reconcile(&params("3/15/2024"), true, march_15());
        assert_eq!(policy, RefreshPolicy::Inactive);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_repeated_reconcile_never_exceeds_one_live_timer() {
        let mut scheduler = RefreshScheduler::new(INTERVAL);
        let dates = ["3/15/2024", "3/15/2024", "1/1/2024", "3/15/2024", "bad", "3/15/2024"];

        for (index, date) in dates.iter().enumerate() {
            scheduler.reconcile(&params(date), index % 4 == 3, march_15());
            assert!(scheduler.stats().live_timers() <= 1);
        }
    }
}
