use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::dates;
use crate::params::{ParamKey, ParameterSet};

/// Identifies one recurring refresh timer.
///
/// Handles are never reused, so a tick carrying an old handle can be told
/// apart from a tick of the live timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerState {
    Idle,
    Running(TimerHandle),
}

/// A change to the live timer that the runtime must mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerChange {
    Started {
        handle: TimerHandle,
        interval: Duration,
    },
    Cancelled {
        handle: TimerHandle,
    },
}

/// What a timer tick should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The live timer fired while the page is visible.
    Reload,
    /// The live timer fired while the page is hidden; the timer keeps running.
    SkippedHidden,
    /// The tick belongs to a timer that was already cancelled.
    Stale,
}

/// Whether auto-refresh should be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    Active,
    Inactive,
}

impl RefreshPolicy {
    /// Active exactly when the `Date` parameter is `today` and the page is visible.
    pub fn derive(params: &ParameterSet, hidden: bool, today: NaiveDate) -> Self {
        if !hidden && dates::is_today(params.get_key(ParamKey::Date), today) {
            RefreshPolicy::Active
        } else {
            RefreshPolicy::Inactive
        }
    }
}

/// Start/cancel counters.
///
/// `starts - cancels` is the number of live timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub starts: u64,
    pub cancels: u64,
    pub reload_ticks: u64,
    pub skipped_ticks: u64,
}

impl SchedulerStats {
    pub fn live_timers(&self) -> u64 {
        self.starts - self.cancels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_policy_active_only_for_visible_today() {
        let params: ParameterSet = [("Date", "3/15/2024")].into_iter().collect();
        assert_eq!(
            RefreshPolicy::derive(&params, false, march_15()),
            RefreshPolicy::Active
        );
        assert_eq!(
            RefreshPolicy::derive(&params, true, march_15()),
            RefreshPolicy::Inactive
        );
    }

    #[test]
    fn test_policy_inactive_for_other_or_missing_dates() {
        let other: ParameterSet = [("Date", "3/14/2024")].into_iter().collect();
        assert_eq!(
            RefreshPolicy::derive(&other, false, march_15()),
            RefreshPolicy::Inactive
        );
        assert_eq!(
            RefreshPolicy::derive(&ParameterSet::new(), false, march_15()),
            RefreshPolicy::Inactive
        );
    }

    #[test]
    fn test_policy_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RefreshPolicy::Active).unwrap(),
            "\"active\""
        );
    }
}
