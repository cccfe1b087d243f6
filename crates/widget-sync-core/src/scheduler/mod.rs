//! Auto-refresh scheduling.
//!
//! The scheduler is a pure state machine (`Idle -> Running -> Idle`); it does
//! not sleep. The async runtime mirrors each [`TimerChange`] with a real
//! interval and feeds ticks back through [`RefreshScheduler::on_tick`].

pub mod refresh;
pub mod types;

pub use refresh::RefreshScheduler;
pub use types::{
    RefreshPolicy, SchedulerState, SchedulerStats, TickOutcome, TimerChange, TimerHandle,
};
