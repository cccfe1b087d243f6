//! Single-threaded session loop.
//!
//! Feeds page events into a [`Dispatch`] implementation one at a time and
//! turns the returned timer and hook effects into tokio intervals and sleeps.
//! Run it on a current-thread runtime; nothing here is shared across threads.

use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::controller::{Dispatch, Effect, PageEvent};
use crate::scheduler::{TimerChange, TimerHandle};

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub events_dispatched: u64,
    pub refresh_ticks: u64,
    pub reloads_requested: u64,
}

struct RefreshTimer {
    handle: TimerHandle,
    interval: Interval,
}

enum Wakeup {
    Shutdown,
    Event(PageEvent),
    ReadyDelay,
}

fn periodic(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn next_refresh(timer: &mut Option<RefreshTimer>) -> TimerHandle {
    match timer {
        Some(timer) => {
            timer.interval.tick().await;
            timer.handle
        }
        None => pending().await,
    }
}

async fn next_poll(poll: &mut Option<Interval>) {
    match poll {
        Some(interval) => {
            interval.tick().await;
        }
        None => pending().await,
    }
}

async fn ready_delay_elapsed(delay: &mut Option<Pin<Box<Sleep>>>) {
    match delay {
        Some(sleep) => sleep.as_mut().await,
        None => pending().await,
    }
}

/// Runtime-side mirror of the controller's timers.
#[derive(Default)]
struct Timers {
    refresh: Option<RefreshTimer>,
    hook_poll: Option<Interval>,
    ready_delay: Option<Pin<Box<Sleep>>>,
}

impl Timers {
    fn apply(&mut self, effects: &[Effect], summary: &mut SessionSummary) {
        for effect in effects {
            match effect {
                Effect::Timer(TimerChange::Started { handle, interval }) => {
                    self.refresh = Some(RefreshTimer {
                        handle: *handle,
                        interval: periodic(*interval),
                    });
                }
                Effect::Timer(TimerChange::Cancelled { handle }) => {
                    if self.refresh.as_ref().map(|t| t.handle) == Some(*handle) {
                        self.refresh = None;
                    }
                }
                Effect::AwaitReloadHook { interval } => {
                    self.hook_poll = Some(periodic(*interval));
                }
                Effect::ReloadHookSettled { status } => {
                    debug!(event = "core.runtime.hook_poll_stopped", status = ?status);
                    self.hook_poll = None;
                }
                Effect::ScheduleReadyDelay { delay } => {
                    self.ready_delay = Some(Box::pin(tokio::time::sleep(*delay)));
                }
                Effect::ReloadRequested => summary.reloads_requested += 1,
                Effect::MarkupWritten | Effect::UrlReplaced { .. } => {}
            }
        }
    }
}

/// Run a session until `shutdown` fires or the event channel closes.
pub async fn run_session<D: Dispatch>(
    controller: &mut D,
    events: mpsc::Receiver<PageEvent>,
    shutdown: CancellationToken,
) -> SessionSummary {
    run_session_with(controller, events, shutdown, |_, _| {}).await
}

/// Like [`run_session`], calling `observer` after every dispatch.
pub async fn run_session_with<D, F>(
    controller: &mut D,
    mut events: mpsc::Receiver<PageEvent>,
    shutdown: CancellationToken,
    mut observer: F,
) -> SessionSummary
where
    D: Dispatch,
    F: FnMut(&PageEvent, &[Effect]),
{
    info!(event = "core.runtime.session_started");

    let mut timers = Timers::default();
    let mut summary = SessionSummary::default();

    loop {
        let wakeup = tokio::select! {
            biased;
            _ = shutdown.cancelled() => Wakeup::Shutdown,
            event = events.recv() => match event {
                Some(event) => Wakeup::Event(event),
                None => Wakeup::Shutdown,
            },
            _ = ready_delay_elapsed(&mut timers.ready_delay) => Wakeup::ReadyDelay,
            _ = next_poll(&mut timers.hook_poll) => Wakeup::Event(PageEvent::ReloadHookPoll),
            handle = next_refresh(&mut timers.refresh) => {
                summary.refresh_ticks += 1;
                Wakeup::Event(PageEvent::RefreshTick { handle })
            }
        };

        let event = match wakeup {
            Wakeup::Shutdown => break,
            Wakeup::Event(event) => event,
            Wakeup::ReadyDelay => {
                timers.ready_delay = None;
                PageEvent::ReadyDelayElapsed
            }
        };

        let effects = controller.dispatch(event.clone());
        summary.events_dispatched += 1;
        timers.apply(&effects, &mut summary);
        observer(&event, &effects);
    }

    info!(
        event = "core.runtime.session_completed",
        events_dispatched = summary.events_dispatched,
        refresh_ticks = summary.refresh_ticks,
        reloads_requested = summary.reloads_requested
    );

    summary
}
