use std::cell::RefCell;
use std::time::Duration;

use clap::ArgMatches;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use widget_sync_core::controller::Effect;
use widget_sync_core::page::{MemoryHistory, SharedHost};
use widget_sync_core::scheduler::TimerChange;
use widget_sync_core::{
    LocalClock, PageEvent, TimerHandle, WidgetController, events, run_session_with,
};

use super::helpers::{load_config_with_warning, mounted_page, parse_page_url};

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionInput {
    Event(PageEvent),
    Status,
    Quit,
}

fn parse_input(line: &str, default_widget_id: &str) -> Result<Option<SessionInput>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    let input = match (command, argument) {
        ("date", Some(value)) => SessionInput::Event(PageEvent::DatePicked {
            value: value.to_string(),
        }),
        ("date", None) => return Err("usage: date YYYY-MM-DD".to_string()),
        ("event", Some("none")) | ("event", None) => {
            SessionInput::Event(PageEvent::EventPicked { event_id: None })
        }
        ("event", Some(id)) => SessionInput::Event(PageEvent::EventPicked {
            event_id: Some(id.to_string()),
        }),
        ("hide", _) => SessionInput::Event(PageEvent::VisibilityChanged { hidden: true }),
        ("show", _) => SessionInput::Event(PageEvent::VisibilityChanged { hidden: false }),
        ("ready", id) => SessionInput::Event(PageEvent::WidgetReady {
            widget_id: id.unwrap_or(default_widget_id).to_string(),
        }),
        ("status", _) => SessionInput::Status,
        ("quit" | "exit", _) => SessionInput::Quit,
        (other, _) => return Err(format!("unknown command '{other}'")),
    };

    Ok(Some(input))
}

/// What the session looks like from the outside, rebuilt from effects.
#[derive(Debug, Default)]
struct SessionView {
    url: String,
    timer: Option<TimerHandle>,
    hidden: bool,
    reloads: u64,
}

impl SessionView {
    fn record(&mut self, event: &PageEvent, effects: &[Effect]) {
        if let PageEvent::VisibilityChanged { hidden } = event {
            self.hidden = *hidden;
        }
        for effect in effects {
            match effect {
                Effect::Timer(TimerChange::Started { handle, .. }) => self.timer = Some(*handle),
                Effect::Timer(TimerChange::Cancelled { handle }) => {
                    if self.timer == Some(*handle) {
                        self.timer = None;
                    }
                }
                Effect::UrlReplaced { url } => self.url = url.clone(),
                Effect::ReloadRequested => self.reloads += 1,
                _ => {}
            }
        }
    }

    fn status_line(&self) -> String {
        let timer = match self.timer {
            Some(handle) => format!("running ({handle})"),
            None => "idle".to_string(),
        };
        let visibility = if self.hidden { "hidden" } else { "visible" };
        format!(
            "url={} refresh={} page={} reloads={}",
            self.url, timer, visibility, self.reloads
        )
    }
}

fn describe_event(event: &PageEvent) -> String {
    match event {
        PageEvent::PageLoaded => "page loaded".to_string(),
        PageEvent::WidgetReady { widget_id } => format!("widget ready: {widget_id}"),
        PageEvent::ReadyDelayElapsed => "pickers mounted".to_string(),
        PageEvent::DatePicked { value } => format!("date picked: {value}"),
        PageEvent::EventPicked { event_id: Some(id) } => format!("event picked: {id}"),
        PageEvent::EventPicked { event_id: None } => "event cleared".to_string(),
        PageEvent::VisibilityChanged { hidden: true } => "page hidden".to_string(),
        PageEvent::VisibilityChanged { hidden: false } => "page visible".to_string(),
        PageEvent::RefreshTick { handle } => format!("refresh tick ({handle})"),
        PageEvent::ReloadHookPoll => "reload hook check".to_string(),
    }
}

fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::Timer(TimerChange::Started { handle, interval }) => {
            format!("refresh timer {handle} started every {}s", interval.as_secs_f64())
        }
        Effect::Timer(TimerChange::Cancelled { handle }) => {
            format!("refresh timer {handle} cancelled")
        }
        Effect::AwaitReloadHook { interval } => {
            format!("waiting for reload hook (every {}ms)", interval.as_millis())
        }
        Effect::ReloadHookSettled { status } => format!("reload hook wait ended: {status:?}"),
        Effect::ScheduleReadyDelay { delay } => {
            format!("mounting pickers in {}ms", delay.as_millis())
        }
        Effect::MarkupWritten => "widget markup rebuilt".to_string(),
        Effect::UrlReplaced { url } => format!("url -> {url}"),
        Effect::ReloadRequested => "widget reload requested".to_string(),
    }
}

pub(crate) fn handle_simulate_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw_url = matches
        .get_one::<String>("url")
        .ok_or("URL argument is required")?;
    let hook_delay_ms = matches.get_one::<u64>("hook-delay-ms").copied().unwrap_or(0);

    let url = parse_page_url(raw_url)?;
    let config = load_config_with_warning();
    let widget_id = config.widget.id.clone();

    info!(
        event = "cli.simulate.started",
        url = raw_url.as_str(),
        widget_id = widget_id.as_str(),
        hook_delay_ms = hook_delay_ms
    );

    let host = SharedHost::new(hook_delay_ms == 0);
    let mut controller = WidgetController::new(
        &config,
        mounted_page(&config, false),
        MemoryHistory::new(url.clone()),
        host.clone(),
        LocalClock,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let view = RefCell::new(SessionView {
        url: url.to_string(),
        ..SessionView::default()
    });

    let result = runtime.block_on(async {
        let (tx, rx) = mpsc::channel(32);
        let shutdown = CancellationToken::new();
        let input_closed = CancellationToken::new();
        tx.send(PageEvent::PageLoaded).await?;

        let observer = |event: &PageEvent, effects: &[Effect]| {
            view.borrow_mut().record(event, effects);
            if effects.is_empty() {
                return;
            }
            println!("{}", describe_event(event));
            for effect in effects {
                println!("  {}", describe_effect(effect));
            }
        };

        let host_becomes_ready = async {
            if hook_delay_ms == 0 {
                return;
            }
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(hook_delay_ms)) => {
                    host.set_ready(true);
                    info!(event = "cli.simulate.host_ready", hook_delay_ms = hook_delay_ms);
                }
                _ = input_closed.cancelled() => {
                    debug!(event = "cli.simulate.host_delay_abandoned");
                }
            }
        };

        let read_commands = async {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!(event = "cli.simulate.stdin_failed", error = %e);
                        shutdown.cancel();
                        break;
                    }
                };

                match parse_input(&line, &widget_id) {
                    Ok(None) => {}
                    Ok(Some(SessionInput::Event(event))) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Ok(Some(SessionInput::Status)) => println!("{}", view.borrow().status_line()),
                    Ok(Some(SessionInput::Quit)) => break,
                    Err(message) => {
                        eprintln!("{message}");
                        warn!(event = "cli.simulate.input_rejected", line = line.as_str());
                    }
                }
            }
            // Closing the channel ends the session once queued events drain
            drop(tx);
            input_closed.cancel();
        };

        let (summary, (), ()) = tokio::join!(
            run_session_with(&mut controller, rx, shutdown.clone(), observer),
            host_becomes_ready,
            read_commands
        );

        Ok::<_, Box<dyn std::error::Error>>(summary)
    });

    // Blocking stdin reads cannot be interrupted; don't wait on them
    runtime.shutdown_background();
    let summary = result?;

    println!(
        "Session ended: {} events, {} refresh ticks, {} reloads",
        summary.events_dispatched, summary.refresh_ticks, summary.reloads_requested
    );

    events::log_session_ended(&summary);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_events() {
        assert_eq!(
            parse_input("date 2024-03-15", "W").unwrap(),
            Some(SessionInput::Event(PageEvent::DatePicked {
                value: "2024-03-15".to_string()
            }))
        );
        assert_eq!(
            parse_input("event 42", "W").unwrap(),
            Some(SessionInput::Event(PageEvent::EventPicked {
                event_id: Some("42".to_string())
            }))
        );
        assert_eq!(
            parse_input("event none", "W").unwrap(),
            Some(SessionInput::Event(PageEvent::EventPicked { event_id: None }))
        );
        assert_eq!(
            parse_input("  hide ", "W").unwrap(),
            Some(SessionInput::Event(PageEvent::VisibilityChanged { hidden: true }))
        );
    }

    #[test]
    fn test_parse_input_ready_defaults_to_configured_widget() {
        assert_eq!(
            parse_input("ready", "NewPersonWidget").unwrap(),
            Some(SessionInput::Event(PageEvent::WidgetReady {
                widget_id: "NewPersonWidget".to_string()
            }))
        );
        assert_eq!(
            parse_input("ready OtherWidget", "NewPersonWidget").unwrap(),
            Some(SessionInput::Event(PageEvent::WidgetReady {
                widget_id: "OtherWidget".to_string()
            }))
        );
    }

    #[test]
    fn test_parse_input_control_lines() {
        assert_eq!(parse_input("", "W").unwrap(), None);
        assert_eq!(parse_input("status", "W").unwrap(), Some(SessionInput::Status));
        assert_eq!(parse_input("quit", "W").unwrap(), Some(SessionInput::Quit));
        assert!(parse_input("date", "W").is_err());
        assert!(parse_input("reload", "W").unwrap_err().contains("reload"));
    }

    #[test]
    fn test_session_view_tracks_timer_and_url() {
        let mut view = SessionView::default();
        view.record(
            &PageEvent::PageLoaded,
            &[
                Effect::MarkupWritten,
                Effect::UrlReplaced {
                    url: "https://example.org/?@Date=10/19/2026".to_string(),
                },
                Effect::Timer(TimerChange::Started {
                    handle: TimerHandle(1),
                    interval: Duration::from_secs(30),
                }),
                Effect::ReloadRequested,
            ],
        );
        assert_eq!(view.timer, Some(TimerHandle(1)));
        assert_eq!(view.reloads, 1);
        assert!(view.status_line().contains("running (timer-1)"));

        view.record(
            &PageEvent::VisibilityChanged { hidden: true },
            &[Effect::Timer(TimerChange::Cancelled {
                handle: TimerHandle(1),
            })],
        );
        assert_eq!(view.timer, None);
        let status = view.status_line();
        assert!(status.contains("refresh=idle"));
        assert!(status.contains("page=hidden"));
        assert!(status.contains("url=https://example.org/?@Date=10/19/2026"));
    }

    #[test]
    fn test_session_view_ignores_stale_cancel() {
        let mut view = SessionView {
            timer: Some(TimerHandle(2)),
            ..SessionView::default()
        };
        view.record(
            &PageEvent::ReloadHookPoll,
            &[Effect::Timer(TimerChange::Cancelled {
                handle: TimerHandle(1),
            })],
        );
        assert_eq!(view.timer, Some(TimerHandle(2)));
    }
}
