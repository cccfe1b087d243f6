use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::{TimingConfig, WidgetSyncConfig};
use crate::dates::{self, Clock, LocalClock};
use crate::page::{History, Page, Picker, WidgetHost};
use crate::params::{self, ParamKey, ParameterSet};
use crate::scheduler::{RefreshPolicy, RefreshScheduler, TickOutcome, TimerHandle};
use crate::url_sync;
use crate::widget::{HookStatus, ReloadHookWait, WidgetConfig, WidgetConfigBuilder};

use super::effects::Effect;
use super::events::PageEvent;
use super::store::Dispatch;

/// Keeps one widget's parameters, mount element, URL and refresh timer in step.
///
/// The in-memory [`ParameterSet`] is the single source of truth; the mount
/// element markup and the address bar are projections of it.
pub struct WidgetController<P, U, H, C = LocalClock> {
    page: P,
    history: U,
    host: H,
    clock: C,
    params: ParameterSet,
    scheduler: RefreshScheduler,
    builder: WidgetConfigBuilder,
    timing: TimingConfig,
    hidden: bool,
    bound_pickers: HashSet<Picker>,
    reload_wait: Option<ReloadHookWait>,
    bootstrapped: bool,
}

impl<P, U, H, C> WidgetController<P, U, H, C>
where
    P: Page,
    U: History,
    H: WidgetHost,
    C: Clock,
{
    /// Create a controller for the page currently at `history.current_url()`.
    ///
    /// The template path is resolved here, from the page hostname.
    pub fn new(config: &WidgetSyncConfig, page: P, history: U, host: H, clock: C) -> Self {
        let url = history.current_url();
        let hostname = url.host_str().unwrap_or_default();
        let builder = WidgetConfigBuilder::new(config.widget.clone(), &config.template, hostname);
        let hidden = page.is_hidden();

        Self {
            page,
            history,
            host,
            clock,
            params: ParameterSet::new(),
            scheduler: RefreshScheduler::new(config.timing.refresh_interval()),
            builder,
            timing: config.timing.clone(),
            hidden,
            bound_pickers: HashSet::new(),
            reload_wait: None,
            bootstrapped: false,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn history(&self) -> &U {
        &self.history
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn builder(&self) -> &WidgetConfigBuilder {
        &self.builder
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_bound(&self, picker: Picker) -> bool {
        self.bound_pickers.contains(&picker)
    }

    pub fn awaiting_reload_hook(&self) -> bool {
        self.reload_wait.is_some()
    }

    /// The refresh policy for the current state.
    pub fn policy(&self) -> RefreshPolicy {
        RefreshPolicy::derive(&self.params, self.hidden, self.clock.today())
    }

    /// The mount-element configuration for the current parameters.
    pub fn widget_config(&self) -> WidgetConfig {
        self.builder.rebuild(&self.params)
    }

    fn bootstrap(&mut self) -> Vec<Effect> {
        if self.bootstrapped {
            debug!(event = "core.controller.bootstrap_repeated");
            return Vec::new();
        }
        self.bootstrapped = true;
        self.hidden = self.page.is_hidden();

        let url = self.history.current_url();
        let mut params = url_sync::params_from_url(&url);
        if !params.contains(ParamKey::Date.as_str()) {
            let today = dates::format_param_date(self.clock.today());
            debug!(event = "core.controller.date_defaulted", date = today);
            params.set_key(ParamKey::Date, today);
        }
        self.params = params;

        info!(
            event = "core.controller.bootstrap_started",
            widget_id = self.builder.widget_id(),
            environment = ?self.builder.environment(),
            params = params::serialize(&self.params, true)
        );

        self.apply(true)
    }

    /// Full rebuild: clean, reconcile, write markup, sync URL, reload.
    ///
    /// Reconciliation happens before the markup is written so the timer
    /// never reflects stale parameters.
    fn apply(&mut self, bootstrap: bool) -> Vec<Effect> {
        self.params.clean();

        let (policy, changes) =
            self.scheduler
                .reconcile(&self.params, self.hidden, self.clock.today());
        let mut effects: Vec<Effect> = changes.into_iter().map(Effect::Timer).collect();

        let config = self.builder.rebuild(&self.params);
        let container_id = self.builder.container_id();
        if !self.page.replace_container(&container_id, &config.to_markup()) {
            warn!(
                event = "core.controller.container_missing",
                container_id = container_id
            );
            return effects;
        }
        effects.push(Effect::MarkupWritten);

        if bootstrap {
            self.page.show_loader();
        }

        let url = url_sync::sync(&self.params, &mut self.history);
        effects.push(Effect::UrlReplaced {
            url: url.to_string(),
        });

        if self.host.is_ready() {
            self.host.request_reload(self.builder.widget_id());
            effects.push(Effect::ReloadRequested);
            if self.reload_wait.take().is_some() {
                effects.push(Effect::ReloadHookSettled {
                    status: HookStatus::Ready,
                });
            }
        } else if bootstrap {
            debug!(event = "core.controller.reload_hook_pending");
            self.reload_wait = Some(ReloadHookWait::new(self.timing.reload_poll_max_attempts));
            effects.push(Effect::AwaitReloadHook {
                interval: self.timing.reload_poll_interval(),
            });
        }

        info!(
            event = "core.controller.rebuild_completed",
            params = config.params,
            policy = ?policy
        );

        effects
    }

    fn poll_reload_hook(&mut self) -> Vec<Effect> {
        let Some(wait) = self.reload_wait.as_mut() else {
            return Vec::new();
        };

        match wait.poll(&self.host) {
            HookStatus::Pending => Vec::new(),
            HookStatus::Ready => {
                self.reload_wait = None;
                self.host.request_reload(self.builder.widget_id());
                vec![
                    Effect::ReloadRequested,
                    Effect::ReloadHookSettled {
                        status: HookStatus::Ready,
                    },
                ]
            }
            HookStatus::TimedOut => {
                self.reload_wait = None;
                vec![Effect::ReloadHookSettled {
                    status: HookStatus::TimedOut,
                }]
            }
        }
    }

    fn widget_ready(&mut self, widget_id: &str) -> Vec<Effect> {
        if widget_id != self.builder.widget_id() {
            debug!(event = "core.controller.ready_ignored", widget_id = widget_id);
            return Vec::new();
        }

        info!(event = "core.controller.widget_ready", widget_id = widget_id);
        vec![Effect::ScheduleReadyDelay {
            delay: self.timing.ready_delay(),
        }]
    }

    /// Seed and bind the pickers that are mounted, then re-decide the timer.
    fn bind_pickers(&mut self) -> Vec<Effect> {
        for picker in [Picker::Date, Picker::Event] {
            if !self.page.has_picker(picker) {
                debug!(
                    event = "core.controller.picker_missing",
                    element_id = picker.element_id()
                );
                continue;
            }

            let value = match picker {
                Picker::Date => self
                    .params
                    .get_key(ParamKey::Date)
                    .and_then(dates::to_picker_format),
                Picker::Event => self.params.get_key(ParamKey::EventID).map(str::to_string),
            };
            if let Some(value) = value {
                self.page.set_picker_value(picker, &value);
            }

            if self.bound_pickers.insert(picker) {
                debug!(
                    event = "core.controller.picker_bound",
                    element_id = picker.element_id()
                );
            }
        }

        let (_, changes) = self
            .scheduler
            .reconcile(&self.params, self.hidden, self.clock.today());
        changes.into_iter().map(Effect::Timer).collect()
    }

    fn date_picked(&mut self, value: &str) -> Vec<Effect> {
        if !self.is_bound(Picker::Date) {
            debug!(event = "core.controller.date_picked_unbound");
            return Vec::new();
        }

        let Some(formatted) = dates::to_param_format(value) else {
            warn!(event = "core.controller.date_picked_invalid", value = value);
            return Vec::new();
        };

        info!(event = "core.controller.date_picked", date = formatted);
        self.params.set_key(ParamKey::Date, formatted);

        let mut effects: Vec<Effect> = self
            .scheduler
            .stop()
            .into_iter()
            .map(Effect::Timer)
            .collect();
        effects.extend(self.apply(false));
        effects
    }

    fn event_picked(&mut self, event_id: Option<&str>) -> Vec<Effect> {
        if !self.is_bound(Picker::Event) {
            debug!(event = "core.controller.event_picked_unbound");
            return Vec::new();
        }

        match event_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => {
                info!(event = "core.controller.event_selected", event_id = id);
                self.params.set_key(ParamKey::EventID, id);
            }
            None => {
                info!(event = "core.controller.event_cleared");
                self.params.remove(ParamKey::EventID.as_str());
            }
        }

        self.apply(false)
    }

    fn visibility_changed(&mut self, hidden: bool) -> Vec<Effect> {
        self.hidden = hidden;
        debug!(event = "core.controller.visibility_changed", hidden = hidden);

        let changes = if hidden {
            self.scheduler.stop()
        } else {
            self.scheduler
                .reconcile(&self.params, hidden, self.clock.today())
                .1
        };
        changes.into_iter().map(Effect::Timer).collect()
    }

    fn refresh_tick(&mut self, handle: TimerHandle) -> Vec<Effect> {
        match self.scheduler.on_tick(handle, self.hidden) {
            TickOutcome::Reload if self.host.is_ready() => {
                self.host.request_reload(self.builder.widget_id());
                vec![Effect::ReloadRequested]
            }
            TickOutcome::Reload => {
                debug!(event = "core.controller.tick_host_unavailable", handle = %handle);
                Vec::new()
            }
            TickOutcome::SkippedHidden | TickOutcome::Stale => Vec::new(),
        }
    }
}

impl<P, U, H, C> Dispatch for WidgetController<P, U, H, C>
where
    P: Page,
    U: History,
    H: WidgetHost,
    C: Clock,
{
    fn dispatch(&mut self, event: PageEvent) -> Vec<Effect> {
        debug!(event = "core.controller.dispatch_started", page_event = ?event);

        let effects = match event {
            PageEvent::PageLoaded => self.bootstrap(),
            PageEvent::WidgetReady { widget_id } => self.widget_ready(&widget_id),
            PageEvent::ReadyDelayElapsed => self.bind_pickers(),
            PageEvent::DatePicked { value } => self.date_picked(&value),
            PageEvent::EventPicked { event_id } => self.event_picked(event_id.as_deref()),
            PageEvent::VisibilityChanged { hidden } => self.visibility_changed(hidden),
            PageEvent::RefreshTick { handle } => self.refresh_tick(handle),
            PageEvent::ReloadHookPoll => self.poll_reload_hook(),
        };

        debug!(
            event = "core.controller.dispatch_completed",
            effect_count = effects.len()
        );
        effects
    }
}
