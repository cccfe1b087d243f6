//! widget-sync-core: keeps an embedded widget's parameters, URL and
//! auto-refresh timer in step.
//!
//! The page, address bar and widget host are injected capabilities, so the
//! engine runs the same under a real DOM binding, the CLI, or tests.
//!
//! # Main Entry Points
//!
//! - [`controller`] - Consume page events, produce effects
//! - [`runtime`] - Drive a controller with real timers
//! - [`params`] - Parse and serialize `@key=value` parameter strings
//! - [`scheduler`] - Auto-refresh state machine
//! - [`config`] - Configuration management

pub mod config;
pub mod controller;
pub mod dates;
pub mod embed;
pub mod errors;
pub mod escape;
pub mod events;
pub mod logging;
pub mod page;
pub mod params;
pub mod runtime;
pub mod scheduler;
pub mod url_sync;
pub mod widget;

// Re-export commonly used types at crate root for convenience
pub use config::WidgetSyncConfig;
pub use controller::{Dispatch, Effect, PageEvent, WidgetController};
pub use dates::{Clock, FixedClock, LocalClock};
pub use errors::{ConfigError, PageUrlError, WidgetSyncError};
pub use page::{History, MemoryHistory, MemoryPage, Page, Picker, SharedHost, WidgetHost};
pub use params::{ParamKey, ParameterSet};
pub use runtime::{SessionSummary, run_session, run_session_with};
pub use scheduler::{RefreshPolicy, RefreshScheduler, SchedulerState, TimerHandle};
pub use widget::{HostEnvironment, WidgetConfig, WidgetConfigBuilder};

// Re-export logging initialization
pub use logging::init_logging;
