//! Process-level log events shared by every front end.

use tracing::{error, info, warn};

use crate::errors::WidgetSyncError;
use crate::runtime::SessionSummary;

pub fn log_command_started(command: &str) {
    info!(
        event = "core.app.command_started",
        command = command,
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_session_ended(summary: &SessionSummary) {
    info!(
        event = "core.app.session_ended",
        events_dispatched = summary.events_dispatched,
        refresh_ticks = summary.refresh_ticks,
        reloads_requested = summary.reloads_requested
    );
}

/// Log a failure at warn level when the user caused it, error level otherwise.
pub fn log_failure(failure: &dyn WidgetSyncError) {
    if failure.is_user_error() {
        warn!(
            event = "core.app.user_error",
            error = %failure,
            error_code = failure.error_code()
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %failure,
            error_code = failure.error_code()
        );
    }
}
