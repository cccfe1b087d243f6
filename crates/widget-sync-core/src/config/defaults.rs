//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::{TemplateConfig, TimingConfig, WidgetSettings};

/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_widget_id() -> String {
    "NewPersonWidget".to_string()
}

pub fn default_stored_procedure() -> String {
    "api_custom_NewPersonWidget".to_string()
}

pub fn default_component() -> String {
    "CustomWidget".to_string()
}

pub fn default_host() -> String {
    "mcleanbible".to_string()
}

pub fn default_debug() -> bool {
    true
}

pub fn default_hosted_domain() -> String {
    "new-person-widget.vercel.app".to_string()
}

pub fn default_hosted_path() -> String {
    "/Template/widget.html".to_string()
}

pub fn default_external_url() -> String {
    "https://new-person-widget.vercel.app//Template/widget.html".to_string()
}

/// Returns the default auto-refresh period (30000ms).
pub fn default_refresh_interval_ms() -> u64 {
    30_000
}

/// Returns the default reload-hook polling period (50ms).
pub fn default_reload_poll_interval_ms() -> u64 {
    50
}

/// Returns the default polling budget (200 attempts, ten seconds at 50ms).
pub fn default_reload_poll_max_attempts() -> u32 {
    200
}

/// Returns the default delay between the ready signal and picker binding (100ms).
pub fn default_ready_delay_ms() -> u64 {
    100
}

/// Local-development template path derived from the widget id.
///
/// The first `Widget` in the id is dropped: `NewPersonWidget` maps to
/// `/CustomWidgets/NewPerson/Template/widget.html`.
pub fn default_local_dev_path(widget_id: &str) -> String {
    format!(
        "/CustomWidgets/{}/Template/widget.html",
        widget_id.replacen("Widget", "", 1)
    )
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            id: default_widget_id(),
            stored_procedure: default_stored_procedure(),
            component: default_component(),
            host: default_host(),
            require_user: false,
            cache: false,
            debug: default_debug(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            local_dev_path: None,
            hosted_domain: default_hosted_domain(),
            hosted_path: default_hosted_path(),
            external_url: default_external_url(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
            reload_poll_interval_ms: default_reload_poll_interval_ms(),
            reload_poll_max_attempts: default_reload_poll_max_attempts(),
            ready_delay_ms: default_ready_delay_ms(),
        }
    }
}
