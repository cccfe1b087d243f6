//! Configuration type definitions for widget-sync.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [widget]
//! id = "NewPersonWidget"
//! stored_procedure = "api_custom_NewPersonWidget"
//! host = "mcleanbible"
//! debug = true
//!
//! [template]
//! hosted_domain = "new-person-widget.vercel.app"
//!
//! [timing]
//! refresh_interval_ms = 30000
//! reload_poll_interval_ms = 50
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.widget-sync/config.toml`
/// 2. Project config: `./.widget-sync/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WidgetSyncConfig {
    /// Static attributes written onto the widget mount element
    #[serde(default)]
    pub widget: WidgetSettings,

    /// Template path resolution per deployment environment
    #[serde(default)]
    pub template: TemplateConfig,

    /// Refresh and bootstrap timing
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Static widget attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Mount element id. The container is `<id>-container`.
    #[serde(default = "super::defaults::default_widget_id")]
    pub id: String,

    /// Stored-procedure identifier the host queries.
    #[serde(default = "super::defaults::default_stored_procedure")]
    pub stored_procedure: String,

    /// Component-type marker (`data-component`).
    #[serde(default = "super::defaults::default_component")]
    pub component: String,

    /// Host identifier string (`data-host`).
    #[serde(default = "super::defaults::default_host")]
    pub host: String,

    #[serde(default)]
    pub require_user: bool,

    #[serde(default)]
    pub cache: bool,

    #[serde(default = "super::defaults::default_debug")]
    pub debug: bool,
}

/// Template path per environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Path used on localhost / 127.0.0.1.
    /// Default: `/CustomWidgets/<widget id minus "Widget">/Template/widget.html`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_dev_path: Option<String>,

    /// Hostname fragment identifying the hosted deployment.
    #[serde(default = "super::defaults::default_hosted_domain")]
    pub hosted_domain: String,

    /// Path used on the hosted deployment.
    #[serde(default = "super::defaults::default_hosted_path")]
    pub hosted_path: String,

    /// Absolute URL used on every other host.
    #[serde(default = "super::defaults::default_external_url")]
    pub external_url: String,
}

/// Timer and polling settings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Auto-refresh period while today's date is selected.
    /// Default: 30000ms.
    #[serde(default = "super::defaults::default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Delay between reload-hook availability checks at bootstrap.
    /// Default: 50ms.
    #[serde(default = "super::defaults::default_reload_poll_interval_ms")]
    pub reload_poll_interval_ms: u64,

    /// Availability checks before giving up on the reload hook.
    /// Default: 200.
    #[serde(default = "super::defaults::default_reload_poll_max_attempts")]
    pub reload_poll_max_attempts: u32,

    /// Wait after the ready signal before binding pickers.
    /// Default: 100ms.
    #[serde(default = "super::defaults::default_ready_delay_ms")]
    pub ready_delay_ms: u64,
}

impl WidgetSettings {
    pub fn container_id(&self) -> String {
        format!("{}-container", self.id)
    }
}

impl TimingConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn reload_poll_interval(&self) -> Duration {
        Duration::from_millis(self.reload_poll_interval_ms)
    }

    pub fn ready_delay(&self) -> Duration {
        Duration::from_millis(self.ready_delay_ms)
    }
}
