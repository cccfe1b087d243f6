use tracing::warn;
use url::Url;

use widget_sync_core::page::{MemoryPage, Picker};
use widget_sync_core::{PageUrlError, WidgetSyncConfig, WidgetSyncError, events};

/// Load the config hierarchy, falling back to defaults with a warning.
pub fn load_config_with_warning() -> WidgetSyncConfig {
    match WidgetSyncConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.widget-sync/config.toml and ./.widget-sync/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                error_code = e.error_code(),
                "Config load failed, using defaults"
            );
            WidgetSyncConfig::default()
        }
    }
}

pub fn parse_page_url(raw: &str) -> Result<Url, PageUrlError> {
    Url::parse(raw).map_err(|source| {
        let err = PageUrlError::InvalidUrl {
            url: raw.to_string(),
            source,
        };
        events::log_failure(&err);
        err
    })
}

/// A page with the widget container and both pickers mounted.
pub fn mounted_page(config: &WidgetSyncConfig, hidden: bool) -> MemoryPage {
    let mut page = MemoryPage::new()
        .with_container(config.widget.container_id())
        .with_picker(Picker::Date)
        .with_picker(Picker::Event);
    page.set_hidden(hidden);
    page
}
