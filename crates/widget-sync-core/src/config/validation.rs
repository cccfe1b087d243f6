use crate::config::types::WidgetSyncConfig;
use crate::errors::ConfigError;

/// Validate the merged configuration.
pub fn validate_config(config: &WidgetSyncConfig) -> Result<(), ConfigError> {
    if config.widget.id.trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "widget.id cannot be empty".to_string(),
        });
    }

    if config.widget.stored_procedure.trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "widget.stored_procedure cannot be empty".to_string(),
        });
    }

    let timing = &config.timing;
    for (name, value) in [
        ("timing.refresh_interval_ms", timing.refresh_interval_ms),
        ("timing.reload_poll_interval_ms", timing.reload_poll_interval_ms),
        ("timing.ready_delay_ms", timing.ready_delay_ms),
    ] {
        if value == 0 {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("{name} must be greater than 0"),
            });
        }
    }

    if timing.reload_poll_max_attempts == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "timing.reload_poll_max_attempts must be greater than 0".to_string(),
        });
    }

    Ok(())
}
