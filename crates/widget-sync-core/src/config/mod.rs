//! # Configuration System
//!
//! Hierarchical TOML configuration for widget-sync.
//!
//! ## Configuration Hierarchy
//!
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.widget-sync/config.toml`
//! 3. **Project config** - `./.widget-sync/config.toml`
//!
//! ## Usage Example
//!
//! ```toml
//! # ./.widget-sync/config.toml
//! [widget]
//! id = "NewPersonWidget"
//! stored_procedure = "api_custom_NewPersonWidget"
//!
//! [timing]
//! refresh_interval_ms = 30000
//! ```
//!
//! ```rust,no_run
//! use widget_sync_core::config::WidgetSyncConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WidgetSyncConfig::load_hierarchy()?;
//!     println!("refreshing every {:?}", config.timing.refresh_interval());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{TemplateConfig, TimingConfig, WidgetSettings, WidgetSyncConfig};
pub use validation::validate_config;

impl WidgetSyncConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
