//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.widget-sync/config.toml`
//! 3. **Project config** - `./.widget-sync/config.toml`
//!
//! Files are merged key by key before deserializing, so a project file that
//! only sets `[timing]` keeps the user's `[widget]` settings.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::types::WidgetSyncConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".widget-sync";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the user and project config files.
///
/// # Errors
///
/// Returns an error if a file exists but cannot be read or parsed, or if the
/// merged configuration fails validation. Missing files are not errors.
pub fn load_hierarchy() -> Result<WidgetSyncConfig, ConfigError> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_DIR).join(CONFIG_FILE));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(CONFIG_DIR).join(CONFIG_FILE));
    }
    load_from_paths(&paths)
}

/// Load and merge the given files in order; later files win.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<WidgetSyncConfig, ConfigError> {
    let mut merged = toml::Table::new();

    for path in paths {
        match load_table(path)? {
            Some(table) => {
                info!(event = "core.config.file_loaded", path = %path.display());
                merge_tables(&mut merged, table);
            }
            None => debug!(event = "core.config.file_missing", path = %path.display()),
        }
    }

    let config: WidgetSyncConfig = toml::Value::Table(merged).try_into().map_err(
        |e: toml::de::Error| ConfigError::ConfigParseError {
            path: paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            message: e.to_string(),
        },
    )?;

    validate_config(&config)?;
    Ok(config)
}

/// Read a TOML file, returning `None` when it does not exist.
fn load_table(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::IoError {
                path: path.display().to_string(),
                source,
            });
        }
    };

    content
        .parse::<toml::Table>()
        .map(Some)
        .map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Deep-merge `overlay` into `base`. Nested tables merge; other values replace.
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
