//! Widget mount-element configuration and the reload-hook wait.

pub mod builder;
pub mod reload;
pub mod template;
pub mod types;

pub use builder::WidgetConfigBuilder;
pub use reload::{HookStatus, ReloadHookWait};
pub use template::{detect_environment, resolve_template_path};
pub use types::{HostEnvironment, WidgetConfig};
