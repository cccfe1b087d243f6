use serde::{Deserialize, Serialize};

use crate::escape::html_attr_escape;

/// Deployment environment inferred from the page hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEnvironment {
    LocalDev,
    Hosted,
    External,
}

/// Attributes written onto the widget's mount element.
///
/// Always rebuilt from the current parameters, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub widget_id: String,
    pub component: String,
    pub stored_procedure: String,
    /// Serialized parameters with the `@` prefix.
    pub params: String,
    pub template: String,
    pub require_user: bool,
    pub cache: bool,
    pub host: String,
    pub debug: bool,
}

impl WidgetConfig {
    /// Render the mount element.
    pub fn to_markup(&self) -> String {
        let attrs = [
            ("id", self.widget_id.clone()),
            ("data-component", self.component.clone()),
            ("data-sp", self.stored_procedure.clone()),
            ("data-params", self.params.clone()),
            ("data-template", self.template.clone()),
            ("data-requireUser", self.require_user.to_string()),
            ("data-cache", self.cache.to_string()),
            ("data-host", self.host.clone()),
            ("data-debug", self.debug.to_string()),
        ];

        let rendered = attrs
            .iter()
            .map(|(name, value)| format!("{name}=\"{}\"", html_attr_escape(value)))
            .collect::<Vec<_>>()
            .join("\n     ");

        format!("<div {rendered}></div>")
    }
}
