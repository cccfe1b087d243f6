//! Embed snippet generation.
//!
//! A host page includes one loader `<script>` carrying `data-params`; the
//! loader injects stylesheets, a container for the widget, and the host and
//! init scripts. [`plan`] computes all of that; [`EmbedPlan::to_html`]
//! renders it as static markup.

use serde::{Deserialize, Serialize};

use crate::escape::html_attr_escape;
use crate::params::{self, ParameterSet};

/// Inputs for an embed snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Asset base, with or without scheme (`new-person-widget.vercel.app/Assets`).
    pub base_url: String,
    /// Name used for element ids (`newPerson` gives `newPersonWidget`).
    pub widget_name: String,
    /// Init script file under `base_url`.
    pub init_script: String,
    /// Extra stylesheets loaded before `<base_url>/widget.css`.
    pub stylesheets: Vec<String>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            base_url: "new-person-widget.vercel.app/Assets".to_string(),
            widget_name: "newPerson".to_string(),
            init_script: "Widget.Init.js".to_string(),
            stylesheets: vec!["//use.fontawesome.com/releases/v5.0.7/css/all.css".to_string()],
        }
    }
}

/// Everything the loader injects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedPlan {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    /// Element the host page provides.
    pub embed_id: String,
    /// Markup written into the embed element.
    pub container_markup: String,
    /// Parameters read from the loader's `data-params`.
    pub params: ParameterSet,
}

/// Compute the embed plan for `config`, with the loader's raw `data-params`.
pub fn plan(config: &EmbedConfig, data_params: Option<&str>) -> EmbedPlan {
    let base = config.base_url.trim_end_matches('/');
    let name = &config.widget_name;

    let mut stylesheets = config.stylesheets.clone();
    stylesheets.push(format!("{base}/widget.css"));

    let scripts = vec![
        format!("{base}/CustomWidgets.js"),
        format!("{base}/{}", config.init_script),
    ];

    let container_markup = format!(
        "<div id=\"{}\" class=\"container\">\n  <div id=\"{}\"></div>\n</div>",
        html_attr_escape(&format!("{name}Container")),
        html_attr_escape(&format!("{name}Widget")),
    );

    let mut params = data_params.map(params::parse).unwrap_or_default();
    params.clean();

    EmbedPlan {
        stylesheets,
        scripts,
        embed_id: format!("{name}WidgetEmbed"),
        container_markup,
        params,
    }
}

impl EmbedPlan {
    /// Static HTML equivalent of what the loader injects at runtime.
    pub fn to_html(&self) -> String {
        let mut lines = Vec::new();
        for href in &self.stylesheets {
            lines.push(format!(
                "<link rel=\"stylesheet\" href=\"{}\">",
                html_attr_escape(href)
            ));
        }
        lines.push(format!(
            "<div id=\"{}\">\n{}\n</div>",
            html_attr_escape(&self.embed_id),
            self.container_markup
        ));
        for src in &self.scripts {
            lines.push(format!(
                "<script src=\"{}\" defer></script>",
                html_attr_escape(src)
            ));
        }
        lines.join("\n")
    }
}
