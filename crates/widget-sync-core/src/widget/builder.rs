use crate::config::{TemplateConfig, WidgetSettings};
use crate::params::{self, ParameterSet};

use super::template::resolve_template_path;
use super::types::{HostEnvironment, WidgetConfig};

/// Builds [`WidgetConfig`]s from parameters and static settings.
///
/// The template path is resolved once, from the hostname the builder was
/// created with.
#[derive(Debug, Clone)]
pub struct WidgetConfigBuilder {
    settings: WidgetSettings,
    environment: HostEnvironment,
    template_path: String,
}

impl WidgetConfigBuilder {
    pub fn new(settings: WidgetSettings, template: &TemplateConfig, hostname: &str) -> Self {
        let (environment, template_path) = resolve_template_path(hostname, &settings.id, template);
        Self {
            settings,
            environment,
            template_path,
        }
    }

    pub fn widget_id(&self) -> &str {
        &self.settings.id
    }

    pub fn container_id(&self) -> String {
        self.settings.container_id()
    }

    pub fn environment(&self) -> HostEnvironment {
        self.environment
    }

    pub fn template_path(&self) -> &str {
        &self.template_path
    }

    pub fn rebuild(&self, params: &ParameterSet) -> WidgetConfig {
        WidgetConfig {
            widget_id: self.settings.id.clone(),
            component: self.settings.component.clone(),
            stored_procedure: self.settings.stored_procedure.clone(),
            params: params::serialize(params, true),
            template: self.template_path.clone(),
            require_user: self.settings.require_user,
            cache: self.settings.cache,
            host: self.settings.host.clone(),
            debug: self.settings.debug,
        }
    }
}
