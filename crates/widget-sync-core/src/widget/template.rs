use tracing::debug;

use crate::config::TemplateConfig;
use crate::config::defaults::default_local_dev_path;

use super::types::HostEnvironment;

/// Classify the page's hostname.
pub fn detect_environment(hostname: &str, template: &TemplateConfig) -> HostEnvironment {
    if hostname.contains("localhost") || hostname.contains("127.0.0.1") {
        HostEnvironment::LocalDev
    } else if !template.hosted_domain.is_empty() && hostname.contains(&template.hosted_domain) {
        HostEnvironment::Hosted
    } else {
        HostEnvironment::External
    }
}

/// Template path for the widget on `hostname`.
pub fn resolve_template_path(
    hostname: &str,
    widget_id: &str,
    template: &TemplateConfig,
) -> (HostEnvironment, String) {
    let environment = detect_environment(hostname, template);
    let path = match environment {
        HostEnvironment::LocalDev => template
            .local_dev_path
            .clone()
            .unwrap_or_else(|| default_local_dev_path(widget_id)),
        HostEnvironment::Hosted => template.hosted_path.clone(),
        HostEnvironment::External => template.external_url.clone(),
    };

    debug!(
        event = "core.widget.template_resolved",
        hostname = hostname,
        environment = ?environment,
        path = path
    );

    (environment, path)
}
