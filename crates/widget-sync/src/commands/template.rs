use clap::ArgMatches;
use tracing::info;

use widget_sync_core::HostEnvironment;
use widget_sync_core::widget::resolve_template_path;

use super::helpers::load_config_with_warning;

fn environment_label(environment: HostEnvironment) -> &'static str {
    match environment {
        HostEnvironment::LocalDev => "local development",
        HostEnvironment::Hosted => "hosted",
        HostEnvironment::External => "external",
    }
}

pub(crate) fn handle_template_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let hostname = matches
        .get_one::<String>("hostname")
        .ok_or("Hostname argument is required")?;

    let config = load_config_with_warning();
    let (environment, path) =
        resolve_template_path(hostname, &config.widget.id, &config.template);

    info!(
        event = "cli.template_completed",
        hostname = hostname.as_str(),
        environment = ?environment,
        path = path.as_str()
    );

    println!("Environment: {}", environment_label(environment));
    println!("Template:    {path}");

    Ok(())
}
