use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use widget_sync_core::page::{History, MemoryHistory, SharedHost};
use widget_sync_core::{
    Dispatch, HostEnvironment, LocalClock, PageEvent, RefreshPolicy, WidgetConfig,
    WidgetController,
};

use super::helpers::{load_config_with_warning, mounted_page, parse_page_url};

#[derive(Serialize)]
struct RenderOutput {
    environment: HostEnvironment,
    url: String,
    policy: RefreshPolicy,
    widget: WidgetConfig,
    markup: String,
}

pub(crate) fn handle_render_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw_url = matches
        .get_one::<String>("url")
        .ok_or("URL argument is required")?;
    let hidden = matches.get_flag("hidden");
    let json_output = matches.get_flag("json");

    info!(event = "cli.render_started", url = raw_url.as_str(), hidden = hidden);

    let url = parse_page_url(raw_url)?;
    let config = load_config_with_warning();
    let container_id = config.widget.container_id();

    let mut controller = WidgetController::new(
        &config,
        mounted_page(&config, hidden),
        MemoryHistory::new(url),
        SharedHost::new(true),
        LocalClock,
    );
    let effects = controller.dispatch(PageEvent::PageLoaded);

    let output = RenderOutput {
        environment: controller.builder().environment(),
        url: controller.history().current_url().to_string(),
        policy: controller.policy(),
        widget: controller.widget_config(),
        markup: controller
            .page()
            .container_markup(&container_id)
            .unwrap_or_default()
            .to_string(),
    };

    info!(
        event = "cli.render_completed",
        effects = effects.len(),
        policy = ?output.policy
    );

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", output.markup);
    println!();
    println!("URL:          {}", output.url);
    println!("Template:     {}", output.widget.template);
    println!(
        "Auto-refresh: {}",
        match output.policy {
            RefreshPolicy::Active => "active",
            RefreshPolicy::Inactive => "inactive",
        }
    );

    Ok(())
}
