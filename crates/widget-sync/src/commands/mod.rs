use clap::ArgMatches;
use tracing::error;

use widget_sync_core::events;

mod helpers;

mod completions;
mod embed;
mod params;
mod render;
mod simulate;
mod template;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_command_started(matches.subcommand_name().unwrap_or_default());

    match matches.subcommand() {
        Some(("params", sub_matches)) => params::handle_params_command(sub_matches),
        Some(("template", sub_matches)) => template::handle_template_command(sub_matches),
        Some(("render", sub_matches)) => render::handle_render_command(sub_matches),
        Some(("embed", sub_matches)) => embed::handle_embed_command(sub_matches),
        Some(("simulate", sub_matches)) => simulate::handle_simulate_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
