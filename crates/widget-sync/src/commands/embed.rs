use clap::ArgMatches;
use tracing::info;

use widget_sync_core::embed::{self, EmbedConfig};
use widget_sync_core::params;

pub(crate) fn handle_embed_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EmbedConfig::default();
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(name) = matches.get_one::<String>("name") {
        if name.trim().is_empty() {
            return Err("Widget name cannot be empty".into());
        }
        config.widget_name = name.clone();
    }
    let data_params = matches.get_one::<String>("params").map(String::as_str);

    let plan = embed::plan(&config, data_params);

    info!(
        event = "cli.embed_completed",
        embed_id = plan.embed_id.as_str(),
        params = plan.params.len()
    );

    println!("{}", plan.to_html());
    if !plan.params.is_empty() {
        println!();
        println!(
            "<!-- data-params: {} -->",
            params::serialize(&plan.params, true)
        );
    }

    Ok(())
}
