use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use widget_sync_core::ParamKey;
use widget_sync_core::params;

#[derive(Serialize)]
struct ParamEntry<'a> {
    key: &'a str,
    value: &'a str,
    /// Whether the key is mirrored into the page URL.
    url_synced: bool,
}

#[derive(Serialize)]
struct ParamsOutput<'a> {
    params: Vec<ParamEntry<'a>>,
    serialized: String,
}

pub(crate) fn handle_params_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = matches
        .get_one::<String>("raw")
        .ok_or("Parameter string is required")?;
    let json_output = matches.get_flag("json");

    info!(event = "cli.params_started", raw = raw.as_str());

    let mut set = params::parse(raw);
    set.clean();
    let serialized = params::serialize(&set, true);

    info!(event = "cli.params_completed", count = set.len());

    if json_output {
        let output = ParamsOutput {
            params: set
                .iter()
                .map(|(key, value)| ParamEntry {
                    key,
                    value,
                    url_synced: ParamKey::from_name(key).is_some(),
                })
                .collect(),
            serialized,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if set.is_empty() {
        println!("No parameters.");
        return Ok(());
    }

    for (key, value) in set.iter() {
        if ParamKey::from_name(key).is_some() {
            println!("{key} = {value}");
        } else {
            println!("{key} = {value}  (not synced to URL)");
        }
    }
    println!();
    println!("Serialized: {serialized}");

    Ok(())
}
