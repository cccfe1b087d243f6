use std::io::Write;

use clap::ArgMatches;
use clap_complete::Shell;

use crate::app::build_cli;

/// Write the completion script for `shell`, named after the CLI itself.
fn write_completions(shell: Shell, out: &mut impl Write) {
    let mut cmd = build_cli();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
}

pub(crate) fn handle_completions_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let shell = matches
        .get_one::<Shell>("shell")
        .ok_or("Shell argument is required")?;

    write_completions(*shell, &mut std::io::stdout().lock());

    Ok(())
}
