use std::process::ExitCode;

use widget_sync_core::init_logging;

mod app;
mod commands;

fn main() -> ExitCode {
    let matches = app::build_cli().get_matches();

    // Only errors are logged unless -v is given; stdout carries command output
    init_logging(!matches.get_flag("verbose"));

    match commands::run_command(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
