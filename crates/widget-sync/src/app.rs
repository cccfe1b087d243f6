use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("widget-sync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keep an embedded widget's parameters, URL and auto-refresh in sync")
        .long_about("widget-sync drives the widget synchronization engine outside a browser. It parses '@key=value' parameter strings, resolves widget templates per hosting environment, renders the widget mount element, prints embed snippets, and runs interactive page sessions with real refresh timers.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("params")
                .about("Parse a parameter string and print the cleaned pairs")
                .arg(
                    Arg::new("raw")
                        .help("Raw parameter string, e.g. '@EventTypeID=4&@Date=3/15/2024'")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Show the hosting environment and template path for a hostname")
                .arg(
                    Arg::new("hostname")
                        .help("Page hostname, e.g. 'localhost' or 'www.example.org'")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Bootstrap a page headlessly and print the widget markup")
                .arg(
                    Arg::new("url")
                        .help("Page URL including any '@' parameters")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("hidden")
                        .long("hidden")
                        .help("Treat the page as loaded in a background tab")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("embed")
                .about("Print the HTML a widget loader script injects")
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .help("Asset base URL (default: new-person-widget.vercel.app/Assets)"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("Widget name used for element ids (default: newPerson)"),
                )
                .arg(
                    Arg::new("params")
                        .long("params")
                        .short('p')
                        .allow_hyphen_values(true)
                        .help("Loader data-params string"),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run an interactive page session driven by stdin")
                .long_about("Run a page session with real timers. Each stdin line is one event:\n  date YYYY-MM-DD   pick a date\n  event <id>|none   pick or clear an event\n  hide / show       change tab visibility\n  ready [id]        signal that a widget finished loading\n  status            print the current state\n  quit              end the session")
                .arg(
                    Arg::new("url")
                        .help("Page URL including any '@' parameters")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("hook-delay-ms")
                        .long("hook-delay-ms")
                        .help("Delay before the host's reload hook becomes available")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("0"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(clap_complete::Shell)),
                ),
        )
}
