use crate::CLAP_STYLING;
use clap::{arg, command};
use sitegraph_core::config::DEFAULT_CONFIG_PATH;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitegraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitegraph")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress the progress spinner and non-essential output").required(false))
        .arg(
            arg!(-c --"config" <PATH>)
                .required(false)
                .help("Path to the sitegraph config file")
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .subcommand_required(true)
        .subcommand(
            command!("build")
                .about(
                    "Build a link graph dataset from a crawl export (CSV or JSON) and write it \
                as JSON.",
                )
                .arg(
                    arg!(<INPUT>)
                        .required(true)
                        .help("Path to the crawl export")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Input format (default: from the file extension)")
                        .value_parser(["csv", "json"]),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Write the dataset to a file (default: stdout)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"envelope")
                        .required(false)
                        .help("Write the full {status, data|message} reply instead of the bare dataset")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Give up waiting for the engine after this many seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("30"),
                ),
        )
        .subcommand(
            command!("view")
                .about("Build the dataset and print a report for one display mode.")
                .arg(
                    arg!(<INPUT>)
                        .required(true)
                        .help("Path to the crawl export")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Input format (default: from the file extension)")
                        .value_parser(["csv", "json"]),
                )
                .arg(
                    arg!(-m --"mode" <MODE>)
                        .required(false)
                        .help("Display mode: link-equity, crawl-depth, topic-cluster")
                        .value_parser(["link-equity", "crawl-depth", "topic-cluster"])
                        .default_value("link-equity"),
                )
                .arg(
                    arg!(-r --"rules" <PATH>)
                        .required(false)
                        .help("TOML file of [[cluster_rules]] for topic-cluster mode (overrides the config). Patterns use Rust regex syntax, no lookaround")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-p --"page" <URL>)
                        .required(false)
                        .help("Show inspector details for this page URL"),
                )
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Emit the report as JSON")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Give up waiting for the engine after this many seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("30"),
                ),
        )
}
