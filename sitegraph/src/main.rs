use commands::command_argument_builder;
use sitegraph::handlers::{GlobalOptions, handle_build, handle_view, load_config};

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    // Logs go to stderr so stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let quiet = chosen_command.get_flag("quiet");
    let config_path = chosen_command
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(sitegraph_core::config::DEFAULT_CONFIG_PATH);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    };
    let global = GlobalOptions { quiet, config };

    match chosen_command.subcommand() {
        Some(("build", primary_command)) => handle_build(primary_command, &global).await,
        Some(("view", primary_command)) => handle_view(primary_command, &global).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
