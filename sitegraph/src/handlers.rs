use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitegraph_core::config::load_rules;
use sitegraph_core::report::{
    gather_report_data, generate_json_report, generate_text_report, save_report,
};
use sitegraph_core::{ClusterRule, DisplayMode, GraphDataset, InputFormat, RuleSet, SitegraphConfig};
use sitegraph_worker::{EngineWorker, Request, Response};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Settings shared by every subcommand
pub struct GlobalOptions {
    pub quiet: bool,
    pub config: SitegraphConfig,
}

/// Load the config file, expanding a leading `~`. A missing file means defaults.
pub fn load_config(path: &str) -> anyhow::Result<SitegraphConfig> {
    let expanded = shellexpand::tilde(path);
    let path = Path::new(expanded.as_ref());
    SitegraphConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

/// Read a crawl export from disk
pub fn load_input(path: &Path) -> anyhow::Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    if content.trim().is_empty() {
        return Err(anyhow!("No data to process in {}", path.display()));
    }
    Ok(content)
}

/// Explicit `--format` wins, otherwise `.csv` files are CSV and the rest JSON
pub fn resolve_format(path: &Path, explicit: Option<&str>) -> InputFormat {
    explicit
        .and_then(InputFormat::from_str)
        .unwrap_or_else(|| InputFormat::from_file_name(&path.to_string_lossy()))
}

/// Cluster rules from `--rules` if given, else from the config
pub fn load_cluster_rules(
    rules_file: Option<&PathBuf>,
    config: &SitegraphConfig,
) -> anyhow::Result<Vec<ClusterRule>> {
    match rules_file {
        Some(path) => load_rules(path)
            .with_context(|| format!("Failed to load cluster rules {}", path.display())),
        None => Ok(config.cluster_rules.clone()),
    }
}

/// Send one request through an isolated engine worker and wait for its reply
pub async fn run_engine(
    content: String,
    format: InputFormat,
    config: SitegraphConfig,
    timeout: Duration,
    show_spinner: bool,
) -> anyhow::Result<Response> {
    let spinner = if show_spinner {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .map_err(|e| anyhow!("Invalid spinner template: {}", e))?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Processing {} export...", format.as_str()));
        Some(pb)
    } else {
        None
    };

    let worker = EngineWorker::with_config(config);
    let reply = async {
        let pending = worker.submit(Request::new(content, format)).await?;
        pending.recv().await
    };
    let outcome = tokio::time::timeout(timeout, reply).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let response = outcome
        .map_err(|_| anyhow!("Engine did not reply within {} seconds", timeout.as_secs()))??;
    worker.shutdown().await?;
    Ok(response)
}

/// Build a dataset or fail with the engine's error message
pub async fn build_from_file(
    input: &Path,
    explicit_format: Option<&str>,
    global: &GlobalOptions,
    timeout: Duration,
) -> anyhow::Result<GraphDataset> {
    let content = load_input(input)?;
    let format = resolve_format(input, explicit_format);
    debug!("Processing {} as {}", input.display(), format.as_str());

    run_engine(content, format, global.config.clone(), timeout, !global.quiet)
        .await?
        .into_result()
        .map_err(|message| anyhow!(message))
}

fn write_output(content: &str, output: Option<&PathBuf>, quiet: bool) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            save_report(content, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                eprintln!(
                    "{} Saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn fail(e: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "✗".red().bold(), e);
    std::process::exit(1);
}

pub async fn handle_build(sub_matches: &ArgMatches, global: &GlobalOptions) {
    if let Err(e) = build(sub_matches, global).await {
        fail(e);
    }
}

async fn build(sub_matches: &ArgMatches, global: &GlobalOptions) -> anyhow::Result<()> {
    let input = sub_matches
        .get_one::<PathBuf>("INPUT")
        .ok_or_else(|| anyhow!("An input file is required"))?;
    let explicit_format = sub_matches.get_one::<String>("format").map(String::as_str);
    let output = sub_matches.get_one::<PathBuf>("output");
    let envelope = sub_matches.get_flag("envelope");
    let timeout = Duration::from_secs(*sub_matches.get_one::<u64>("timeout").unwrap_or(&30));

    let content = load_input(input)?;
    let format = resolve_format(input, explicit_format);
    let response = run_engine(content, format, global.config.clone(), timeout, !global.quiet).await?;

    let json = if envelope {
        serde_json::to_string_pretty(&response)?
    } else {
        let dataset = response.into_result().map_err(|message| anyhow!(message))?;
        if !global.quiet {
            eprintln!(
                "{} {} pages, {} links",
                "✓".green().bold(),
                dataset.full_search_index.len().to_string().cyan(),
                dataset.edges.len().to_string().cyan()
            );
        }
        serde_json::to_string_pretty(&dataset)?
    };

    write_output(&json, output, global.quiet)
}

pub async fn handle_view(sub_matches: &ArgMatches, global: &GlobalOptions) {
    if let Err(e) = view(sub_matches, global).await {
        fail(e);
    }
}

async fn view(sub_matches: &ArgMatches, global: &GlobalOptions) -> anyhow::Result<()> {
    let input = sub_matches
        .get_one::<PathBuf>("INPUT")
        .ok_or_else(|| anyhow!("An input file is required"))?;
    let explicit_format = sub_matches.get_one::<String>("format").map(String::as_str);
    let mode = sub_matches
        .get_one::<String>("mode")
        .and_then(|m| DisplayMode::from_str(m))
        .unwrap_or_default();
    let rules = load_cluster_rules(sub_matches.get_one::<PathBuf>("rules"), &global.config)?;
    let page = sub_matches.get_one::<String>("page").map(String::as_str);
    let as_json = sub_matches.get_flag("json");
    let output = sub_matches.get_one::<PathBuf>("output");
    let timeout = Duration::from_secs(*sub_matches.get_one::<u64>("timeout").unwrap_or(&30));

    let dataset = build_from_file(input, explicit_format, global, timeout).await?;
    let rule_set = RuleSet::compile(&rules);

    if let Some(url) = page
        && dataset.page(url).is_none()
        && !global.quiet
    {
        eprintln!("{} Page not found in dataset: {}", "⚠".yellow().bold(), url);
    }

    let data = gather_report_data(&dataset, mode, &rule_set, &global.config.display, page);
    let report = if as_json {
        generate_json_report(&data)?
    } else {
        generate_text_report(&data, output.is_none())
    };

    write_output(&report, output, global.quiet)
}
