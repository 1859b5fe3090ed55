//! Credence CLI - Command-line client for the credibility scoring service.

use clap::Parser;
use credence_cli::commands;
use credence_cli::{Cli, Command, Config, Formatter};
use credence_evaluator::Evaluator;
use credence_history::{FileBackend, HistoryStore};
use credence_knowledge::KnowledgeStore;
use credence_sdk::CredenceClient;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> credence_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let api_url = cli.api_url;

    match cli.command {
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Command::Knowledge(args) => {
            let store = KnowledgeStore::new(connect(&config, api_url.as_deref())?);
            commands::execute_knowledge(args, &store, &formatter).await?;
        }
        Command::Health => {
            let client = connect(&config, api_url.as_deref())?;
            let url = client.base_url().to_string();
            let evaluator = Evaluator::new(client);
            commands::execute_health(&evaluator, &url, &formatter).await?;
        }
        Command::Scenarios => {
            let evaluator = Evaluator::new(connect(&config, api_url.as_deref())?);
            commands::execute_scenarios(&evaluator, &formatter).await?;
        }
        Command::Evaluate(args) => {
            let evaluator = Evaluator::new(connect(&config, api_url.as_deref())?);
            let mut history = open_history(&config)?;
            commands::execute_evaluate(args, &evaluator, &mut history, &formatter).await?;
        }
        Command::Scenario(args) => {
            let evaluator = Evaluator::new(connect(&config, api_url.as_deref())?);
            let mut history = open_history(&config)?;
            commands::execute_scenario(args, &evaluator, &mut history, &formatter).await?;
        }
        Command::Batch(args) => {
            let evaluator = Evaluator::new(connect(&config, api_url.as_deref())?);
            let mut history = open_history(&config)?;
            commands::execute_batch(args, &evaluator, &mut history, &formatter).await?;
        }
        Command::History(args) => {
            let evaluator = Evaluator::new(connect(&config, api_url.as_deref())?);
            let mut history = open_history(&config)?;
            commands::execute_history(args, &evaluator, &mut history, &formatter).await?;
        }
    }

    Ok(())
}

fn connect(config: &Config, override_url: Option<&str>) -> credence_cli::Result<CredenceClient> {
    let api_url = config.api_url(override_url)?;
    debug!(profile = %config.active_profile, "Using API at {}", api_url);
    Ok(CredenceClient::new(&api_url))
}

fn open_history(config: &Config) -> credence_cli::Result<HistoryStore> {
    let data_dir = config.data_dir()?;
    debug!("Opening history in {}", data_dir.display());
    Ok(HistoryStore::open(FileBackend::new(data_dir)))
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
