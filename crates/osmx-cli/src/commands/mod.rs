//! Command implementations

mod config;
mod countries;
mod query;
mod search;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use osmx_core::config::LayeredConfig;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Query(args) => query::execute(args, &config, &output).await,
        Commands::Search(args) => search::execute(args, &config, &output).await,
        Commands::Countries => countries::list(&config, &output).await,
        Commands::Country(args) => countries::show(args, &config, &output).await,
        Commands::Config => config::execute(&config, &output),
    }
}

/// Defaults, then the config file, then the environment, then CLI flags
fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = &cli.config {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(cli.overrides());
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}
