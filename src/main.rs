//! Denver - Dockerfile builder and project workflow runner
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use denver::cli::{Cli, Commands};
use denver::config::ConfigManager;
use denver::error::{DenverError, DenverResult};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> DenverResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("denver=warn"),
        1 => EnvFilter::new("denver=info"),
        _ => EnvFilter::new("denver=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let cwd =
        std::env::current_dir().map_err(|e| DenverError::io("getting current directory", e))?;
    let project_dir = cli
        .project
        .clone()
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| cwd.clone());
    debug!("Project directory: {}", project_dir.display());

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    // Find local config unless --no-local is set
    let local_config_path = if cli.no_local {
        debug!("Local config discovery disabled (--no-local)");
        None
    } else {
        let found = ConfigManager::find_local_config(&project_dir);
        if let Some(ref path) = found {
            debug!("Found local config: {}", path.display());
        }
        found
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    match cli.command {
        Commands::Check => denver::cli::commands::check(&project_dir, &config).await,
        Commands::Test => denver::cli::commands::test(&project_dir, &config).await,
        Commands::Publish(args) => {
            denver::cli::commands::publish(args, &project_dir, &config).await
        }
        Commands::Config(args) => {
            denver::cli::commands::config(args, &config_manager, &config).await
        }
    }
}
