//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Denver - Dockerfile builder and project workflow runner
///
/// Runs static checks, unit tests and package publishing for the
/// crate in the project directory.
#[derive(Parser, Debug)]
#[command(name = "denver")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DENVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local denver.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,

    /// Project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run static checks on the project
    Check,

    /// Run the project's unit tests
    Test,

    /// Build and upload the package to the registry
    Publish(PublishArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the publish command
#[derive(Parser, Debug)]
pub struct PublishArgs {
    /// Registry API token (prompted for when omitted)
    #[arg(long, env = "DENVER_PUBLISH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
