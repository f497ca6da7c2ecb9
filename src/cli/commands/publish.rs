//! Publish command - build and upload the package

use crate::cli::args::PublishArgs;
use crate::config::Config;
use crate::error::{DenverError, DenverResult};
use crate::project::ProjectMeta;
use crate::shell;
use std::path::Path;
use tracing::info;

/// Execute the publish command
pub async fn execute(args: PublishArgs, project_dir: &Path, config: &Config) -> DenverResult<()> {
    let meta = ProjectMeta::load(project_dir)?;

    let token = match args.token {
        Some(token) => token,
        None => prompt_token()?,
    };

    info!(
        "Publishing {} {}",
        meta.name,
        meta.version.as_deref().unwrap_or("(workspace version)")
    );

    super::announce(&config.tools.build);
    shell::run(&config.tools.build, &meta.root).await?;

    let (command, shown) = publish_command(&config.tools.publish, &token);
    super::announce(&shown);
    shell::run_redacted(&command, &shown, &meta.root).await
}

fn prompt_token() -> DenverResult<String> {
    cliclack::password("Registry token")
        .mask('*')
        .interact()
        .map_err(|e| DenverError::io("reading registry token", e))
}

/// Publish command line and its redacted form for display
fn publish_command(tool: &str, token: &str) -> (String, String) {
    (
        format!("{} --token {}", tool, shell::quote(token)),
        format!("{} --token ***", tool),
    )
}
