//! Shell command execution for the workflow subcommands

use crate::error::{DenverError, DenverResult};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Run `command` through `sh -c` in `cwd` and return its exit status
///
/// Output is inherited so tool diagnostics reach the terminal as-is.
pub async fn status(command: &str, cwd: &Path) -> DenverResult<ExitStatus> {
    status_redacted(command, command, cwd).await
}

/// Run `command`, failing with [`DenverError::CommandExit`] on a nonzero exit
pub async fn run(command: &str, cwd: &Path) -> DenverResult<()> {
    run_redacted(command, command, cwd).await
}

/// Like [`run`], but logs and reports `shown` instead of `command`
///
/// Used when the command line carries a secret.
pub async fn run_redacted(command: &str, shown: &str, cwd: &Path) -> DenverResult<()> {
    let status = status_redacted(command, shown, cwd).await?;
    if status.success() {
        Ok(())
    } else {
        Err(DenverError::CommandExit {
            command: shown.to_string(),
            code: status.code(),
        })
    }
}

/// Quote `arg` as a single POSIX shell word
pub fn quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

async fn status_redacted(command: &str, shown: &str, cwd: &Path) -> DenverResult<ExitStatus> {
    debug!("Executing in {}: {}", cwd.display(), shown);

    Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| DenverError::command_failed(shown, e))
}
