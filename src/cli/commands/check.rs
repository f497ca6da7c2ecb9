//! Check command - static checks for the project crate

use crate::config::Config;
use crate::error::DenverResult;
use crate::project::ProjectMeta;
use crate::shell;
use std::path::Path;
use tracing::info;

/// Execute the check command
pub async fn execute(project_dir: &Path, config: &Config) -> DenverResult<()> {
    let meta = ProjectMeta::load(project_dir)?;
    let command = package_command(&config.tools.check, &meta.name);

    info!("Checking {}", meta.name);
    super::announce(&command);
    shell::run(&command, &meta.root).await
}

/// `<tool> -p <package>`
pub(crate) fn package_command(tool: &str, package: &str) -> String {
    format!("{} -p {}", tool, shell::quote(package))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DenverError;
    use tempfile::TempDir;

    #[test]
    fn package_command_appends_package() {
        assert_eq!(
            package_command("cargo clippy --all-targets", "todo"),
            "cargo clippy --all-targets -p 'todo'"
        );
    }

    #[tokio::test]
    async fn check_requires_manifest() {
        let dir = TempDir::new().unwrap();
        let result = execute(dir.path(), &Config::default()).await;
        assert!(matches!(result, Err(DenverError::ManifestNotFound(_))));
    }

    #[tokio::test]
    async fn check_surfaces_tool_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"todo\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        let mut config = Config::default();
        config.tools.check = "exit 2 #".to_string();

        let result = execute(dir.path(), &config).await;
        assert!(matches!(
            result,
            Err(DenverError::CommandExit { code: Some(2), .. })
        ));
    }
}
