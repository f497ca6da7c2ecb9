//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::DenverResult;
use console::style;

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> DenverResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> DenverResult<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> DenverResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("[WARN]").yellow(),
            path.display()
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    println!(
        "{} Configuration initialized ({})",
        style("[OK]").green(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(path.clone());

        let args = ConfigArgs {
            action: Some(ConfigAction::Init { force: false }),
        };
        execute(args, &manager, &Config::default()).await.unwrap();
        assert!(path.exists());

        std::fs::write(&path, "[tools]\ntest = \"custom\"\n").unwrap();
        let args = ConfigArgs {
            action: Some(ConfigAction::Init { force: false }),
        };
        execute(args, &manager, &Config::default()).await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.tools.test, "custom");
    }

    #[tokio::test]
    async fn init_force_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[tools]\ntest = \"custom\"\n").unwrap();
        let manager = ConfigManager::with_path(path);

        let args = ConfigArgs {
            action: Some(ConfigAction::Init { force: true }),
        };
        execute(args, &manager, &Config::default()).await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.tools.test, "cargo test");
    }
}
