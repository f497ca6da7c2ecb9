//! Configuration management for denver

pub mod schema;

pub use schema::Config;

use crate::error::{DenverError, DenverResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// File name of the project-local configuration
pub const LOCAL_CONFIG_NAME: &str = "denver.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("denver")
            .join("config.toml")
    }

    /// Walk up from `start` looking for a `denver.toml`
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
            .find(|path| path.is_file())
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> DenverResult<Config> {
        self.load_merged(None).await
    }

    /// Load the global configuration with a local file layered on top
    ///
    /// Tables are merged key by key, so a local file only needs the keys
    /// it overrides.
    pub async fn load_merged(&self, local: Option<&Path>) -> DenverResult<Config> {
        let mut merged = if self.config_path.exists() {
            let global = read_table(&self.config_path).await?;
            parse_config(&global, &self.config_path)?;
            global
        } else {
            debug!("Config file not found, using defaults");
            toml::Table::new()
        };

        let Some(local) = local else {
            return parse_config(&merged, &self.config_path);
        };

        debug!("Merging local config {}", local.display());
        let overrides = read_table(local).await?;
        parse_config(&overrides, local)?;
        merge_tables(&mut merged, overrides);

        parse_config(&merged, local)
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> DenverResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            DenverError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> DenverResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DenverError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_table(path: &Path) -> DenverResult<toml::Table> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| DenverError::io(format!("reading config from {}", path.display()), e))?;

    content
        .parse::<toml::Table>()
        .map_err(|e| DenverError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Deserialize `table`, blaming `path` for schema errors
fn parse_config(table: &toml::Table, path: &Path) -> DenverResult<Config> {
    toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e: toml::de::Error| DenverError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Recursively overlay `overlay` onto `base`
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
