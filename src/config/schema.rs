//! Configuration schema for denver
//!
//! Global configuration lives at `~/.config/denver/config.toml`; a
//! project may override any key in a local `denver.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Developer workflow tool commands
    pub tools: ToolsConfig,
}

/// Shell command templates for the workflow subcommands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Static checks, run with `-p <package>` appended
    pub check: String,

    /// Unit tests, run with `-p <package>` appended
    pub test: String,

    /// Package build step run before publishing
    pub build: String,

    /// Upload step, run with `--token` appended
    pub publish: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            check: "cargo clippy --all-targets".to_string(),
            test: "cargo test".to_string(),
            build: "cargo package".to_string(),
            publish: "cargo publish".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[tools]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tools.test, "cargo test");
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [tools]
            check = "cargo check"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tools.check, "cargo check");
        assert_eq!(config.tools.publish, "cargo publish"); // default preserved
    }
}
