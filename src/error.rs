//! Error types for denver
//!
//! All modules use `DenverResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for denver operations
pub type DenverResult<T> = Result<T, DenverError>;

/// All errors that can occur in denver
#[derive(Error, Debug)]
pub enum DenverError {
    // Builder state errors
    #[error("Entrypoint already finalized for this Dockerfile")]
    EntrypointFinalized,

    // Caller contract errors
    #[error("{instruction} requires at least one command")]
    EmptyCommand { instruction: &'static str },

    #[error("Invalid asset URL: {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    // Download errors
    #[error("Download failed: {url}")]
    Download {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Download failed: {url}, HTTP status {status}")]
    DownloadStatus { url: String, status: u16 },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Project errors
    #[error("Cargo.toml not found in {0}")]
    ManifestNotFound(PathBuf),

    #[error("Invalid manifest at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command exited unsuccessfully: {command}, exit code: {}", exit_code(.code))]
    CommandExit { command: String, code: Option<i32> },

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

/// Exit code for display; `None` means the process was killed by a signal
fn exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

impl DenverError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ManifestNotFound(_) => {
                Some("Run from a crate directory or pass --project <DIR>")
            }
            Self::EntrypointFinalized => {
                Some("Use entrypoint_update to add more commands to the startup script")
            }
            Self::ConfigInvalid { .. } => Some("Run: denver config init --force"),
            Self::CommandFailed { .. } => Some("Check that `sh` is available on PATH"),
            _ => None,
        }
    }
}
