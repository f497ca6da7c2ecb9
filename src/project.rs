//! Project metadata from `Cargo.toml`

use crate::error::{DenverError, DenverResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Manifest file read by [`ProjectMeta::load`]
pub const MANIFEST_NAME: &str = "Cargo.toml";

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    #[serde(default)]
    version: Option<toml::Value>,
}

/// Package identity of the project the workflow commands operate on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMeta {
    /// Project root containing `Cargo.toml`
    pub root: PathBuf,
    /// `[package].name`
    pub name: String,
    /// `[package].version`, absent when inherited from a workspace
    pub version: Option<String>,
}

impl ProjectMeta {
    /// Read `<dir>/Cargo.toml`
    pub fn load(dir: &Path) -> DenverResult<Self> {
        let path = dir.join(MANIFEST_NAME);
        if !path.is_file() {
            return Err(DenverError::ManifestNotFound(dir.to_path_buf()));
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| DenverError::io(format!("reading {}", path.display()), e))?;
        Self::parse(dir, &content).map_err(|reason| DenverError::ManifestInvalid { path, reason })
    }

    fn parse(dir: &Path, content: &str) -> Result<Self, String> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| e.to_string())?;
        let package = manifest
            .package
            .ok_or_else(|| "missing [package] table".to_string())?;

        Ok(Self {
            root: dir.to_path_buf(),
            name: package.name,
            // `version.workspace = true` is a table, not a string
            version: package
                .version
                .and_then(|v| v.as_str().map(str::to_string)),
        })
    }
}
