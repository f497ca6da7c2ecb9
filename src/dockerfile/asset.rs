//! Content-addressed asset cache
//!
//! Remote files are downloaded once into `<staging>/<key>/<name>`, where
//! `key` is the content key of the URL, and are referenced inside the
//! image as `<image root>/<key>/<name>`.

use crate::digest::content_key;
use crate::error::{DenverError, DenverResult};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source of remote asset bytes
pub trait Fetch: fmt::Debug {
    /// Retrieve the full body of `url`
    fn get(&self, url: &str) -> DenverResult<Vec<u8>>;
}

/// Blocking HTTP fetcher backed by ureq
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> DenverResult<Vec<u8>> {
        debug!("GET {}", url);

        let mut response = ureq::get(url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => DenverError::DownloadStatus {
                url: url.to_string(),
                status,
            },
            other => DenverError::Download {
                url: url.to_string(),
                source: Box::new(other),
            },
        })?;

        response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| DenverError::Download {
                url: url.to_string(),
                source: Box::new(e),
            })
    }
}

/// Cache of downloaded assets under a staging directory
#[derive(Debug, Clone)]
pub struct AssetCache {
    staging: PathBuf,
    image_root: String,
}

impl AssetCache {
    /// Create a cache rooted at `staging`, mirrored at `image_root` in the image
    pub fn new(staging: impl Into<PathBuf>, image_root: impl Into<String>) -> Self {
        Self {
            staging: staging.into(),
            image_root: image_root.into(),
        }
    }

    /// Local path an asset for `url` is stored at
    pub fn local_path(&self, url: &str) -> DenverResult<PathBuf> {
        let name = asset_name(url)?;
        Ok(self.staging.join(content_key(url)).join(name))
    }

    /// Path of the asset for `url` inside the image
    pub fn image_path(&self, url: &str) -> DenverResult<String> {
        let name = asset_name(url)?;
        Ok(format!("{}/{}/{}", self.image_root, content_key(url), name))
    }

    /// Download `url` unless it is already cached, returning its in-image path
    ///
    /// With `overwrite` set the download happens even if a cached copy exists.
    pub fn fetch(&self, fetcher: &dyn Fetch, url: &str, overwrite: bool) -> DenverResult<String> {
        let path = self.local_path(url)?;

        if overwrite || !path.exists() {
            info!("Downloading {}", url);
            let bytes = fetcher.get(url)?;
            write_asset(&path, &bytes)?;
            debug!("Cached {} bytes at {}", bytes.len(), path.display());
        } else {
            debug!("Asset cache hit: {}", path.display());
        }

        self.image_path(url)
    }
}

/// Final path segment of a URL
fn asset_name(url: &str) -> DenverResult<&str> {
    let name = url.rsplit('/').next().unwrap_or(url);
    if name.is_empty() {
        return Err(DenverError::InvalidUrl {
            url: url.to_string(),
            reason: "no file name after the last '/'".to_string(),
        });
    }
    if name == "." || name == ".." {
        return Err(DenverError::InvalidUrl {
            url: url.to_string(),
            reason: format!("file name must not be '{name}'"),
        });
    }
    Ok(name)
}

/// Write through a sibling `.part` file so a failed write never leaves a
/// truncated asset at `path`
fn write_asset(path: &Path, bytes: &[u8]) -> DenverResult<()> {
    let parent = path
        .parent()
        .ok_or_else(|| DenverError::User(format!("asset path has no parent: {}", path.display())))?;
    fs::create_dir_all(parent)
        .map_err(|e| DenverError::io(format!("creating directory {}", parent.display()), e))?;

    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let written = fs::write(&partial, bytes)
        .map_err(|e| DenverError::io(format!("writing {}", partial.display()), e))
        .and_then(|()| {
            fs::rename(&partial, path)
                .map_err(|e| DenverError::io(format!("moving asset into {}", path.display()), e))
        });
    if written.is_err() {
        let _ = fs::remove_file(&partial);
    }

    written
}
