//! Dockerfile builder
//!
//! Accumulates instruction blocks in insertion order and renders them
//! separated by blank lines. Remote assets are cached under the
//! `copy/` staging directory and a background startup script can be
//! emitted as the image entrypoint.
//!
//! ```no_run
//! use denver::dockerfile::Dockerfile;
//!
//! # fn main() -> denver::DenverResult<()> {
//! let mut d = Dockerfile::new("todo");
//! d.from_ubuntu("20.04")
//!     .arg_default()
//!     .expose([7101])
//!     .workdir_default()
//!     .copy_default()
//!     .run([Dockerfile::run_update(), Dockerfile::run_install(["curl", "vim"])])?;
//! d.run([
//!     d.run_download_bash("https://dl.openfoam.com/add-debian-repo.sh", false)?,
//!     Dockerfile::run_update(),
//! ])?;
//! d.save_default()?;
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod startup;

pub use asset::{AssetCache, Fetch, HttpFetcher};
pub use startup::StartupScript;

use crate::error::{DenverError, DenverResult};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the staging directory inside the project directory
pub const STAGING_DIR: &str = "copy";

/// Root of the staged content inside the image
pub const IMAGE_ROOT: &str = "denver";

/// Default output file name for [`Dockerfile::save_default`]
pub const DEFAULT_FILENAME: &str = "Dockerfile";

/// Separator between commands of a single `RUN` block
const RUN_SEPARATOR: &str = " && \\\n    ";

/// Whether the image entrypoint has been set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntrypointState {
    #[default]
    Unset,
    Finalized,
}

/// Dockerfile template bound to a project directory
#[derive(Debug)]
pub struct Dockerfile {
    directory: PathBuf,
    src: PathBuf,
    blocks: Vec<String>,
    entrypoint: EntrypointState,
    assets: AssetCache,
    startup: StartupScript,
    fetcher: Box<dyn Fetch>,
}

impl Dockerfile {
    /// Create a builder that downloads assets over HTTP
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_fetcher(directory, HttpFetcher)
    }

    /// Create a builder with a custom asset fetcher
    pub fn with_fetcher(directory: impl Into<PathBuf>, fetcher: impl Fetch + 'static) -> Self {
        let directory = directory.into();
        let src = directory.join(STAGING_DIR);
        Self {
            assets: AssetCache::new(&src, IMAGE_ROOT),
            startup: StartupScript::new(&src, IMAGE_ROOT),
            directory,
            src,
            blocks: Vec::new(),
            entrypoint: EntrypointState::Unset,
            fetcher: Box::new(fetcher),
        }
    }

    /// Project directory the builder is bound to
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Local staging directory copied into the image
    pub fn staging_dir(&self) -> &Path {
        &self.src
    }

    /// Instruction blocks in insertion order
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Whether [`Dockerfile::entrypoint`] has been called
    pub fn is_finalized(&self) -> bool {
        self.entrypoint == EntrypointState::Finalized
    }

    /// Join all blocks with a blank line between each
    pub fn render(&self) -> String {
        let mut text = self.blocks.join("\n\n");
        text.push('\n');
        text
    }

    /// Write the rendered text to `<directory>/<filename>`
    pub fn save(&self, filename: &str) -> DenverResult<PathBuf> {
        let path = self.directory.join(filename);
        fs::write(&path, self.render())
            .map_err(|e| DenverError::io(format!("writing {}", path.display()), e))?;
        info!("Saved {} ({} blocks)", path.display(), self.blocks.len());
        Ok(path)
    }

    /// Write the rendered text to `<directory>/Dockerfile`
    pub fn save_default(&self) -> DenverResult<PathBuf> {
        self.save(DEFAULT_FILENAME)
    }

    pub fn from(&mut self, image: &str) -> &mut Self {
        self.push(format!("FROM {}", image))
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from_ubuntu(&mut self, tag: &str) -> &mut Self {
        self.from(&format!("ubuntu:{}", tag))
    }

    /// Append one `ARG` block per name
    pub fn arg<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.push(format!("ARG {}", name.as_ref()));
        }
        self
    }

    /// `ARG DEBIAN_FRONTEND=noninteractive`
    pub fn arg_default(&mut self) -> &mut Self {
        self.arg(["DEBIAN_FRONTEND=noninteractive"])
    }

    /// Append one `EXPOSE` block per port; values are not validated
    pub fn expose<I, P>(&mut self, ports: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: fmt::Display,
    {
        for port in ports {
            self.push(format!("EXPOSE {}", port));
        }
        self
    }

    pub fn workdir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.push(format!("WORKDIR {}", as_posix(path.as_ref())))
    }

    /// `WORKDIR /root/`
    pub fn workdir_default(&mut self) -> &mut Self {
        self.workdir("/root/")
    }

    pub fn copy(&mut self, src: impl AsRef<Path>, dst: impl AsRef<Path>) -> &mut Self {
        self.push(format!(
            "COPY {} {}",
            as_posix(src.as_ref()),
            as_posix(dst.as_ref())
        ))
    }

    /// Copy the staging directory into the image root
    pub fn copy_default(&mut self) -> &mut Self {
        let src = self.src.clone();
        self.copy(src, IMAGE_ROOT)
    }

    /// Append a single `RUN` block chaining `commands` with `&&`
    ///
    /// Fails with [`DenverError::EmptyCommand`] when no command is given.
    pub fn run<I, S>(&mut self, commands: I) -> DenverResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commands: Vec<S> = commands.into_iter().collect();
        if commands.is_empty() {
            return Err(DenverError::EmptyCommand { instruction: "RUN" });
        }

        let line = commands
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<&str>>()
            .join(RUN_SEPARATOR);
        Ok(self.push(format!("RUN {}", line)))
    }

    /// `apt-get update`
    pub fn run_update() -> String {
        "apt-get update".to_string()
    }

    /// `apt-get -y install --no-install-recommends <packages>`
    pub fn run_install<I, S>(packages: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let packages = packages
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        format!("apt-get -y install --no-install-recommends {}", packages)
    }

    /// Cache `url` under the staging directory and return its in-image path
    pub fn run_download(&self, url: &str, overwrite: bool) -> DenverResult<String> {
        self.assets.fetch(&*self.fetcher, url, overwrite)
    }

    /// `bash <cached script>`
    pub fn run_download_bash(&self, url: &str, overwrite: bool) -> DenverResult<String> {
        self.run_download_other("bash", url, overwrite)
    }

    /// `<prefix> <cached asset>`
    pub fn run_download_other(
        &self,
        prefix: &str,
        url: &str,
        overwrite: bool,
    ) -> DenverResult<String> {
        Ok(format!("{} {}", prefix, self.run_download(url, overwrite)?))
    }

    /// Recreate the startup script from `groups` and make it the entrypoint
    ///
    /// May be called once per builder; a second call fails with
    /// [`DenverError::EntrypointFinalized`] and leaves the script untouched.
    pub fn entrypoint<G, S>(&mut self, groups: &[G]) -> DenverResult<&mut Self>
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        if self.entrypoint == EntrypointState::Finalized {
            return Err(DenverError::EntrypointFinalized);
        }
        if groups.is_empty() {
            return Err(DenverError::EmptyCommand {
                instruction: "ENTRYPOINT",
            });
        }

        self.startup.append_groups(groups, true)?;
        self.entrypoint = EntrypointState::Finalized;

        let script = format!("{}/{}", IMAGE_ROOT, startup::SCRIPT_NAME);
        Ok(self.push(format!("ENTRYPOINT bash {}", script)))
    }

    /// Append more background groups to the startup script
    pub fn entrypoint_update<G, S>(&mut self, groups: &[G]) -> DenverResult<&mut Self>
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.startup.append_groups(groups, false)?;
        Ok(self)
    }

    /// Append `sleep infinity` to keep the container running
    pub fn entrypoint_sleep(&mut self) -> DenverResult<&mut Self> {
        self.startup.append_sleep()?;
        Ok(self)
    }

    fn push(&mut self, block: String) -> &mut Self {
        debug!("{}", block.lines().next().unwrap_or_default());
        self.blocks.push(block);
        self
    }
}

impl fmt::Display for Dockerfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render a path with `/` separators regardless of platform
fn as_posix(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
