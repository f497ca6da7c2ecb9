//! Startup script emitter
//!
//! Writes a shell script that launches each command group in the
//! background, sending its stdout and stderr to log files named after the
//! content key of the group's command text.

use crate::digest::content_key;
use crate::error::{DenverError, DenverResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Script file name inside the staging directory
pub const SCRIPT_NAME: &str = "startup.sh";

/// Log directory name inside the staging directory
pub const LOG_DIR: &str = "log";

/// Final line that keeps the container in the foreground
const SLEEP_LINE: &str = "sleep infinity";

/// Background-process launcher script under a staging directory
#[derive(Debug, Clone)]
pub struct StartupScript {
    path: PathBuf,
    log_dir: PathBuf,
    image_log_dir: String,
}

impl StartupScript {
    /// Script at `<staging>/startup.sh`, logging to `<image_root>/log`
    pub fn new(staging: &Path, image_root: &str) -> Self {
        Self {
            path: staging.join(SCRIPT_NAME),
            log_dir: staging.join(LOG_DIR),
            image_log_dir: format!("{}/{}", image_root, LOG_DIR),
        }
    }

    /// Local path of the script
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one backgrounded line per command group
    ///
    /// `truncate` recreates the script; otherwise lines are appended.
    /// Every group is validated before the file is touched.
    pub fn append_groups<G, S>(&self, groups: &[G], truncate: bool) -> DenverResult<()>
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        let lines = groups
            .iter()
            .map(|group| {
                let group: &[S] = group.as_ref();
                self.group_line(group)
            })
            .collect::<DenverResult<Vec<_>>>()?;

        fs::create_dir_all(&self.log_dir).map_err(|e| {
            DenverError::io(format!("creating log directory {}", self.log_dir.display()), e)
        })?;

        debug!(
            "Writing {} command group(s) to {} (truncate: {})",
            lines.len(),
            self.path.display(),
            truncate
        );
        self.write_lines(&lines, truncate)
    }

    /// Append the blocking `sleep infinity` line
    pub fn append_sleep(&self) -> DenverResult<()> {
        self.write_lines(&[SLEEP_LINE.to_string()], false)
    }

    /// Render one group as `{ <cmd>; } 1><out> 2><err> &`
    fn group_line<S: AsRef<str>>(&self, group: &[S]) -> DenverResult<String> {
        if group.is_empty() {
            return Err(DenverError::EmptyCommand {
                instruction: "ENTRYPOINT",
            });
        }

        let joined = group
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<&str>>()
            .join(" && ");
        let key = content_key(&joined);

        // Always braced: the redirection and `&` must apply to the whole
        // group even when a single entry holds `;` or `&&` itself
        Ok(format!(
            "{{ {joined}; }} 1>{dir}/{key}.out 2>{dir}/{key}.err &",
            dir = self.image_log_dir,
        ))
    }

    fn write_lines(&self, lines: &[String], truncate: bool) -> DenverResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(truncate)
            .append(!truncate)
            .open(&self.path)
            .map_err(|e| DenverError::io(format!("opening {}", self.path.display()), e))?;

        for line in lines {
            writeln!(file, "{}", line)
                .map_err(|e| DenverError::io(format!("writing {}", self.path.display()), e))?;
        }

        Ok(())
    }
}
