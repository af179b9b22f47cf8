// crates/dci-cli/src/status.rs
//
// Progress reporter that mirrors the latest progress value into a status
// file for callers that poll it, and prints status messages to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use dci_core::ProgressReporter;

/// Writes `<progress>\n` to `status.txt` on every update.
#[derive(Debug, Clone)]
pub struct FileStatusReporter {
    path: PathBuf,
    quiet: bool,
}

impl FileStatusReporter {
    pub const FILE_NAME: &'static str = "status.txt";

    /// Report into `<dir>/status.txt`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
            quiet: false,
        }
    }

    /// Suppress stdout messages (the status file is still written).
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressReporter for FileStatusReporter {
    fn report(&self, progress: u8, message: Option<&str>) {
        if let Some(message) = message {
            if !self.quiet {
                println!("{}", message);
            }
            tracing::debug!("progress {}: {}", progress, message);
        }
        if let Err(e) = fs::write(&self.path, format!("{}\n", progress)) {
            tracing::warn!("Could not write status file {}: {}", self.path.display(), e);
        }
    }
}
