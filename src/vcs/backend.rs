//! Version control trait and shared types.
//!
//! The [`VersionControl`] trait defines the four queries the build needs:
//! tracked-history lookup, content at a revision, and the repository-wide
//! last commit time. The production implementation is
//! [`GitBackend`](super::git::GitBackend).

use crate::types::History;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
    #[error("{path} is not inside the repository root")]
    OutsideRepository { path: PathBuf },
    #[error("Unexpected output: {0}")]
    Parse(String),
}

/// Queries against the version-control history of the source tree.
pub trait VersionControl {
    /// History of a file, oldest revision first.
    ///
    /// Returns `Ok(History::Untracked)` when the file is not under version
    /// control; `Err` only when the query itself breaks.
    fn history(&self, path: &Path) -> Result<History, VcsError>;

    /// Exact content of `path` as of `revision`.
    fn show(&self, path: &Path, revision: &str) -> Result<String, VcsError>;

    /// Repository-wide most recent commit time, `YYYY-MM-DD HH:MM:SS`.
    fn last_commit_time(&self) -> Result<String, VcsError>;
}
