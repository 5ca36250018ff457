//! Git backend: shells out to the `git` executable.
//!
//! | Query | Command (run in the repository root) |
//! |---|---|
//! | tracked? | `git ls-files --error-unmatch -- <path>` |
//! | history | `git log --follow --format=%H %ci -- <path>` (reversed) |
//! | content | `git show <rev>:./<relative path>` |
//! | last commit | `git log -1 --format=%cd --date=format:%Y-%m-%d %H:%M:%S` |

use super::backend::{VcsError, VersionControl};
use crate::types::{History, Revision};
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Version control backed by the `git` command-line tool.
pub struct GitBackend {
    binary: String,
    root: PathBuf,
}

impl GitBackend {
    pub fn new(binary: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            root: root.into(),
        }
    }

    fn run(&self, args: &[&str], path: Option<&Path>) -> Result<Output, VcsError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args).current_dir(&self.root);
        if let Some(path) = path {
            cmd.arg("--").arg(path);
        }
        debug!("running {:?}", cmd);
        Ok(cmd.output()?)
    }

    /// Run and require success; stdout as raw bytes.
    fn run_checked(&self, args: &[&str], path: Option<&Path>) -> Result<Vec<u8>, VcsError> {
        let output = self.run(args, path)?;
        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                command: format!("{} {}", self.binary, args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    /// Run and require success; stdout as text, for git's own listings.
    fn run_listing(&self, args: &[&str], path: Option<&Path>) -> Result<String, VcsError> {
        let stdout = self.run_checked(args, path)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    fn relative_to_root(&self, path: &Path) -> Result<PathBuf, VcsError> {
        if path.is_relative() {
            return Ok(path
                .components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect());
        }
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| VcsError::OutsideRepository {
                path: path.to_path_buf(),
            })
    }
}

impl VersionControl for GitBackend {
    fn history(&self, path: &Path) -> Result<History, VcsError> {
        let tracked = self.run(&["ls-files", "--error-unmatch"], Some(path))?;
        if !tracked.status.success() {
            return Ok(History::Untracked);
        }

        let log = self.run_listing(&["log", "--follow", "--format=%H %ci"], Some(path))?;
        Ok(History::Revisions(parse_log(&log)))
    }

    fn show(&self, path: &Path, revision: &str) -> Result<String, VcsError> {
        let relative = self.relative_to_root(path)?;
        let object = format!("{}:./{}", revision, relative.to_string_lossy());
        let content = self.run_checked(&["show", object.as_str()], None)?;
        String::from_utf8(content).map_err(|e| {
            VcsError::Parse(format!("{object} is not valid UTF-8: {}", e.utf8_error()))
        })
    }

    fn last_commit_time(&self) -> Result<String, VcsError> {
        let out = self.run_listing(
            &["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d %H:%M:%S"],
            None,
        )?;
        let time = out.trim();
        if time.is_empty() {
            return Err(VcsError::Parse("empty commit time".to_string()));
        }
        Ok(time.to_string())
    }
}

/// Parse `<hash> <timestamp>` lines (newest first) into revisions, oldest first.
fn parse_log(log: &str) -> Vec<Revision> {
    let mut revisions: Vec<Revision> = log
        .lines()
        .filter_map(|line| {
            let (id, timestamp) = line.trim().split_once(char::is_whitespace)?;
            let timestamp = timestamp.trim();
            (!timestamp.is_empty()).then(|| Revision::new(id, timestamp))
        })
        .collect();
    revisions.reverse();
    revisions
}
