//! Version-control history access.
//!
//! The module is split into:
//! - **Backend**: [`VersionControl`] trait + [`VcsError`]
//! - **Git**: [`GitBackend`], the production implementation
//! - **Resolution**: [`resolve_history`] and [`latest_date`], the best-effort
//!   wrappers the build uses. History is never fatal: a broken query is logged
//!   and treated as "no history".

pub mod backend;
pub mod git;

pub use backend::{VcsError, VersionControl};
pub use git::GitBackend;

use crate::types::Revision;
use std::path::Path;
use tracing::warn;

/// Revisions of `path`, oldest first. Empty when untracked or on query failure.
pub fn resolve_history(vcs: &dyn VersionControl, path: &Path) -> Vec<Revision> {
    match vcs.history(path) {
        Ok(history) => history.into_revisions(),
        Err(e) => {
            warn!("git history error for {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Calendar date of the newest revision of `path`, if it has any.
pub fn latest_date(vcs: &dyn VersionControl, path: &Path) -> Option<String> {
    resolve_history(vcs, path)
        .last()
        .map(|rev| rev.date().to_string())
}

#[cfg(test)]
mod tests {
    use super::backend::tests::MockVcs;
    use super::*;

    #[test]
    fn resolve_untracked_is_empty() {
        let vcs = MockVcs::new();
        assert!(resolve_history(&vcs, Path::new("/repo/a.tex")).is_empty());
    }

    #[test]
    fn resolve_broken_query_is_empty() {
        let path = Path::new("/repo/a.tex");
        let vcs = MockVcs::new().with_broken_history(path);
        assert!(resolve_history(&vcs, path).is_empty());
    }

    #[test]
    fn resolve_keeps_order() {
        let path = Path::new("/repo/a.tex");
        let vcs = MockVcs::new().with_file(
            path,
            &[
                ("r1", "2025-01-01 10:00:00 +0800", "one"),
                ("r2", "2025-01-02 11:30:00 +0800", "two"),
            ],
        );
        let ids: Vec<String> = resolve_history(&vcs, path)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[test]
    fn latest_date_from_newest_revision() {
        let path = Path::new("/repo/a.tex");
        let vcs = MockVcs::new().with_file(
            path,
            &[
                ("r1", "2025-01-01 10:00:00 +0800", "one"),
                ("r2", "2025-01-02 11:30:00 +0800", "two"),
            ],
        );
        assert_eq!(latest_date(&vcs, path).as_deref(), Some("2025-01-02"));
        assert_eq!(latest_date(&vcs, Path::new("/repo/b.tex")), None);
    }
}
