//! Shared test utilities for the revpress test suite.
//!
//! [`TestSite`] lays out a throwaway repository root and hands out the pieces
//! a build needs: a scanned [`SourceTree`], a [`MockVcs`], a
//! [`MockConverter`], and a [`BuildContext`] with a fixed build time.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = TestSite::new()
//!     .post("2025/post.tex", "\\section{Hello}")
//!     .member("series", "01-intro.tex", "intro");
//! let vcs = site.vcs().with_file(
//!     &site.path("blogs/2025/post.tex"),
//!     &[("abc123", "2025-01-01 10:00:00 +0800", "old")],
//! );
//! let converter = site.converter();
//! let ctx = site.context(&vcs, &converter);
//! let tree = site.scan();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::convert::backend::tests::MockConverter;
use crate::scan::{self, SourceTree};
use crate::site::BuildContext;
use crate::vcs::backend::tests::MockVcs;

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// =========================================================================
// Fixture site
// =========================================================================

/// A temporary repository root with the stock directory layout.
pub struct TestSite {
    tmp: TempDir,
    pub config: SiteConfig,
}

impl TestSite {
    /// Build time every [`TestSite::context`] reports.
    pub const BUILD_TIME: &'static str = "2025-06-15T12:00:00+08:00";
    pub const BUILD_DATE: &'static str = "2025-06-15";
    pub const BUILD_TIMESTAMP: &'static str = "2025-06-15 12:00:00";

    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
            config: SiteConfig::default(),
        }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Absolute path of `rel` under the repository root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.tmp.path().join(rel)
    }

    /// Add a standalone post at `blogs/<rel>`.
    pub fn post(self, rel: &str, content: &str) -> Self {
        write_file(&self.path(&format!("blogs/{rel}")), content);
        self
    }

    /// Add a member at `collections/<collection>/<rel>`.
    pub fn member(self, collection: &str, rel: &str, content: &str) -> Self {
        write_file(
            &self.path(&format!("collections/{collection}/{rel}")),
            content,
        );
        self
    }

    /// Add a collection directory with no members.
    pub fn empty_collection(self, collection: &str) -> Self {
        fs::create_dir_all(self.path(&format!("collections/{collection}"))).unwrap();
        self
    }

    pub fn scan(&self) -> SourceTree {
        let paths = self.config.resolve_paths(self.root());
        scan::scan(&paths.blogs, &paths.collections, &self.config.markup.extension).unwrap()
    }

    /// An empty mock repository; chain `with_*` calls to add history.
    pub fn vcs(&self) -> MockVcs {
        MockVcs::new()
    }

    pub fn converter(&self) -> MockConverter {
        MockConverter::new()
    }

    pub fn context<'a>(
        &'a self,
        vcs: &'a MockVcs,
        converter: &'a MockConverter,
    ) -> BuildContext<'a> {
        BuildContext::new(
            &self.config,
            self.config.resolve_paths(self.root()),
            vcs,
            converter,
        )
        .with_build_time(fixed_build_time())
    }
}

fn fixed_build_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(TestSite::BUILD_TIME).unwrap()
}
