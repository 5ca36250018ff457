//! Build orchestration.
//!
//! One [`build`] call regenerates the whole output tree:
//!
//! ```text
//! 1. Shared assets   .nojekyll, .dark-mode.html
//! 2. Posts           every standalone document, in path order
//! 3. Collections     every member (with prev/next position), then the collection index
//! 4. Site index      index.html at the output root
//! ```
//!
//! Every run is a full rebuild. Files left behind by removed sources are not
//! cleaned up.

use crate::article::{self, ArticleError, ArticleReport};
use crate::config::{BuildPaths, SiteConfig};
use crate::convert::Converter;
use crate::generate::{self, GenerateError};
use crate::render::PageRenderer;
use crate::scan::SourceTree;
use crate::types::CollectionPosition;
use crate::vcs::VersionControl;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Empty marker that disables Jekyll processing on GitHub Pages.
pub const NOJEKYLL_FILE: &str = ".nojekyll";
/// Stylesheet fragment passed to the converter as the header include.
pub const STYLESHEET_FILE: &str = ".dark-mode.html";

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Article(#[from] ArticleError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Everything a build step needs, fixed for the whole run.
pub struct BuildContext<'a> {
    pub config: &'a SiteConfig,
    pub paths: BuildPaths,
    pub vcs: &'a dyn VersionControl,
    pub converter: &'a dyn Converter,
    /// Captured once; every "current build date" of the run derives from it.
    pub build_time: DateTime<FixedOffset>,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        config: &'a SiteConfig,
        paths: BuildPaths,
        vcs: &'a dyn VersionControl,
        converter: &'a dyn Converter,
    ) -> Self {
        let offset = config.utc_offset().unwrap_or_else(|| Utc.fix());
        Self {
            config,
            paths,
            vcs,
            converter,
            build_time: Utc::now().with_timezone(&offset),
        }
    }

    /// Replace the captured build time.
    pub fn with_build_time(mut self, build_time: DateTime<FixedOffset>) -> Self {
        self.build_time = build_time;
        self
    }

    /// `YYYY-MM-DD` of the build time.
    pub fn build_date(&self) -> String {
        self.build_time.format("%Y-%m-%d").to_string()
    }

    /// `YYYY-MM-DD HH:MM:SS` of the build time.
    pub fn build_timestamp(&self) -> String {
        self.build_time.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.paths.output.join(STYLESHEET_FILE)
    }

    pub fn renderer(&self) -> PageRenderer<'a> {
        PageRenderer::new(self.converter, &self.stylesheet_path(), &self.paths.lua_filter)
    }
}

/// Top-level build sections, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Posts,
    Collections,
    SiteIndex,
}

/// Progress reported while building.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    SectionStarted {
        section: Section,
    },
    ArticleStarted {
        source: PathBuf,
        position: Option<CollectionPosition>,
    },
    ArticleBuilt {
        report: ArticleReport,
    },
    CollectionIndexed {
        name: String,
        members: usize,
        path: PathBuf,
    },
    SiteIndexed {
        path: PathBuf,
        posts: usize,
        collections: usize,
    },
}

/// Totals for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub articles: usize,
    pub pages: usize,
    pub skipped_revisions: usize,
    pub collections: usize,
}

impl BuildSummary {
    fn record(&mut self, report: &ArticleReport) {
        self.articles += 1;
        self.pages += report.pages.len();
        self.skipped_revisions += report.skipped.len();
    }
}

/// Write `.nojekyll` and the shared stylesheet fragment into the output root.
pub fn write_shared_assets(output: &std::path::Path) -> Result<(), SiteError> {
    fs::create_dir_all(output)?;
    fs::write(output.join(NOJEKYLL_FILE), "")?;
    fs::write(output.join(STYLESHEET_FILE), generate::stylesheet_fragment())?;
    Ok(())
}

/// Build the whole site from a scanned source tree.
pub fn build(
    ctx: &BuildContext<'_>,
    tree: &SourceTree,
    mut on_event: impl FnMut(&BuildEvent),
) -> Result<BuildSummary, SiteError> {
    write_shared_assets(&ctx.paths.output)?;
    let mut summary = BuildSummary::default();

    if !tree.posts.is_empty() {
        on_event(&BuildEvent::SectionStarted {
            section: Section::Posts,
        });
    }
    for doc in &tree.posts {
        on_event(&BuildEvent::ArticleStarted {
            source: doc.path.clone(),
            position: None,
        });
        let report = article::build_article(ctx, doc, None)?;
        summary.record(&report);
        on_event(&BuildEvent::ArticleBuilt { report });
    }

    if tree.collections.iter().any(|c| !c.members.is_empty()) {
        on_event(&BuildEvent::SectionStarted {
            section: Section::Collections,
        });
    }
    for collection in tree.collections.iter().filter(|c| !c.members.is_empty()) {
        for (index, doc) in collection.members.iter().enumerate() {
            let position = CollectionPosition::of(collection, index);
            on_event(&BuildEvent::ArticleStarted {
                source: doc.path.clone(),
                position: Some(position.clone()),
            });
            let report = article::build_article(ctx, doc, Some(&position))?;
            summary.record(&report);
            on_event(&BuildEvent::ArticleBuilt { report });
        }
        let path = generate::generate_collection_index(ctx, collection)?;
        summary.collections += 1;
        on_event(&BuildEvent::CollectionIndexed {
            name: collection.name.clone(),
            members: collection.members.len(),
            path,
        });
    }

    on_event(&BuildEvent::SectionStarted {
        section: Section::SiteIndex,
    });
    let index = generate::generate_site_index(ctx, tree)?;
    on_event(&BuildEvent::SiteIndexed {
        path: ctx.paths.output.join(crate::naming::INDEX_FILE),
        posts: index.posts.len(),
        collections: index.collections.len(),
    });

    Ok(summary)
}
