//! # revpress
//!
//! A static site generator that publishes every committed revision of your
//! LaTeX articles. Git history is the data source: each commit that touched a
//! source file becomes its own page, next to a "latest" page and a version
//! index listing them all.
//!
//! # Architecture
//!
//! A build is a single synchronous pass over the repository:
//!
//! ```text
//! 1. Scan       blogs/, collections/   →  SourceTree
//! 2. Articles   each document          →  <slug>.html…, latest.html, index.html
//! 3. Indexes    each collection        →  collections/<name>/index.html
//! 4. Site       SourceTree             →  index.html
//! ```
//!
//! The two external tools sit behind traits so every stage can be tested
//! without them:
//!
//! - [`vcs::VersionControl`]: history, content at a revision, last commit time
//!   ([`vcs::GitBackend`] in production)
//! - [`convert::Converter`]: markup to standalone HTML
//!   ([`convert::PandocConverter`] in production)
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Optional `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Shared types: documents, collections, revisions, collection positions |
//! | [`naming`] | Revision slugs and display dates derived from commit timestamps |
//! | [`layout`] | Output directory and link rules |
//! | [`scan`] | Discovers standalone posts and collections |
//! | [`vcs`] | Version-control backend and best-effort history resolution |
//! | [`convert`] | Conversion engine backend (pandoc) |
//! | [`nav`] | Collection and standalone navigation fragments |
//! | [`render`] | One page: markup in, HTML file out |
//! | [`article`] | Every revision of one document, plus latest page and version index |
//! | [`generate`] | Version, collection, and site index pages using Maud |
//! | [`site`] | Build orchestration, shared assets, progress events |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Full Rebuilds
//!
//! Every run regenerates every page. There is no cache and no cleanup of
//! files whose sources were removed or renamed. Output for an unchanged
//! source and history is byte-identical across runs, apart from the site
//! index banner and any latest page dated with the build time.
//!
//! ## Minute-Precision Slugs
//!
//! Revision pages are named after the commit time truncated to the minute
//! (`2025-01-02 11:30:00 +0800` → `2025-01-02T11:30.html`). Two commits in the
//! same minute share a page; the later one wins.
//!
//! ## Best-Effort History
//!
//! A history query that fails is logged and treated as "no history". A
//! revision that cannot be fetched or rendered is logged and skipped. Only
//! failures affecting the latest page or the output tree itself abort the
//! build.

pub mod article;
pub mod config;
pub mod convert;
pub mod generate;
pub mod layout;
pub mod naming;
pub mod nav;
pub mod output;
pub mod render;
pub mod scan;
pub mod site;
pub mod types;
pub mod vcs;

#[cfg(test)]
pub(crate) mod test_helpers;
