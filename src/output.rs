//! CLI output formatting for scan results and build progress.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Posts
//! 001 old-post
//!     Source: blogs/2024/old-post.tex
//! 002 second-post
//!     Source: blogs/2025/second-post/second-post.tex
//!
//! Collections
//! 001 series (2 articles)
//!     Source: collections/series/
//!     001 01-intro
//!         Source: collections/series/01-intro.tex
//!     002 02-details
//!         Source: collections/series/02-details/02-details.tex
//! ```
//!
//! ## Build
//!
//! ```text
//! Posts
//! Building blogs/2025/post.tex
//!     Skipped 2025-01-01T10:00: fetch failed: ...
//!     2 pages → blogs/2025/post/
//!
//! Collections
//! Building collections/series/01-intro.tex [series 1/2]
//!     No git history, using current version
//!     1 page → collections/series/01-intro/
//! series (2 articles) → collections/series/index.html
//!
//! Site index
//! 1 post, 1 collection → index.html
//!
//! Built 3 articles (4 pages), 1 collection
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::scan::SourceTree;
use crate::site::{BuildEvent, BuildSummary, Section};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `path` relative to `root` when possible, with forward slashes.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the discovered sources as an inventory.
pub fn format_scan_output(tree: &SourceTree, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    if !tree.has_blogs_root {
        lines.push("    (directory not found)".to_string());
    } else if tree.posts.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, doc) in tree.posts.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), doc.name()));
        lines.push(format!("    Source: {}", display_path(&doc.path, root)));
    }

    lines.push(String::new());
    lines.push("Collections".to_string());
    if !tree.has_collections_root {
        lines.push("    (directory not found)".to_string());
    } else if tree.collections.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, collection) in tree.collections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            collection.name,
            plural(collection.members.len(), "article", "articles")
        ));
        lines.push(format!("    Source: {}/", display_path(&collection.dir, root)));
        for (j, doc) in collection.members.iter().enumerate() {
            lines.push(format!("    {} {}", format_index(j + 1), doc.name()));
            lines.push(format!("        Source: {}", display_path(&doc.path, root)));
        }
    }

    lines
}

pub fn print_scan_output(tree: &SourceTree, root: &Path) {
    for line in format_scan_output(tree, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single build progress event as display lines.
///
/// Source paths are shown relative to `root`, output paths relative to
/// `output`.
pub fn format_build_event(event: &BuildEvent, root: &Path, output: &Path) -> Vec<String> {
    match event {
        BuildEvent::SectionStarted { section } => {
            let title = match section {
                Section::Posts => "Posts",
                Section::Collections => "Collections",
                Section::SiteIndex => "Site index",
            };
            vec![String::new(), title.to_string()]
        }
        BuildEvent::ArticleStarted { source, position } => {
            let source = display_path(source, root);
            match position {
                Some(pos) => vec![format!(
                    "Building {} [{} {}/{}]",
                    source,
                    pos.collection,
                    pos.index + 1,
                    pos.total
                )],
                None => vec![format!("Building {}", source)],
            }
        }
        BuildEvent::ArticleBuilt { report } => {
            let mut lines = Vec::new();
            if !report.had_history {
                lines.push("    No git history, using current version".to_string());
            }
            for skipped in &report.skipped {
                lines.push(format!("    Skipped {}: {}", skipped.slug, skipped.reason));
            }
            lines.push(format!(
                "    {} \u{2192} {}/",
                plural(report.pages.len(), "page", "pages"),
                display_path(&report.output_dir, output)
            ));
            lines
        }
        BuildEvent::CollectionIndexed {
            name,
            members,
            path,
        } => vec![format!(
            "{} ({}) \u{2192} {}",
            name,
            plural(*members, "article", "articles"),
            display_path(path, output)
        )],
        BuildEvent::SiteIndexed {
            path,
            posts,
            collections,
        } => vec![format!(
            "{}, {} \u{2192} {}",
            plural(*posts, "post", "posts"),
            plural(*collections, "collection", "collections"),
            display_path(path, output)
        )],
    }
}

pub fn print_build_event(event: &BuildEvent, root: &Path, output: &Path) {
    for line in format_build_event(event, root, output) {
        println!("{}", line);
    }
}

/// Format the closing summary of a build.
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Built {} ({}), {}",
            plural(summary.articles, "article", "articles"),
            plural(summary.pages, "page", "pages"),
            plural(summary.collections, "collection", "collections")
        ),
    ];
    if summary.skipped_revisions > 0 {
        lines.push(format!(
            "Skipped {}",
            plural(summary.skipped_revisions, "revision", "revisions")
        ));
    }
    lines
}

pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
