//! Index page generation.
//!
//! Three kinds of listing pages tie the rendered articles together:
//!
//! - **Version index** (`<article>/index.html`): latest-version link plus every
//!   rendered revision, newest first
//! - **Collection index** (`collections/<name>/index.html`): ordered member list
//!   with last-modified dates and history links
//! - **Site index** (`index.html`): all collections and standalone posts
//!
//! ## Output Structure
//!
//! ```text
//! docs/
//! ├── index.html                      # Site index
//! ├── blogs/2025/post/
//! │   ├── index.html                  # Version index
//! │   ├── latest.html
//! │   ├── 2025-01-01T10:00.html
//! │   └── 2025-01-02T11:30.html
//! └── collections/series/
//!     ├── index.html                  # Collection index
//!     └── intro/
//!         └── ...                     # Same shape as a post
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating;
//! names coming from the filesystem are escaped automatically.

use crate::layout;
use crate::naming::{INDEX_FILE, LATEST_FILE};
use crate::scan::SourceTree;
use crate::site::BuildContext;
use crate::types::Collection;
use crate::vcs;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const INDEX_CSS: &str = include_str!("../static/index.css");
const THEME_CSS: &str = include_str!("../static/theme.css");

/// Shared stylesheet fragment, included in the `<head>` of every article page.
pub fn stylesheet_fragment() -> String {
    format!("<style>\n{}</style>", THEME_CSS)
}

/// One line of the collection index.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberEntry {
    pub name: String,
    pub date: String,
}

/// One line of the site index "Collections" section.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub name: String,
    pub date: String,
    pub count: usize,
}

/// One line of the site index "Posts" section.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub name: String,
    /// Site-root-relative link to the post's version index.
    pub url: String,
    pub date: String,
}

/// Everything the site index shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteIndex {
    pub title: String,
    pub last_updated: String,
    pub source_url: Option<String>,
    pub collections: Vec<CollectionSummary>,
    pub posts: Vec<PostSummary>,
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, head_extra: Option<Markup>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(extra) = head_extra {
                    (extra)
                }
                style { (PreEscaped(INDEX_CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn back_link(root_link: &str) -> Markup {
    html! {
        div.nav {
            a href=(root_link) { "← Back to all posts" }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders an article's version index. `versions` are slugs, newest first.
pub fn render_version_index(article: &str, versions: &[String], root_link: &str) -> Markup {
    let content = html! {
        h1 { (article) }
        p {
            strong {
                a href=(LATEST_FILE) { "📄 Latest Version" }
            }
        }
        @if !versions.is_empty() {
            h2 { "Version History" }
            ul {
                @for version in versions {
                    li {
                        a href={ (version) ".html" } { (version) }
                    }
                }
            }
        }
        (back_link(root_link))
    };

    base_document(
        &format!("{article} - Versions"),
        Some(PreEscaped(stylesheet_fragment())),
        content,
    )
}

/// Renders a collection index.
pub fn render_collection_index(
    collection: &str,
    members: &[MemberEntry],
    root_link: &str,
) -> Markup {
    let content = html! {
        h1 { (collection) }
        ol {
            @for member in members {
                li {
                    a href={ (member.name) "/latest.html" } { (member.name) }
                    " "
                    span.date { "(" (member.date) ")" }
                    " "
                    span.meta {
                        "("
                        a href={ (member.name) "/index.html" } { "history" }
                        ")"
                    }
                }
            }
        }
        (back_link(root_link))
    };

    base_document(collection, None, content)
}

/// Renders the site index.
pub fn render_site_index(index: &SiteIndex) -> Markup {
    let content = html! {
        h1 { (index.title) }
        p.date {
            "Last updated: " (index.last_updated)
            @if let Some(url) = &index.source_url {
                " | "
                a href=(url) { "Source Code" }
            }
        }
        @if !index.collections.is_empty() {
            h2 { "Collections" }
            ul {
                @for collection in &index.collections {
                    li {
                        a href={ "collections/" (collection.name) "/index.html" } {
                            (collection.name)
                        }
                        " "
                        span.date { "(" (collection.date) ")" }
                        " "
                        span.meta { "(" (collection.count) " articles)" }
                    }
                }
            }
        }
        @if !index.posts.is_empty() {
            h2 { "Posts" }
            ul {
                @for post in &index.posts {
                    li {
                        a href=(post.url) { (post.name) }
                        " "
                        span.date { "(" (post.date) ")" }
                    }
                }
            }
        }
    };

    base_document(&index.title, None, content)
}

// ============================================================================
// Generators
// ============================================================================

/// Revision slugs rendered in an article directory, newest first.
///
/// Skips the version index, the latest page, and hidden files.
pub fn list_versions(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut versions: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "html"))
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .filter(|name| name != INDEX_FILE && name != LATEST_FILE && !name.starts_with('.'))
        .filter_map(|name| name.strip_suffix(".html").map(str::to_string))
        .collect();
    versions.sort_by(|a, b| b.cmp(a));
    Ok(versions)
}

/// Write `index.html` into an article directory. Returns the listed slugs.
pub fn write_version_index(
    dir: &Path,
    article: &str,
    root_link: &str,
) -> Result<Vec<String>, GenerateError> {
    let versions = list_versions(dir)?;
    let html = render_version_index(article, &versions, root_link);
    fs::write(dir.join(INDEX_FILE), html.into_string())?;
    Ok(versions)
}

/// Write `collections/<name>/index.html`. Returns the written path.
pub fn generate_collection_index(
    ctx: &BuildContext<'_>,
    collection: &Collection,
) -> Result<PathBuf, GenerateError> {
    let rel_dir = layout::collection_rel_dir(&collection.name);
    let dir = ctx.paths.output.join(&rel_dir);
    fs::create_dir_all(&dir)?;

    let members: Vec<MemberEntry> = collection
        .members
        .iter()
        .map(|doc| MemberEntry {
            name: doc.name(),
            date: vcs::latest_date(ctx.vcs, &doc.path).unwrap_or_else(|| ctx.build_date()),
        })
        .collect();

    let root_link = layout::root_link(layout::depth(&rel_dir));
    let html = render_collection_index(&collection.name, &members, &root_link);
    let path = dir.join(INDEX_FILE);
    fs::write(&path, html.into_string())?;
    Ok(path)
}

/// Gather the site index data from the scanned tree.
pub fn site_index(ctx: &BuildContext<'_>, tree: &SourceTree) -> SiteIndex {
    let last_updated = ctx.vcs.last_commit_time().unwrap_or_else(|e| {
        warn!("Could not read last commit time: {}", e);
        ctx.build_timestamp()
    });

    let collections = tree
        .collections
        .iter()
        .map(|collection| CollectionSummary {
            name: collection.name.clone(),
            date: collection
                .members
                .iter()
                .filter_map(|doc| vcs::latest_date(ctx.vcs, &doc.path))
                .max()
                .unwrap_or_else(|| ctx.build_date()),
            count: collection.members.len(),
        })
        .collect();

    let posts = tree
        .posts
        .iter()
        .rev()
        .map(|doc| PostSummary {
            name: doc.name(),
            url: layout::article_index_url(doc),
            date: vcs::latest_date(ctx.vcs, &doc.path).unwrap_or_else(|| ctx.build_date()),
        })
        .collect();

    SiteIndex {
        title: ctx.config.title.clone(),
        last_updated,
        source_url: ctx.config.source_url.clone(),
        collections,
        posts,
    }
}

/// Write the root `index.html`. Returns the data it was rendered from.
pub fn generate_site_index(
    ctx: &BuildContext<'_>,
    tree: &SourceTree,
) -> Result<SiteIndex, GenerateError> {
    let index = site_index(ctx, tree);
    fs::create_dir_all(&ctx.paths.output)?;
    fs::write(
        ctx.paths.output.join(INDEX_FILE),
        render_site_index(&index).into_string(),
    )?;
    Ok(index)
}

// ============================================================================
// Tests
// ============================================================================
