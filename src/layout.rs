//! Output tree layout.
//!
//! Every article gets its own directory; both source layouts normalize to the
//! same shape:
//!
//! ```text
//! blogs/2025/post.tex            → docs/blogs/2025/post/
//! blogs/2025/post/post.tex       → docs/blogs/2025/post/
//! collections/series/intro.tex   → docs/collections/series/intro/
//! collections/series/intro/intro.tex → docs/collections/series/intro/
//! ```

use crate::types::{DocumentKind, SourceDocument};
use std::path::{Component, Path, PathBuf};

/// Top-level output directory for standalone posts.
pub const BLOGS_DIR: &str = "blogs";

/// Top-level output directory for collections.
pub const COLLECTIONS_DIR: &str = "collections";

/// Directory (relative to the output root) that holds an article's pages.
pub fn article_rel_dir(doc: &SourceDocument) -> PathBuf {
    let name = doc.name();
    match &doc.kind {
        DocumentKind::Collection { name: collection } => {
            collection_rel_dir(collection).join(name)
        }
        DocumentKind::Standalone { relative } => {
            let parent = relative.parent().unwrap_or(Path::new(""));
            let base = Path::new(BLOGS_DIR).join(parent);
            if doc.in_eponymous_folder() {
                base
            } else {
                base.join(name)
            }
        }
    }
}

/// Absolute output directory of an article.
pub fn article_dir(output_root: &Path, doc: &SourceDocument) -> PathBuf {
    output_root.join(article_rel_dir(doc))
}

/// Directory (relative to the output root) of a collection.
pub fn collection_rel_dir(collection: &str) -> PathBuf {
    Path::new(COLLECTIONS_DIR).join(collection)
}

/// Site-root-relative URL of an article's version index, e.g.
/// `blogs/2025/post/index.html`.
pub fn article_index_url(doc: &SourceDocument) -> String {
    format!("{}/index.html", to_url_path(&article_rel_dir(doc)))
}

/// Relative link from a directory `depth` levels below the output root back
/// to the site index.
pub fn root_link(depth: usize) -> String {
    format!("{}index.html", "../".repeat(depth))
}

/// Number of normal path components in a relative directory.
pub fn depth(rel_dir: &Path) -> usize {
    rel_dir
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
}

/// Join normal components with `/` regardless of platform separator.
fn to_url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
