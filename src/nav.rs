//! Article navigation fragments.
//!
//! Collection members get a block at the top and bottom of every page:
//!
//! ```text
//! Collection: series
//! ← Previous: 01-intro | Collection Index | Next: 03-wrap-up →
//! ```
//!
//! with a horizontal rule between the block and the article body. Standalone
//! posts get a single "back to all posts" link at the bottom.
//!
//! The converter includes fragments by file path, so [`NavFiles`] writes them
//! to temporary files inside the article's output directory. The files are
//! removed when the `NavFiles` value is dropped, whether rendering succeeded
//! or not.

use crate::types::CollectionPosition;
use maud::{Markup, html};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Which edge of the article a fragment is rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
}

/// Horizontal rule separating navigation from the article body.
fn rule() -> Markup {
    html! {
        hr style="margin: 2em 0; border: none; border-top: 1px solid #ddd;";
    }
}

/// Collection navigation block: label, prev/index/next links, and a rule on
/// the body side.
pub fn collection_nav(position: &CollectionPosition, placement: Placement) -> Markup {
    html! {
        @if placement == Placement::Bottom {
            (rule())
        }
        nav style="margin: 1em 0;" {
            p style="color: #666; font-size: 0.9em; margin-bottom: 0.5em;" {
                "Collection: " (position.collection)
            }
            p {
                @if let Some(prev) = &position.prev {
                    a href={ "../" (prev) "/latest.html" } { "← Previous: " (prev) }
                    " | "
                }
                a href="../index.html" { "Collection Index" }
                @if let Some(next) = &position.next {
                    " | "
                    a href={ "../" (next) "/latest.html" } { "Next: " (next) " →" }
                }
            }
        }
        @if placement == Placement::Top {
            (rule())
        }
    }
}

/// Standalone navigation: a rule and a link back to the site index.
pub fn standalone_nav(root_link: &str) -> Markup {
    html! {
        (rule())
        nav style="margin-top: 1em;" {
            p {
                a href=(root_link) { "← Back to all posts" }
            }
        }
    }
}

/// Navigation fragments materialized as temporary files for one article.
#[derive(Debug, Default)]
pub struct NavFiles {
    top: Option<NamedTempFile>,
    bottom: Option<NamedTempFile>,
}

impl NavFiles {
    /// Top and bottom collection navigation.
    pub fn for_collection(dir: &Path, position: &CollectionPosition) -> io::Result<Self> {
        Ok(Self {
            top: Some(write_fragment(
                dir,
                ".nav-top",
                &collection_nav(position, Placement::Top),
            )?),
            bottom: Some(write_fragment(
                dir,
                ".nav-bottom",
                &collection_nav(position, Placement::Bottom),
            )?),
        })
    }

    /// Bottom-only link back to the site index.
    pub fn for_standalone(dir: &Path, root_link: &str) -> io::Result<Self> {
        Ok(Self {
            top: None,
            bottom: Some(write_fragment(
                dir,
                ".nav-bottom",
                &standalone_nav(root_link),
            )?),
        })
    }

    pub fn top(&self) -> Option<PathBuf> {
        self.top.as_ref().map(|f| f.path().to_path_buf())
    }

    pub fn bottom(&self) -> Option<PathBuf> {
        self.bottom.as_ref().map(|f| f.path().to_path_buf())
    }
}

fn write_fragment(dir: &Path, prefix: &str, markup: &Markup) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".html")
        .tempfile_in(dir)?;
    file.write_all(markup.0.as_bytes())?;
    file.flush()?;
    debug!("wrote navigation fragment {}", file.path().display());
    Ok(file)
}
