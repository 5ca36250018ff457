//! Source discovery.
//!
//! Walks the two input roots and produces a [`SourceTree`]:
//!
//! ```text
//! repo/
//! ├── blogs/                       # Standalone posts
//! │   ├── 2025/
//! │   │   ├── first-post.tex
//! │   │   └── second-post/         # Eponymous folder (may hold figures)
//! │   │       └── second-post.tex
//! │   └── 2024/
//! │       └── old-post.tex
//! └── collections/                 # One subdirectory per collection
//!     └── series/
//!         ├── 01-intro.tex         # Members ordered by full path
//!         └── 02-details/
//!             └── 02-details.tex
//! ```
//!
//! Missing roots are not an error: a repository may have only posts or only
//! collections.

use crate::types::{Collection, SourceDocument};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Everything the build discovered.
#[derive(Debug, Default)]
pub struct SourceTree {
    /// Standalone posts sorted by path.
    pub posts: Vec<SourceDocument>,
    /// Collections sorted by name; members sorted by path.
    pub collections: Vec<Collection>,
    /// Whether the blogs root exists at all.
    pub has_blogs_root: bool,
    /// Whether the collections root exists at all.
    pub has_collections_root: bool,
}

/// Scan both input roots for files with the given extension.
pub fn scan(blogs: &Path, collections: &Path, extension: &str) -> Result<SourceTree, ScanError> {
    let mut tree = SourceTree::default();

    if blogs.is_dir() {
        tree.has_blogs_root = true;
        tree.posts = find_markup_files(blogs, extension)?
            .into_iter()
            .map(|path| {
                let relative = path.strip_prefix(blogs).unwrap_or(&path).to_path_buf();
                SourceDocument::standalone(path, relative)
            })
            .collect();
    } else {
        info!("No blogs directory found at {}", blogs.display());
    }

    if collections.is_dir() {
        tree.has_collections_root = true;
        tree.collections = scan_collections(collections, extension)?;
    } else {
        info!("No collections directory found at {}", collections.display());
    }

    Ok(tree)
}

fn scan_collections(root: &Path, extension: &str) -> Result<Vec<Collection>, ScanError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut collections = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let members = find_markup_files(&dir, extension)?
            .into_iter()
            .map(|path| SourceDocument::collection_member(path, name.clone()))
            .collect();
        collections.push(Collection { name, dir, members });
    }
    Ok(collections)
}

/// All files under `root` (recursively) with the given extension, sorted by path.
pub fn find_markup_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|e| e == extension)
}
