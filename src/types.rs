//! Shared types used across the build pipeline.

use crate::naming;
use std::path::{Path, PathBuf};

/// Which of the two source domains a document belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// A post under the blogs root. `relative` is the path below that root,
    /// e.g. `2025/post.tex`.
    Standalone { relative: PathBuf },
    /// A member of the named collection (the top-level directory under the
    /// collections root that contains it).
    Collection { name: String },
}

/// A markup source file. Identity is the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

impl SourceDocument {
    pub fn standalone(path: PathBuf, relative: PathBuf) -> Self {
        Self {
            path,
            kind: DocumentKind::Standalone { relative },
        }
    }

    pub fn collection_member(path: PathBuf, collection: impl Into<String>) -> Self {
        Self {
            path,
            kind: DocumentKind::Collection {
                name: collection.into(),
            },
        }
    }

    /// Article name: the file stem. Used as page title and output directory name.
    pub fn name(&self) -> String {
        file_stem(&self.path)
    }

    /// True when the file sits in a folder named after itself
    /// (`post/post.tex`).
    pub fn in_eponymous_folder(&self) -> bool {
        self.path
            .parent()
            .and_then(|p| p.file_name())
            .is_some_and(|dir| dir.to_string_lossy() == self.name())
    }
}

/// A named, ordered group of documents sharing prev/next navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub name: String,
    pub dir: PathBuf,
    /// Members sorted by full path.
    pub members: Vec<SourceDocument>,
}

/// A historical snapshot of a document tied to one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Commit identifier.
    pub id: String,
    /// Commit timestamp shaped `YYYY-MM-DD HH:MM:SS +ZZZZ`.
    pub timestamp: String,
}

impl Revision {
    pub fn new(id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Output file stem for this revision, e.g. `2025-01-02T11:30`.
    pub fn slug(&self) -> String {
        naming::revision_slug(&self.timestamp)
    }

    /// Calendar date portion of the timestamp, e.g. `2025-01-02`.
    pub fn date(&self) -> &str {
        naming::display_date(&self.timestamp)
    }
}

/// Outcome of a successful history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum History {
    /// The path is not under version control.
    Untracked,
    /// Revisions ordered oldest first. May be empty.
    Revisions(Vec<Revision>),
}

impl History {
    pub fn into_revisions(self) -> Vec<Revision> {
        match self {
            History::Untracked => Vec::new(),
            History::Revisions(revisions) => revisions,
        }
    }
}

/// Derived position of a collection member, used for prev/next links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPosition {
    pub collection: String,
    /// Zero-based index in the path-sorted member list.
    pub index: usize,
    pub total: usize,
    /// Article name of the previous member, absent for the first.
    pub prev: Option<String>,
    /// Article name of the next member, absent for the last.
    pub next: Option<String>,
}

impl CollectionPosition {
    /// Position of member `index` within `collection`.
    pub fn of(collection: &Collection, index: usize) -> Self {
        let prev = index
            .checked_sub(1)
            .and_then(|i| collection.members.get(i))
            .map(SourceDocument::name);
        let next = collection.members.get(index + 1).map(SourceDocument::name);
        Self {
            collection: collection.name.clone(),
            index,
            total: collection.members.len(),
            prev,
            next,
        }
    }
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
