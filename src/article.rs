//! Article building: every revision of one source document, plus its latest
//! page and version index.
//!
//! For a document with N revisions the article directory ends up holding
//! N revision pages, `latest.html`, and `index.html`. A revision that cannot
//! be fetched or rendered is logged and skipped. Failing to create the
//! directory, read the working-tree file, or render the latest page aborts
//! the build.

use crate::convert::ConvertError;
use crate::generate::{self, GenerateError};
use crate::layout;
use crate::naming::{self, LATEST_FILE};
use crate::nav::NavFiles;
use crate::render::{PageMeta, PageRenderer};
use crate::site::BuildContext;
use crate::types::{CollectionPosition, DocumentKind, Revision, SourceDocument};
use crate::vcs::{self, VcsError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write navigation for {path}: {source}")]
    Navigation {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        source: ConvertError,
    },
    #[error("Failed to write version index: {0}")]
    VersionIndex(#[from] GenerateError),
}

/// Why a single revision produced no page.
#[derive(Error, Debug)]
pub enum RevisionError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] VcsError),
    #[error("render failed: {0}")]
    Render(#[from] ConvertError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRevision {
    pub slug: String,
    pub revision: String,
    pub reason: String,
}

/// What one article build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleReport {
    pub name: String,
    pub output_dir: PathBuf,
    /// Page files rendered, in render order; `latest.html` last.
    pub pages: Vec<String>,
    pub skipped: Vec<SkippedRevision>,
    /// False when the document is untracked or its history query failed.
    pub had_history: bool,
    /// Display date of the latest page.
    pub latest_date: String,
}

/// Build one article into its output directory.
///
/// `position` selects collection navigation; without it, standalone posts get
/// a back link and collection members get no navigation.
pub fn build_article(
    ctx: &BuildContext<'_>,
    doc: &SourceDocument,
    position: Option<&CollectionPosition>,
) -> Result<ArticleReport, ArticleError> {
    let rel_dir = layout::article_rel_dir(doc);
    let output_dir = layout::article_dir(&ctx.paths.output, doc);
    fs::create_dir_all(&output_dir).map_err(|source| ArticleError::CreateDir {
        path: output_dir.clone(),
        source,
    })?;

    let name = doc.name();
    let root_link = layout::root_link(layout::depth(&rel_dir));
    let revisions = vcs::resolve_history(ctx.vcs, &doc.path);

    let mut report = ArticleReport {
        name: name.clone(),
        output_dir: output_dir.clone(),
        pages: Vec::new(),
        skipped: Vec::new(),
        had_history: !revisions.is_empty(),
        latest_date: String::new(),
    };

    {
        // Fragment files are removed when `nav` goes out of scope, including
        // on the error path.
        let nav = match (position, &doc.kind) {
            (Some(position), _) => NavFiles::for_collection(&output_dir, position),
            (None, DocumentKind::Standalone { .. }) => {
                NavFiles::for_standalone(&output_dir, &root_link)
            }
            (None, DocumentKind::Collection { .. }) => Ok(NavFiles::default()),
        }
        .map_err(|source| ArticleError::Navigation {
            path: output_dir.clone(),
            source,
        })?;

        let renderer = ctx.renderer();
        for revision in &revisions {
            let slug = revision.slug();
            let page = naming::page_file(&slug);
            match render_revision(ctx, &renderer, doc, revision, &output_dir.join(&page), &nav) {
                Ok(()) => report.pages.push(page),
                Err(e) => {
                    warn!(
                        "Failed to get version {} of {}: {}",
                        slug,
                        doc.path.display(),
                        e
                    );
                    report.skipped.push(SkippedRevision {
                        slug,
                        revision: revision.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.latest_date = match revisions.last() {
            Some(newest) => newest.date().to_string(),
            None => ctx.build_date(),
        };
        render_latest(&renderer, doc, &output_dir, &report.latest_date, &nav)?;
        report.pages.push(LATEST_FILE.to_string());
    }

    generate::write_version_index(&output_dir, &name, &root_link)?;
    Ok(report)
}

fn render_revision(
    ctx: &BuildContext<'_>,
    renderer: &PageRenderer<'_>,
    doc: &SourceDocument,
    revision: &Revision,
    output: &Path,
    nav: &NavFiles,
) -> Result<(), RevisionError> {
    let content = ctx.vcs.show(&doc.path, &revision.id)?;
    renderer.render(
        &content,
        PageMeta {
            output,
            title: &doc.name(),
            date: revision.date(),
        },
        nav,
    )?;
    Ok(())
}

fn render_latest(
    renderer: &PageRenderer<'_>,
    doc: &SourceDocument,
    output_dir: &Path,
    date: &str,
    nav: &NavFiles,
) -> Result<(), ArticleError> {
    let content = fs::read_to_string(&doc.path).map_err(|source| ArticleError::ReadSource {
        path: doc.path.clone(),
        source,
    })?;
    let output = output_dir.join(LATEST_FILE);
    renderer
        .render(
            &content,
            PageMeta {
                output: &output,
                title: &doc.name(),
                date,
            },
            nav,
        )
        .map_err(|source| ArticleError::Render {
            path: output.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::backend::tests::MockConverter;
    use crate::test_helpers::TestSite;
    use crate::types::Collection;

    fn visible_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    // =========================================================================
    // Page counts and dates
    // =========================================================================

    #[test]
    fn untracked_document_renders_latest_only() {
        let site = TestSite::new().post("2025/post.tex", "current");
        let vcs = site.vcs();
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);
        let tree = site.scan();
        let doc = &tree.posts[0];

        let report = build_article(&ctx, doc, None).unwrap();
        assert!(!report.had_history);
        assert_eq!(report.pages, vec!["latest.html"]);
        assert_eq!(report.latest_date, TestSite::BUILD_DATE);
        assert_eq!(report.output_dir, site.path("docs/blogs/2025/post"));
        assert_eq!(visible_files(&report.output_dir), vec!["index.html", "latest.html"]);

        let latest = converter.conversion_for("latest.html");
        assert_eq!(latest.params.markup, "current");
        assert_eq!(latest.params.title, "post");
        assert_eq!(latest.params.date, TestSite::BUILD_DATE);
    }

    #[test]
    fn each_revision_gets_a_page_plus_latest() {
        let site = TestSite::new().post("2025/post.tex", "v3");
        let path = site.path("blogs/2025/post.tex");
        let vcs = site.vcs().with_file(
            &path,
            &[
                ("aaa", "2025-01-01 10:00:00 +0800", "v1"),
                ("bbb", "2025-01-02 11:30:00 +0800", "v2"),
            ],
        );
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);
        let tree = site.scan();
        let doc = &tree.posts[0];

        let report = build_article(&ctx, doc, None).unwrap();
        assert!(report.had_history);
        assert_eq!(
            report.pages,
            vec!["2025-01-01T10:00.html", "2025-01-02T11:30.html", "latest.html"]
        );
        assert_eq!(
            visible_files(&report.output_dir),
            vec![
                "2025-01-01T10:00.html",
                "2025-01-02T11:30.html",
                "index.html",
                "latest.html",
            ]
        );

        let first = converter.conversion_for("2025-01-01T10:00.html");
        assert_eq!(first.params.markup, "v1");
        assert_eq!(first.params.date, "2025-01-01");
        let latest = converter.conversion_for("latest.html");
        assert_eq!(latest.params.markup, "v3");
        assert_eq!(latest.params.date, "2025-01-02");
        assert_eq!(report.latest_date, "2025-01-02");

        let index = fs::read_to_string(report.output_dir.join("index.html")).unwrap();
        assert!(
            index.find("2025-01-02T11:30.html").unwrap()
                < index.find("2025-01-01T10:00.html").unwrap()
        );
    }

    #[test]
    fn same_minute_revisions_share_a_page() {
        let site = TestSite::new().post("post.tex", "now");
        let path = site.path("blogs/post.tex");
        let vcs = site.vcs().with_file(
            &path,
            &[
                ("aaa", "2025-01-01 10:00:05 +0800", "first"),
                ("bbb", "2025-01-01 10:00:40 +0800", "second"),
            ],
        );
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);

        let report = build_article(&ctx, &site.scan().posts[0], None).unwrap();
        assert_eq!(
            visible_files(&report.output_dir),
            vec!["2025-01-01T10:00.html", "index.html", "latest.html"]
        );
        let page = fs::read_to_string(report.output_dir.join("2025-01-01T10:00.html")).unwrap();
        assert!(page.contains("second"));
    }

    // =========================================================================
    // Failure handling
    // =========================================================================

    #[test]
    fn unfetchable_revision_is_skipped() {
        let site = TestSite::new().post("post.tex", "now");
        let path = site.path("blogs/post.tex");
        let vcs = site
            .vcs()
            .with_file(
                &path,
                &[
                    ("aaa", "2025-01-01 10:00:00 +0800", "v1"),
                    ("bbb", "2025-01-02 10:00:00 +0800", "v2"),
                ],
            )
            .with_unfetchable(&path, "aaa");
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);

        let report = build_article(&ctx, &site.scan().posts[0], None).unwrap();
        assert_eq!(report.pages, vec!["2025-01-02T10:00.html", "latest.html"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].slug, "2025-01-01T10:00");
        assert_eq!(report.skipped[0].revision, "aaa");
        assert!(report.skipped[0].reason.starts_with("fetch failed"));
    }

    #[test]
    fn unrenderable_revision_is_skipped() {
        let site = TestSite::new().post("post.tex", "fine");
        let path = site.path("blogs/post.tex");
        let vcs = site.vcs().with_file(
            &path,
            &[
                ("aaa", "2025-01-01 10:00:00 +0800", "BROKEN"),
                ("bbb", "2025-01-02 10:00:00 +0800", "ok"),
            ],
        );
        let converter = MockConverter::failing_on("BROKEN");
        let ctx = site.context(&vcs, &converter);

        let report = build_article(&ctx, &site.scan().posts[0], None).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.starts_with("render failed"));
        assert!(!report.output_dir.join("2025-01-01T10:00.html").exists());
        assert!(report.output_dir.join("latest.html").exists());
    }

    #[test]
    fn broken_history_falls_back_to_latest() {
        let site = TestSite::new().post("post.tex", "now");
        let vcs = site.vcs().with_broken_history(&site.path("blogs/post.tex"));
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);

        let report = build_article(&ctx, &site.scan().posts[0], None).unwrap();
        assert!(!report.had_history);
        assert_eq!(report.pages, vec!["latest.html"]);
    }

    #[test]
    fn latest_failure_is_fatal_and_cleans_nav() {
        let site = TestSite::new().post("2025/post.tex", "BROKEN");
        let vcs = site.vcs();
        let converter = MockConverter::failing_on("BROKEN");
        let ctx = site.context(&vcs, &converter);

        let result = build_article(&ctx, &site.scan().posts[0], None);
        assert!(matches!(result, Err(ArticleError::Render { .. })));
        assert!(visible_files(&site.path("docs/blogs/2025/post")).is_empty());
    }

    #[test]
    fn missing_source_is_fatal() {
        let site = TestSite::new();
        let vcs = site.vcs();
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);
        let doc =
            SourceDocument::standalone(site.path("blogs/gone.tex"), PathBuf::from("gone.tex"));

        let result = build_article(&ctx, &doc, None);
        assert!(matches!(result, Err(ArticleError::ReadSource { .. })));
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[test]
    fn standalone_gets_back_link_only() {
        let site = TestSite::new().post("2025/post.tex", "x");
        let vcs = site.vcs();
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);

        build_article(&ctx, &site.scan().posts[0], None).unwrap();
        let latest = converter.conversion_for("latest.html");
        assert!(latest.before_body.is_none());
        let after = latest.after_body.unwrap();
        assert!(after.contains(r#"href="../../../index.html""#));
        assert!(after.contains("Back to all posts"));
    }

    #[test]
    fn collection_member_gets_both_nav_blocks() {
        let site = TestSite::new()
            .member("series", "a.tex", "A")
            .member("series", "b.tex", "B");
        let vcs = site.vcs();
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);
        let tree = site.scan();
        let collection: &Collection = &tree.collections[0];
        let position = CollectionPosition::of(collection, 1);

        let report = build_article(&ctx, &collection.members[1], Some(&position)).unwrap();
        assert_eq!(report.output_dir, site.path("docs/collections/series/b"));

        let latest = converter.conversion_for("latest.html");
        let top = latest.before_body.unwrap();
        assert!(top.contains("Collection: series"));
        assert!(top.contains("Previous: a"));
        assert!(latest.after_body.unwrap().contains("Collection Index"));

        let index = fs::read_to_string(report.output_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"href="../../../index.html""#));
    }

    #[test]
    fn collection_member_without_position_has_no_nav() {
        let site = TestSite::new().member("series", "a.tex", "A");
        let vcs = site.vcs();
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);
        let tree = site.scan();

        build_article(&ctx, &tree.collections[0].members[0], None).unwrap();
        let latest = converter.conversion_for("latest.html");
        assert!(latest.before_body.is_none());
        assert!(latest.after_body.is_none());
    }

    #[test]
    fn nav_fragments_removed_after_build() {
        let site = TestSite::new().member("series", "a.tex", "A");
        let path = site.path("collections/series/a.tex");
        let vcs = site
            .vcs()
            .with_file(&path, &[("r1", "2025-01-01 10:00:00 +0800", "A0")]);
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);
        let tree = site.scan();
        let position = CollectionPosition::of(&tree.collections[0], 0);

        let report = build_article(&ctx, &tree.collections[0].members[0], Some(&position)).unwrap();
        assert!(
            visible_files(&report.output_dir)
                .iter()
                .all(|name| !name.starts_with(".nav"))
        );
    }

    #[test]
    fn eponymous_folder_collapses() {
        let site = TestSite::new().post("2025/post/post.tex", "x");
        let vcs = site.vcs();
        let converter = site.converter();
        let ctx = site.context(&vcs, &converter);

        let report = build_article(&ctx, &site.scan().posts[0], None).unwrap();
        assert_eq!(report.output_dir, site.path("docs/blogs/2025/post"));
    }
}
