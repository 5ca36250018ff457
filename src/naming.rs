//! Filename derivation for revision pages.
//!
//! Every historical revision of an article is written to a file named after
//! its commit timestamp, truncated to the minute:
//!
//! ```text
//! 2025-01-01 10:00:00 +0800  →  2025-01-01T10:00.html
//! 2025-01-02 11:30:45 -0500  →  2025-01-02T11:30.html
//! ```
//!
//! Slugs sort lexicographically in commit order, which is what the version
//! index relies on. Two commits within the same minute produce the same slug;
//! the later one overwrites the earlier page.

/// File name of the per-directory index page.
pub const INDEX_FILE: &str = "index.html";

/// File name of the page rendered from the current working tree.
pub const LATEST_FILE: &str = "latest.html";

/// Derive the output slug from a `YYYY-MM-DD HH:MM:SS +ZZZZ` timestamp.
///
/// Spaces become `T`, everything from a `+` onward is dropped, then the last
/// `:`-separated field (seconds, plus a trailing negative offset if any) goes.
pub fn revision_slug(timestamp: &str) -> String {
    let joined = timestamp.trim().replace(' ', "T");
    let without_offset = joined.split('+').next().unwrap_or(&joined);
    match without_offset.rsplit_once(':') {
        Some((head, _)) => head.to_string(),
        None => without_offset.to_string(),
    }
}

/// Calendar date portion of a timestamp: everything before the first space.
pub fn display_date(timestamp: &str) -> &str {
    timestamp.split_whitespace().next().unwrap_or("")
}

/// Output file name for a slug.
pub fn page_file(slug: &str) -> String {
    format!("{slug}.html")
}
