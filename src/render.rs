//! Page rendering: one markup text in, one HTML file out.
//!
//! Wraps a [`Converter`] with the inputs shared by every page of a build: the
//! stylesheet header fragment and the optional custom filter. Each is passed
//! only if its file exists when the renderer is created.

use crate::convert::{ConvertError, ConvertParams, Converter};
use crate::nav::NavFiles;
use std::path::{Path, PathBuf};

/// Title, date, and destination of one page.
#[derive(Debug, Clone, Copy)]
pub struct PageMeta<'a> {
    pub output: &'a Path,
    pub title: &'a str,
    pub date: &'a str,
}

pub struct PageRenderer<'a> {
    converter: &'a dyn Converter,
    header: Option<PathBuf>,
    filter: Option<PathBuf>,
}

impl<'a> PageRenderer<'a> {
    pub fn new(converter: &'a dyn Converter, header: &Path, filter: &Path) -> Self {
        Self {
            converter,
            header: header.exists().then(|| header.to_path_buf()),
            filter: filter.exists().then(|| filter.to_path_buf()),
        }
    }

    /// Render markup text to `meta.output`, wrapping it in the article's
    /// navigation fragments.
    pub fn render(
        &self,
        markup: &str,
        meta: PageMeta<'_>,
        nav: &NavFiles,
    ) -> Result<(), ConvertError> {
        self.converter.convert(&ConvertParams {
            markup: markup.to_string(),
            output: meta.output.to_path_buf(),
            title: meta.title.to_string(),
            date: meta.date.to_string(),
            header: self.header.clone(),
            filter: self.filter.clone(),
            before_body: nav.top(),
            after_body: nav.bottom(),
        })
    }
}
