//! Conversion engine trait and parameter types.
//!
//! [`ConvertParams`] describes *what* to convert; a [`Converter`] decides
//! *how*. The production converter is
//! [`PandocConverter`](super::pandoc::PandocConverter). The engine consumes
//! include files by path, so navigation and stylesheet fragments are passed as
//! paths rather than strings.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("converter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Inputs of one conversion: markup in, one HTML file out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertParams {
    /// Raw markup, fed to the engine on standard input.
    pub markup: String,
    /// Standalone HTML document to write.
    pub output: PathBuf,
    /// Document title metadata.
    pub title: String,
    /// Document date metadata (`YYYY-MM-DD`).
    pub date: String,
    /// Fragment included in `<head>`.
    pub header: Option<PathBuf>,
    /// Custom engine filter.
    pub filter: Option<PathBuf>,
    /// Fragment included before the body.
    pub before_body: Option<PathBuf>,
    /// Fragment included after the body.
    pub after_body: Option<PathBuf>,
}

/// Turns markup into a standalone HTML file.
pub trait Converter {
    /// Convert `params.markup` and write exactly one file at `params.output`.
    fn convert(&self, params: &ConvertParams) -> Result<(), ConvertError>;
}
