//! Markup-to-HTML conversion.
//!
//! - **Backend**: [`Converter`] trait, [`ConvertParams`], [`ConvertError`]
//! - **Pandoc**: [`PandocConverter`], the production implementation

pub mod backend;
pub mod pandoc;

pub use backend::{ConvertError, ConvertParams, Converter};
pub use pandoc::PandocConverter;
