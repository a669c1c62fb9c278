//! Flowchart descriptions: the TOML input format.
//!
//! Loading a description is a two-step pipeline:
//!
//! 1. [`parse`] deserializes the TOML text into a [`DocumentDescription`],
//!    keeping byte spans for the values later checks refer to.
//! 2. [`elaborate`] validates the description and turns it into a
//!    render-ready [`Document`](crate::document::Document).
//!
//! Both steps report problems as [`DescriptionError`]s whose diagnostics
//! point into the original source text.

mod elaborate;
mod error;
mod model;

pub use error::{DescriptionError, Diagnostic, ErrorCode, Label};
pub use model::{
    DocumentDescription, ElementDescription, ElementKind, EndpointDescription, PageDescription,
    Unit,
};

use flowdoc_core::geometry::Size;

use crate::{document::Document, theme::Theme};

/// Parses a description from TOML source text.
///
/// # Errors
///
/// Returns an `E100` diagnostic for malformed TOML or values that do not
/// fit the description schema, labelled with the offending span when the
/// TOML parser knows it.
pub fn parse(source: &str) -> Result<DocumentDescription, DescriptionError> {
    toml::from_str(source).map_err(|err| {
        let mut diagnostic = Diagnostic::error(err.message().trim_end().to_string())
            .with_code(ErrorCode::E100)
            .with_help("descriptions are TOML with `name`, `file` and `[[pages]]` tables");
        if let Some(span) = err.span() {
            diagnostic = diagnostic.with_label(span, "here");
        }
        DescriptionError::from(diagnostic)
    })
}

/// Validates a parsed description and resolves it for a page of `page_size`.
///
/// # Errors
///
/// Returns every problem found, see [`ErrorCode`] for the categories.
pub fn elaborate(
    description: &DocumentDescription,
    theme: &Theme,
    page_size: Size,
) -> Result<Document, DescriptionError> {
    elaborate::Builder::new(theme, page_size).build(description)
}
