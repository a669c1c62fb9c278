//! Error types for Flowdoc operations.
//!
//! This module provides the main error type [`FlowdocError`] which wraps
//! the error conditions that can occur while loading, rendering and writing
//! flowchart documents.

use std::io;

use thiserror::Error;

use crate::description::DescriptionError;

/// The main error type for Flowdoc operations.
///
/// # Diagnostic Variants
///
/// The `Description` variant contains structured error information with
/// source spans into the description text it was loaded from. This provides
/// detailed error information that can be used for rich error reporting.
#[derive(Debug, Error)]
pub enum FlowdocError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Description { err: DescriptionError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for FlowdocError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Render(msg) => Self::Render(msg),
            other => Self::Export(Box::new(other)),
        }
    }
}

impl FlowdocError {
    /// Create a new `Description` error with the associated source text.
    pub fn new_description_error(err: DescriptionError, src: impl Into<String>) -> Self {
        Self::Description {
            err,
            src: src.into(),
        }
    }
}
