//! Diagnostics produced while loading a flowchart description.
//!
//! A [`Diagnostic`] is a single error message with an optional error code,
//! labelled byte ranges into the description source and help text. All
//! diagnostics found while loading one description are collected into a
//! [`DescriptionError`], so a user sees every problem at once.
//!
//! # Example
//!
//! ```
//! # use flowdoc::description::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::error("shape id `start` is defined multiple times")
//!     .with_code(ErrorCode::E301)
//!     .with_label(120..127, "duplicate definition")
//!     .with_secondary_label(40..47, "first defined here")
//!     .with_help("give each shape on a page a unique id");
//!
//! assert_eq!(diag.labels().len(), 2);
//! ```

use std::{fmt, ops::Range};

/// Error codes for categorizing description diagnostics.
///
/// - `E1xx` - Syntax and schema errors
/// - `E2xx` - Value errors
/// - `E3xx` - Reference errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid TOML or a value of the wrong shape for the description schema.
    E100,

    /// A field required by the element kind is missing.
    E101,

    /// A field is set that the element kind does not use.
    E102,

    /// The document has no pages.
    E103,

    /// Invalid color string.
    E200,

    /// Unknown font name.
    E201,

    /// Invalid stroke style.
    E202,

    /// Non-positive shape size.
    E203,

    /// Non-finite number.
    E204,

    /// Invalid output file name.
    E205,

    /// Reference to a shape id that does not exist on the page.
    E300,

    /// Shape id defined more than once on a page.
    E301,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A labelled byte range into the description source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Range<usize>,
    message: String,
    primary: bool,
}

impl Label {
    /// Returns the labelled byte range.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the label text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true for the label pointing at the error itself.
    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

/// A single error found in a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    code: Option<ErrorCode>,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Creates an error diagnostic with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            labels: Vec::new(),
            help: None,
        }
    }

    /// Sets the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Adds the primary label.
    pub fn with_label(mut self, span: Range<usize>, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            primary: true,
        });
        self
    }

    /// Adds a secondary label giving context.
    pub fn with_secondary_label(mut self, span: Range<usize>, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            primary: false,
        });
        self
    }

    /// Sets the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Error type for description loading.
///
/// Wraps one or more diagnostics.
#[derive(Debug)]
pub struct DescriptionError {
    diagnostics: Vec<Diagnostic>,
}

impl DescriptionError {
    /// Create a new description error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for DescriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{first}")?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DescriptionError {}

impl From<Diagnostic> for DescriptionError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for DescriptionError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_single() {
        let err = DescriptionError::from(Diagnostic::error("bad color").with_code(ErrorCode::E200));
        assert_eq!(err.to_string(), "[E200] bad color");
    }

    #[test]
    fn test_display_counts_extra_diagnostics() {
        let err = DescriptionError::from(vec![
            Diagnostic::error("first"),
            Diagnostic::error("second"),
            Diagnostic::error("third"),
        ]);
        assert_eq!(err.to_string(), "first (+2 more)");
        assert_eq!(err.diagnostics().len(), 3);
    }

    #[test]
    fn test_label_order_and_primary_flag() {
        let diag = Diagnostic::error("duplicate")
            .with_label(10..15, "here")
            .with_secondary_label(0..5, "first");

        assert!(diag.labels()[0].is_primary());
        assert!(!diag.labels()[1].is_primary());
        assert_eq!(diag.labels()[1].span(), 0..5);
        assert_eq!(diag.help(), None);
    }
}
