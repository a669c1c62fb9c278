//! Output formats for rendered flowchart documents.
//!
//! Every format is a [`Canvas`] that additionally knows about pages. The
//! renderer draws one page, asks the exporter for the next one and repeats;
//! the exporter owns whatever document state its format needs.

pub mod pdf;
pub mod svg;

use flowdoc_core::draw::Canvas;

/// A paginated drawing surface.
///
/// A fresh exporter has its first page open. Drawing always targets the
/// current page.
pub trait Exporter: Canvas {
    /// Flushes the current page and begins a new, empty one.
    fn new_page(&mut self) -> Result<(), Error>;

    /// Returns the number of pages, including the one being drawn.
    fn page_count(&self) -> usize;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Pdf(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Pdf(msg) => write!(f, "PDF error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) | Self::Pdf(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf(err.to_string())
    }
}
