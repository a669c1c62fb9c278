//! Flowdoc - declarative flowchart documents rendered to PDF.
//!
//! Flowcharts are described as pages of shapes, arrows, lines, free text and
//! flowing text sections in TOML. This crate loads those descriptions,
//! validates them into render-ready documents and draws them into PDF (or
//! SVG) output.

pub mod catalog;
pub mod config;
pub mod description;
pub mod document;
mod error;
pub mod export;
pub mod layout;
mod render;
pub mod theme;

pub use flowdoc_core::{color, draw, font, geometry};

pub use error::FlowdocError;

use std::path::{Path, PathBuf};

use log::{debug, info, trace};

use config::AppConfig;
use description::DocumentDescription;
use document::Document;
use export::{pdf::PdfDocument, svg::SvgDocument};
use theme::Theme;

/// Builder for loading and rendering flowchart documents.
///
/// This provides an API for processing flowchart descriptions through the
/// parsing, elaboration and rendering stages.
///
/// # Examples
///
/// ```rust,no_run
/// use flowdoc::{FlowchartBuilder, config::AppConfig};
///
/// let source = r#"
/// name = "demo"
/// file = "demo.pdf"
///
/// [[pages]]
/// title = "Demo"
///
/// [[pages.elements]]
/// kind = "rectangle"
/// x = 100.0
/// y = 300.0
/// width = 120.0
/// height = 40.0
/// label = "Start"
/// "#;
///
/// let builder = FlowchartBuilder::new(AppConfig::default());
/// let document = builder.load(source).expect("Failed to load");
/// let pdf = builder.render_pdf(&document).expect("Failed to render");
///
/// // Or use default config
/// let builder = FlowchartBuilder::default();
/// ```
#[derive(Default)]
pub struct FlowchartBuilder {
    config: AppConfig,
}

impl FlowchartBuilder {
    /// Create a new flowchart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse description source into its serde model.
    ///
    /// # Errors
    ///
    /// Returns `FlowdocError::Description` for malformed TOML or values that
    /// do not fit the description format.
    pub fn parse(&self, source: &str) -> Result<DocumentDescription, FlowdocError> {
        info!("Parsing description");
        let description = description::parse(source)
            .map_err(|err| FlowdocError::new_description_error(err, source))?;
        debug!(
            name = description.name.get_ref(),
            pages = description.pages.len();
            "Description parsed successfully",
        );
        Ok(description)
    }

    /// Validate a parsed description and resolve it into a [`Document`].
    ///
    /// `source` is the text the description was parsed from; diagnostics
    /// refer into it.
    ///
    /// # Errors
    ///
    /// Returns `FlowdocError::Config` for an unusable configuration and
    /// `FlowdocError::Description` for invalid descriptions.
    pub fn elaborate(
        &self,
        description: &DocumentDescription,
        source: &str,
    ) -> Result<Document, FlowdocError> {
        self.config.page().validate().map_err(FlowdocError::Config)?;
        let theme = Theme::from_style(self.config.style()).map_err(FlowdocError::Config)?;

        info!(name = description.name.get_ref(); "Elaborating description");
        let document = description::elaborate(description, &theme, self.config.page().dimensions())
            .map_err(|err| FlowdocError::new_description_error(err, source))?;
        trace!(document:?; "Elaborated document");
        Ok(document)
    }

    /// Parse and elaborate description source in one step.
    ///
    /// # Errors
    ///
    /// See [`FlowchartBuilder::parse`] and [`FlowchartBuilder::elaborate`].
    pub fn load(&self, source: &str) -> Result<Document, FlowdocError> {
        let description = self.parse(source)?;
        self.elaborate(&description, source)
    }

    /// Render a document to the bytes of a PDF file.
    ///
    /// # Errors
    ///
    /// Returns `FlowdocError::Export` if the PDF cannot be encoded.
    pub fn render_pdf(&self, document: &Document) -> Result<Vec<u8>, FlowdocError> {
        let page = self.config.page();
        info!(name = document.name(), pages = document.page_count(); "Rendering PDF");

        let mut pdf = PdfDocument::new(page.dimensions(), document.title());
        render::render_document(&mut pdf, document, page)?;
        let bytes = pdf.finish()?;

        info!(name = document.name(), bytes = bytes.len(); "PDF rendered successfully");
        Ok(bytes)
    }

    /// Render a document to one SVG string per page.
    ///
    /// # Errors
    ///
    /// Returns `FlowdocError::Export` if rendering fails.
    pub fn render_svg(&self, document: &Document) -> Result<Vec<String>, FlowdocError> {
        let page = self.config.page();
        info!(name = document.name(), pages = document.page_count(); "Rendering SVG");

        let mut svg = SvgDocument::new(page.dimensions());
        render::render_document(&mut svg, document, page)?;
        Ok(svg.finish())
    }

    /// Render a document and write it as a PDF file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FlowdocError::Export` if the PDF cannot be encoded or the
    /// file cannot be written.
    pub fn save_pdf(&self, document: &Document, path: &Path) -> Result<(), FlowdocError> {
        let page = self.config.page();
        let mut pdf = PdfDocument::new(page.dimensions(), document.title());
        render::render_document(&mut pdf, document, page)?;
        pdf.save(path)?;
        Ok(())
    }

    /// Render a document and write one SVG file per page into `dir`.
    ///
    /// Files are named `<stem>-<n>.svg`, where the stem is the document's
    /// output file name without its extension.
    ///
    /// # Errors
    ///
    /// Returns `FlowdocError::Export` if a file cannot be written.
    pub fn save_svg(
        &self,
        document: &Document,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, FlowdocError> {
        let page = self.config.page();
        let stem = Path::new(document.file())
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| document.name().to_string());

        let mut svg = SvgDocument::new(page.dimensions());
        render::render_document(&mut svg, document, page)?;
        Ok(svg.save(dir, &stem)?)
    }
}
