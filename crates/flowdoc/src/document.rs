//! The elaborated, render-ready form of a flowchart document.
//!
//! A [`Document`] holds fully resolved drawing values: every coordinate is in
//! points, every color and font is parsed and every shape anchor has been
//! replaced by a point. Renderers walk it without any further validation.

use std::rc::Rc;

use flowdoc_core::{
    draw::{Arrow, Shape, StrokeDefinition, TextAlign, TextDefinition},
    geometry::Point,
};

/// An ordered list of pages written to one output file.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    file: String,
    title: Option<String>,
    pages: Vec<Page>,
}

impl Document {
    pub fn new(name: String, file: String, title: Option<String>, pages: Vec<Page>) -> Self {
        Self {
            name,
            file,
            title,
            pages,
        }
    }

    /// Catalog key of the document
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output file name
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Title for the output metadata
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// The header drawn at the top-left margin of a page.
#[derive(Debug, Clone)]
pub struct PageHeader {
    title: String,
    subtitle: Option<String>,
    title_text: Rc<TextDefinition>,
    subtitle_text: Rc<TextDefinition>,
}

impl PageHeader {
    pub fn new(
        title: String,
        subtitle: Option<String>,
        title_text: Rc<TextDefinition>,
        subtitle_text: Rc<TextDefinition>,
    ) -> Self {
        Self {
            title,
            subtitle,
            title_text,
            subtitle_text,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn title_text(&self) -> &TextDefinition {
        &self.title_text
    }

    pub fn subtitle_text(&self) -> &TextDefinition {
        &self.subtitle_text
    }
}

/// One page: an optional header followed by elements in drawing order.
#[derive(Debug, Clone, Default)]
pub struct Page {
    header: Option<PageHeader>,
    elements: Vec<Element>,
}

impl Page {
    pub fn new(header: Option<PageHeader>, elements: Vec<Element>) -> Self {
        Self { header, elements }
    }

    pub fn header(&self) -> Option<&PageHeader> {
        self.header.as_ref()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns the shapes of this page in drawing order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.elements.iter().filter_map(|element| match element {
            Element::Shape(shape) => Some(shape),
            _ => None,
        })
    }

    /// Returns the arrows of this page in drawing order.
    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.elements.iter().filter_map(|element| match element {
            Element::Arrow(arrow) => Some(arrow),
            _ => None,
        })
    }
}

/// A drawable item of a page.
#[derive(Debug, Clone)]
pub enum Element {
    Shape(Shape),
    Arrow(Arrow),
    Line(Line),
    Text(TextBlock),
    Section(Section),
}

/// A plain stroked segment with no head.
#[derive(Debug, Clone)]
pub struct Line {
    from: Point,
    to: Point,
    stroke: Rc<StrokeDefinition>,
}

impl Line {
    pub fn new(from: Point, to: Point, stroke: Rc<StrokeDefinition>) -> Self {
        Self { from, to, stroke }
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

/// Free-standing text at an absolute position.
#[derive(Debug, Clone)]
pub struct TextBlock {
    anchor: Point,
    content: String,
    text: Rc<TextDefinition>,
    align: TextAlign,
}

impl TextBlock {
    pub fn new(anchor: Point, content: String, text: Rc<TextDefinition>, align: TextAlign) -> Self {
        Self {
            anchor,
            content,
            text,
            align,
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn text(&self) -> &TextDefinition {
        &self.text
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }
}

/// A heading and its lines, placed top-down by the layout context.
///
/// Spacing values are in points. `space_before` falls back to the page's
/// section gap when unset.
#[derive(Debug, Clone)]
pub struct Section {
    heading: Option<String>,
    heading_text: Rc<TextDefinition>,
    lines: Vec<String>,
    text: Rc<TextDefinition>,
    line_spacing: f32,
    heading_gap: f32,
    space_before: Option<f32>,
}

impl Section {
    pub fn new(
        heading: Option<String>,
        heading_text: Rc<TextDefinition>,
        lines: Vec<String>,
        text: Rc<TextDefinition>,
    ) -> Self {
        Self {
            heading,
            heading_text,
            lines,
            text,
            line_spacing: 20.0,
            heading_gap: 25.0,
            space_before: None,
        }
    }

    /// Sets the distance between consecutive line baselines.
    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Sets the distance from the heading baseline to the first line.
    pub fn with_heading_gap(mut self, heading_gap: f32) -> Self {
        self.heading_gap = heading_gap;
        self
    }

    /// Sets the extra space above the section.
    pub fn with_space_before(mut self, space_before: Option<f32>) -> Self {
        self.space_before = space_before;
        self
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn heading_text(&self) -> &Rc<TextDefinition> {
        &self.heading_text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> &Rc<TextDefinition> {
        &self.text
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn heading_gap(&self) -> f32 {
        self.heading_gap
    }

    pub fn space_before(&self) -> Option<f32> {
        self.space_before
    }
}
