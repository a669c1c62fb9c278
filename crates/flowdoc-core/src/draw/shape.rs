//! Labelled flowchart shapes.
//!
//! A [`Shape`] is a box, a decision diamond or an oval terminator placed by
//! its bounding box, with an optional fill and a multi-line label centered on
//! the bounding box center.

use std::rc::Rc;

use super::{Canvas, Paint, StrokeDefinition, TextDefinition, TextLine, layout_lines};
use crate::{
    color::Color,
    geometry::{Bounds, Point},
};

/// The outline of a flowchart node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Process step
    #[default]
    Rectangle,
    /// Decision point, the rhombus inscribed in the bounding box
    Diamond,
    /// Start or end terminator, the ellipse inscribed in the bounding box
    Ellipse,
}

/// Returns the four vertices of the diamond inscribed in `bounds`,
/// clockwise from the top: top, right, bottom, left.
///
/// # Examples
///
/// ```
/// # use flowdoc_core::draw::diamond_vertices;
/// # use flowdoc_core::geometry::{Bounds, Point, Size};
/// let bounds = Bounds::new_from_origin(Point::new(10.0, 20.0), Size::new(40.0, 30.0));
/// let [top, right, bottom, left] = diamond_vertices(bounds);
/// assert_eq!(top, Point::new(30.0, 50.0));
/// assert_eq!(right, Point::new(50.0, 35.0));
/// assert_eq!(bottom, Point::new(30.0, 20.0));
/// assert_eq!(left, Point::new(10.0, 35.0));
/// ```
pub fn diamond_vertices(bounds: Bounds) -> [Point; 4] {
    let x = bounds.min_x();
    let y = bounds.min_y();
    let w = bounds.width();
    let h = bounds.height();
    [
        Point::new(x + w / 2.0, y + h),
        Point::new(x + w, y + h / 2.0),
        Point::new(x + w / 2.0, y),
        Point::new(x, y + h / 2.0),
    ]
}

/// A positioned, styled and labelled flowchart node.
///
/// Styles are shared through [`Rc`] so that every shape on a page can point
/// at the same stroke and label definitions.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    bounds: Bounds,
    label: String,
    fill: Option<Color>,
    stroke: Rc<StrokeDefinition>,
    text: Rc<TextDefinition>,
}

impl Shape {
    /// Creates an unfilled, unlabelled shape with default styles.
    pub fn new(kind: ShapeKind, bounds: Bounds) -> Self {
        Self {
            kind,
            bounds,
            label: String::new(),
            fill: None,
            stroke: Rc::new(StrokeDefinition::default()),
            text: Rc::new(TextDefinition::default()),
        }
    }

    /// Sets the label; `\n` separates lines.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the fill color.
    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: Rc<StrokeDefinition>) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the label text style.
    pub fn with_text(mut self, text: Rc<TextDefinition>) -> Self {
        self.text = text;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Returns the label laid out around the bounds center.
    pub fn label_lines(&self) -> Vec<TextLine<'_>> {
        layout_lines(&self.label, self.bounds.center(), &self.text)
    }

    /// Draws the outline (filled and stroked) followed by the label.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let paint = Paint::new(self.fill, Some(self.stroke.as_ref()));
        match self.kind {
            ShapeKind::Rectangle => canvas.draw_rect(self.bounds, paint),
            ShapeKind::Diamond => canvas.draw_polygon(&diamond_vertices(self.bounds), paint),
            ShapeKind::Ellipse => canvas.draw_ellipse(self.bounds, paint),
        }

        for line in self.label_lines() {
            canvas.draw_text(line.origin(), line.content(), &self.text);
        }
    }
}
