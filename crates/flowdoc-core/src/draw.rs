//! Drawing primitives for flowchart pages.
//!
//! This module defines the visual vocabulary of a flowchart and the single
//! seam every output format implements:
//!
//! - [`Canvas`]: the drawing surface trait (PDF content stream, SVG document, ...)
//! - [`Shape`] / [`ShapeKind`]: labelled rectangles, diamonds and ellipses
//! - [`Arrow`] / [`ArrowDefinition`]: directed connectors with triangular heads
//! - [`StrokeDefinition`] / [`TextDefinition`]: reusable line and text styles
//!
//! All geometry (diamond vertices, arrowhead corners, label baselines) is
//! computed here, so canvases only receive absolute, fully resolved
//! primitives. Drawing functions take the canvas explicitly and keep no state
//! of their own.

mod arrow;
mod shape;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, arrow_head};
pub use shape::{Shape, ShapeKind, diamond_vertices};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{TextAlign, TextDefinition, TextLine, layout_lines};

use crate::{
    color::Color,
    geometry::{Bounds, Point},
};

/// Fill and outline applied to a closed figure.
///
/// A figure with neither a fill nor a stroke is invisible; canvases may skip it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paint<'a> {
    fill: Option<Color>,
    stroke: Option<&'a StrokeDefinition>,
}

impl<'a> Paint<'a> {
    /// Creates a paint with the given fill and stroke
    pub fn new(fill: Option<Color>, stroke: Option<&'a StrokeDefinition>) -> Self {
        Self { fill, stroke }
    }

    /// Creates a fill-only paint
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Returns the fill color, if any
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Returns the stroke, if any
    pub fn stroke(&self) -> Option<&'a StrokeDefinition> {
        self.stroke
    }

    /// Returns true if painting would leave no mark
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none()
    }
}

/// A drawing surface for one page.
///
/// Coordinates are page points with the origin at the bottom-left corner.
/// Implementations translate the calls into their output format; they do no
/// layout of their own.
pub trait Canvas {
    /// Draws an axis-aligned rectangle covering `bounds`.
    fn draw_rect(&mut self, bounds: Bounds, paint: Paint<'_>);

    /// Draws the ellipse inscribed in `bounds`.
    fn draw_ellipse(&mut self, bounds: Bounds, paint: Paint<'_>);

    /// Draws a closed polygon through `points` in order.
    fn draw_polygon(&mut self, points: &[Point], paint: Paint<'_>);

    /// Draws a straight line segment.
    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition);

    /// Draws one line of text with its baseline starting at `origin`.
    fn draw_text(&mut self, origin: Point, content: &str, text: &TextDefinition);
}

/// Renders a shape and its centered label onto the canvas.
///
/// This is a convenience wrapper around [`Shape::draw`].
pub fn draw_shape(canvas: &mut dyn Canvas, shape: &Shape) {
    shape.draw(canvas);
}

/// Renders an arrow (line, head and optional label) onto the canvas.
///
/// This is a convenience wrapper around [`Arrow::draw`].
pub fn draw_arrow(canvas: &mut dyn Canvas, arrow: &Arrow) {
    arrow.draw(canvas);
}

/// Renders free-standing, possibly multi-line text anchored at `anchor`.
///
/// With [`TextAlign::Start`] the first baseline starts at `anchor`; with
/// [`TextAlign::Center`] each line is centered on `anchor.x`. Following lines
/// step down by the definition's line height.
pub fn draw_text(
    canvas: &mut dyn Canvas,
    anchor: Point,
    content: &str,
    text: &TextDefinition,
    align: TextAlign,
) {
    for line in text::flow_lines(content, anchor, text, align) {
        canvas.draw_text(line.origin(), line.content(), text);
    }
}


#[cfg(test)]
mod tests {
    use super::{recording::RecordingCanvas, *};

    #[test]
    fn test_paint_is_empty() {
        assert!(Paint::default().is_empty());
        assert!(!Paint::filled(Color::default()).is_empty());
        let stroke = StrokeDefinition::default();
        assert!(!Paint::new(None, Some(&stroke)).is_empty());
    }

    #[test]
    fn test_draw_text_start_aligned() {
        let mut canvas = RecordingCanvas::default();
        let text = TextDefinition::default();

        draw_text(
            &mut canvas,
            Point::new(50.0, 500.0),
            "Legend:",
            &text,
            TextAlign::Start,
        );

        assert_eq!(canvas.texts(), vec![(Point::new(50.0, 500.0), "Legend:")]);
    }

    #[test]
    fn test_draw_text_multi_line_steps_down() {
        let mut canvas = RecordingCanvas::default();
        let mut text = TextDefinition::default();
        text.set_line_height(12.0);

        draw_text(
            &mut canvas,
            Point::new(10.0, 100.0),
            "first\nsecond",
            &text,
            TextAlign::Start,
        );

        let texts = canvas.texts();
        assert_eq!(texts[0], (Point::new(10.0, 100.0), "first"));
        assert_eq!(texts[1], (Point::new(10.0, 88.0), "second"));
    }
}
