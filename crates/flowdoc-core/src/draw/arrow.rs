//! Directed connectors between flowchart nodes.
//!
//! An arrow is a straight segment from `start` to `end` with a filled
//! triangular head whose tip sits exactly on `end`. The head's two back
//! corners lie `head_length` behind the tip, rotated `head_angle` to either
//! side of the segment direction. An optional label is written next to the
//! segment midpoint.

use std::{f32::consts::FRAC_PI_6, rc::Rc};

use super::{Canvas, Paint, StrokeDefinition, TextDefinition};
use crate::{color::Color, font::Font, geometry::Point};

/// Returns the arrowhead triangle `[tip, left corner, right corner]` for a
/// segment ending at `end`.
///
/// # Examples
///
/// ```
/// # use flowdoc_core::draw::arrow_head;
/// # use flowdoc_core::geometry::Point;
/// let [tip, a, b] = arrow_head(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 8.0, 0.5);
/// assert_eq!(tip, Point::new(10.0, 0.0));
/// assert!(a.x() < 10.0 && b.x() < 10.0);
/// ```
pub fn arrow_head(start: Point, end: Point, length: f32, angle: f32) -> [Point; 3] {
    let direction = start.angle_to(end);
    [
        end,
        end.offset_polar(-length, direction - angle),
        end.offset_polar(-length, direction + angle),
    ]
}

/// Shared style for arrows.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Stroke | black, 1.5pt, solid |
/// | Head length | `8` |
/// | Head angle | π/6 |
/// | Label text | Helvetica 7, red |
/// | Label offset | `(4, 2)` |
#[derive(Debug, Clone)]
pub struct ArrowDefinition {
    stroke: Rc<StrokeDefinition>,
    head_length: f32,
    head_angle: f32,
    label_text: Rc<TextDefinition>,
    label_offset: Point,
}

impl ArrowDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn head_length(&self) -> f32 {
        self.head_length
    }

    pub fn head_angle(&self) -> f32 {
        self.head_angle
    }

    pub fn label_text(&self) -> &TextDefinition {
        &self.label_text
    }

    pub fn label_offset(&self) -> Point {
        self.label_offset
    }

    pub fn set_stroke(&mut self, stroke: Rc<StrokeDefinition>) {
        self.stroke = stroke;
    }

    pub fn set_head_length(&mut self, length: f32) {
        self.head_length = length;
    }

    /// Sets the half-angle of the head in radians
    pub fn set_head_angle(&mut self, angle: f32) {
        self.head_angle = angle;
    }

    pub fn set_label_text(&mut self, text: Rc<TextDefinition>) {
        self.label_text = text;
    }

    pub fn set_label_offset(&mut self, offset: Point) {
        self.label_offset = offset;
    }
}

impl Default for ArrowDefinition {
    fn default() -> Self {
        let mut label_text = TextDefinition::with_font(Font::Helvetica, 7.0);
        if let Ok(red) = Color::new("red") {
            label_text.set_color(red);
        }
        Self {
            stroke: Rc::new(StrokeDefinition::default()),
            head_length: 8.0,
            head_angle: FRAC_PI_6,
            label_text: Rc::new(label_text),
            label_offset: Point::new(4.0, 2.0),
        }
    }
}

/// A connector from `start` to `end`.
#[derive(Debug, Clone)]
pub struct Arrow {
    start: Point,
    end: Point,
    label: Option<String>,
    definition: Rc<ArrowDefinition>,
}

impl Arrow {
    pub fn new(start: Point, end: Point, definition: Rc<ArrowDefinition>) -> Self {
        Self {
            start,
            end,
            label: None,
            definition,
        }
    }

    /// Sets the label; an empty label is treated as none.
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label.filter(|label| !label.is_empty());
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the head triangle for this arrow.
    pub fn head(&self) -> [Point; 3] {
        arrow_head(
            self.start,
            self.end,
            self.definition.head_length,
            self.definition.head_angle,
        )
    }

    /// Returns the baseline origin of the label.
    pub fn label_origin(&self) -> Point {
        self.start
            .midpoint(self.end)
            .add_point(self.definition.label_offset)
    }

    /// Draws the segment, the filled head and the label, in that order.
    ///
    /// A zero-length arrow has no direction; its head then points along +x.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let stroke = self.definition.stroke();
        canvas.draw_line(self.start, self.end, stroke);
        canvas.draw_polygon(&self.head(), Paint::filled(stroke.color()));

        if let Some(label) = &self.label {
            let text = self.definition.label_text();
            for (index, line) in label.split('\n').enumerate() {
                let origin = self
                    .label_origin()
                    .add_point(Point::new(0.0, -(index as f32) * text.line_height()));
                canvas.draw_text(origin, line, text);
            }
        }
    }
}
