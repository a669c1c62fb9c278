//! Text style definitions and multi-line label layout.
//!
//! - [`TextDefinition`] - Reusable text style (font, size, color, line height)
//! - [`TextLine`] - One positioned line of text, ready for a [`Canvas`](super::Canvas)
//! - [`layout_lines`] - Vertically and horizontally centers a label on a point
//!
//! # Label Layout
//!
//! A label with `n` lines centered on `(cx, cy)` puts its first baseline at
//! `cy + (n - 1) * line_height / 2` and steps down by `line_height` for each
//! following line, so the block is balanced around `cy`. Each line is
//! horizontally centered on `cx` using the font's advance widths. Labels are
//! never wrapped: text wider than its shape simply overflows.
//!
//! ```
//! # use flowdoc_core::draw::{TextDefinition, layout_lines};
//! # use flowdoc_core::geometry::Point;
//! let mut style = TextDefinition::new();
//! style.set_line_height(10.0);
//!
//! let lines = layout_lines("Check:\nhasRead?", Point::new(100.0, 50.0), &style);
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].origin().y(), 55.0);
//! assert_eq!(lines[1].origin().y(), 45.0);
//! ```

use serde::Deserialize;

use crate::{color::Color, font::Font, geometry::Point};

/// Horizontal alignment of free-standing text relative to its anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// The anchor is where the first line starts
    #[default]
    Start,
    /// Every line is centered on the anchor
    Center,
}

/// Defines the visual style for text drawn on a page.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font | Helvetica |
/// | Font size | `8` |
/// | Color | black |
/// | Line height | `10` |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font: Font,
    font_size: f32,
    color: Color,
    line_height: f32,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text definition with the given font and size.
    ///
    /// The line height defaults to `1.25 * size`.
    pub fn with_font(font: Font, font_size: f32) -> Self {
        Self {
            font,
            font_size,
            color: Color::default(),
            line_height: font_size * 1.25,
        }
    }

    /// Returns the font
    pub fn font(&self) -> Font {
        self.font
    }

    /// Returns the font size in points
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the text color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the distance between consecutive baselines in points
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Sets the font
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Sets the font size in points
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the text color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the distance between consecutive baselines in points
    pub fn set_line_height(&mut self, line_height: f32) {
        self.line_height = line_height;
    }

    /// Returns the rendered width of a single line of `content`.
    pub fn measure(&self, content: &str) -> f32 {
        self.font.text_width(content, self.font_size)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font: Font::Helvetica,
            font_size: 8.0,
            color: Color::default(),
            line_height: 10.0,
        }
    }
}

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine<'a> {
    content: &'a str,
    origin: Point,
    width: f32,
}

impl<'a> TextLine<'a> {
    /// Returns the text of this line
    pub fn content(&self) -> &'a str {
        self.content
    }

    /// Returns the left end of the baseline
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the rendered width of this line
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the horizontal midpoint of the rendered line
    pub fn center_x(&self) -> f32 {
        self.origin.x() + self.width / 2.0
    }
}

/// Lays out a possibly multi-line label centered on `center`.
///
/// An empty label produces no lines.
pub fn layout_lines<'a>(content: &'a str, center: Point, text: &TextDefinition) -> Vec<TextLine<'a>> {
    if content.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let line_height = text.line_height();
    let start_y = center.y() + (lines.len() - 1) as f32 * line_height / 2.0;

    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let width = text.measure(line);
            TextLine {
                content: line,
                origin: Point::new(
                    center.x() - width / 2.0,
                    start_y - index as f32 * line_height,
                ),
                width,
            }
        })
        .collect()
}

/// Lays out free-standing text whose first baseline sits at `anchor.y`.
pub(super) fn flow_lines<'a>(
    content: &'a str,
    anchor: Point,
    text: &TextDefinition,
    align: TextAlign,
) -> Vec<TextLine<'a>> {
    if content.is_empty() {
        return Vec::new();
    }

    content
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            let width = text.measure(line);
            let x = match align {
                TextAlign::Start => anchor.x(),
                TextAlign::Center => anchor.x() - width / 2.0,
            };
            TextLine {
                content: line,
                origin: Point::new(x, anchor.y() - index as f32 * text.line_height()),
                width,
            }
        })
        .collect()
}
