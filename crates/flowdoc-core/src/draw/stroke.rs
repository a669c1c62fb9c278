//! Stroke and line-style definitions.
//!
//! - [`StrokeDefinition`]: color, width and dash style of an outline or connector
//! - [`StrokeStyle`]: line patterns (solid, dashed, dotted, custom)
//!
//! Dash patterns are expressed as alternating on/off lengths in points, which
//! maps one-to-one onto the PDF `d` operator and the SVG `stroke-dasharray`
//! attribute.

use std::str::FromStr;

use crate::color::Color;

/// Defines the visual style of a stroke, including dash patterns.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line (5pt dash, 5pt gap)
    Dashed,
    /// Dotted line (2pt dot, 3pt gap)
    Dotted,
    /// Custom on/off pattern in points
    Custom(Vec<f32>),
}

impl StrokeStyle {
    /// Returns the dash array for this style; empty for solid lines.
    pub fn dash_array(&self) -> &[f32] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[5.0, 5.0],
            Self::Dotted => &[2.0, 3.0],
            Self::Custom(pattern) => pattern,
        }
    }

    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        let pattern = self.dash_array();
        if pattern.is_empty() {
            return None;
        }
        Some(
            pattern
                .iter()
                .map(|length| length.to_string())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            // Any other value is treated as a custom on/off pattern
            _ => {
                let pattern = s
                    .split([',', ' '])
                    .filter(|part| !part.is_empty())
                    .map(|part| {
                        part.parse::<f32>()
                            .ok()
                            .filter(|length| length.is_finite() && *length >= 0.0)
                            .ok_or_else(|| format!("invalid dash length `{part}` in `{s}`"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if pattern.is_empty() || pattern.iter().all(|length| *length == 0.0) {
                    return Err(format!(
                        "invalid stroke style `{s}`, valid values: solid, dashed, dotted, or a dash pattern like \"6,3\""
                    ));
                }
                Ok(Self::Custom(pattern))
            }
        }
    }
}

/// Stroke properties shared by shape outlines, connectors and separators.
///
/// # Examples
///
/// ```
/// use flowdoc_core::{color::Color, draw::{StrokeDefinition, StrokeStyle}};
///
/// let mut stroke = StrokeDefinition::solid(Color::new("grey").unwrap(), 0.5);
/// stroke.set_style(StrokeStyle::Dashed);
/// assert_eq!(stroke.style().dash_array(), &[5.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a stroke with the given color and width and a solid style
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a solid stroke
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Dashed,
        }
    }

    /// Gets the stroke color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Gets the stroke width in points
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Gets the stroke style
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Sets the stroke color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the stroke width in points
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Sets the stroke style
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    /// Black, 1.5pt, solid: the outline weight flowchart boxes are drawn with.
    fn default() -> Self {
        Self::new(Color::default(), 1.5)
    }
}
