//! Color handling for Flowdoc diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for turning CSS color
//! strings into the RGB components PDF content streams expect.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowdoc_core::color::Color;
    ///
    /// let gold = Color::new("#FFD700").unwrap();
    /// let green = Color::new("lightgreen").unwrap();
    /// let grey = Color::new("lightgrey").unwrap();
    /// assert_eq!(grey, Color::new("lightgray").unwrap());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            // CSS names every gray both ways; the parser only knows `gray`.
            Err(err) => match DynamicColor::from_str(&gray_spelling(color_str)) {
                Ok(color) => Ok(Self { color }),
                Err(_) => Err(format!("invalid color `{color_str}`: {err}")),
            },
        }
    }

    /// Returns the sRGB red, green and blue components in the `0.0..=1.0` range.
    ///
    /// Components are clamped so out-of-gamut colors still produce valid
    /// `rg`/`RG` operands.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowdoc_core::color::Color;
    ///
    /// let [r, g, b] = Color::new("red").unwrap().rgb();
    /// assert_eq!((r, g, b), (1.0, 0.0, 0.0));
    /// ```
    pub fn rgb(self) -> [f32; 3] {
        let [r, g, b, _] = self.color.to_alpha_color::<Srgb>().components;
        [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

/// Rewrites the `grey` spelling of a named color to `gray`.
fn gray_spelling(color_str: &str) -> String {
    color_str.to_ascii_lowercase().replace("grey", "gray")
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
