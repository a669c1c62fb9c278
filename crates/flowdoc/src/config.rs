//! Configuration types for Flowdoc rendering.
//!
//! This module provides configuration structures that control page geometry
//! and the default visual style of flowchart elements. All types implement
//! [`serde::Deserialize`] for loading from a TOML file; every field is
//! optional and falls back to the defaults documented on each type.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining page and style settings.
//! - [`PageConfig`] - Page size, orientation, margin and flow-layout spacing.
//! - [`StyleConfig`] - Stroke, label, arrow and header styling.
//!
//! # Example
//!
//! ```
//! # use flowdoc::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [page]
//!     size = "letter"
//!
//!     [style]
//!     stroke_width = 2.0
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.page().dimensions().width(), 792.0);
//! assert_eq!(config.style().stroke_width(), 2.0);
//! ```

use serde::Deserialize;

use flowdoc_core::{color::Color, geometry::Size};

/// Points per centimeter.
pub const CM: f32 = 72.0 / 2.54;

/// Fill value that leaves a shape unfilled.
pub const NO_FILL: &str = "none";

/// Top-level application configuration combining page and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Page configuration section.
    #[serde(default)]
    page: PageConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified page and style configurations.
    pub fn new(page: PageConfig, style: StyleConfig) -> Self {
        Self { page, style }
    }

    /// Returns the page configuration.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// A named paper size, in portrait dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// 210 × 297 mm
    #[default]
    A4,
    /// 8.5 × 11 in
    Letter,
    /// 8.5 × 14 in
    Legal,
    /// Any size, in points
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Returns `(width, height)` in points, portrait orientation.
    fn portrait(self) -> (f32, f32) {
        match self {
            Self::A4 => (21.0 * CM, 29.7 * CM),
            Self::Letter => (612.0, 792.0),
            Self::Legal => (612.0, 1008.0),
            Self::Custom { width, height } => (width.min(height), width.max(height)),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

/// Page geometry and flow-layout spacing, in points.
///
/// # Default Values
///
/// | Key | Default |
/// |-----|---------|
/// | `size` | `"a4"` |
/// | `orientation` | `"landscape"` |
/// | `margin` | 1 cm |
/// | `indent` | `20` |
/// | `header_gap` | `40` |
/// | `subtitle_gap` | 0.5 cm |
/// | `section_gap` | `20` |
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    size: PageSize,
    orientation: Orientation,
    margin: f32,
    indent: f32,
    header_gap: f32,
    subtitle_gap: f32,
    section_gap: f32,
}

impl PageConfig {
    /// Returns the page width and height in points for the configured
    /// size and orientation.
    pub fn dimensions(&self) -> Size {
        let (short, long) = self.size.portrait();
        match self.orientation {
            Orientation::Landscape => Size::new(long, short),
            Orientation::Portrait => Size::new(short, long),
        }
    }

    /// Distance of the page header and flowing text from the page edges.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Horizontal indent of section lines relative to their heading.
    pub fn indent(&self) -> f32 {
        self.indent
    }

    /// Distance from the title baseline to the first flowing section.
    pub fn header_gap(&self) -> f32 {
        self.header_gap
    }

    /// Distance from the title baseline to the subtitle baseline.
    pub fn subtitle_gap(&self) -> f32 {
        self.subtitle_gap
    }

    /// Default extra space before every section but the first.
    pub fn section_gap(&self) -> f32 {
        self.section_gap
    }

    /// Checks that the configured values describe a usable page.
    pub fn validate(&self) -> Result<(), String> {
        let size = self.dimensions();
        if !(size.width() > 0.0 && size.height() > 0.0) {
            return Err(format!(
                "page size must be positive, got {}x{}",
                size.width(),
                size.height()
            ));
        }
        if !(self.margin >= 0.0 && self.margin * 2.0 < size.width().min(size.height())) {
            return Err(format!("page margin {} does not fit the page", self.margin));
        }
        Ok(())
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            orientation: Orientation::Landscape,
            margin: CM,
            indent: 20.0,
            header_gap: 40.0,
            subtitle_gap: 0.5 * CM,
            section_gap: 20.0,
        }
    }
}

/// Default styling for flowchart elements.
///
/// Colors are CSS color strings and are validated when the style is turned
/// into drawing definitions. Sizes are in points; the arrow head angle is the
/// half-angle of the head in degrees.
///
/// # Default Values
///
/// | Key | Default |
/// |-----|---------|
/// | `stroke_width` | `1.5` |
/// | `stroke_color` | `"black"` |
/// | `shape_fill` | `"lightblue"` |
/// | `label_font_size` | `8` |
/// | `label_line_height` | `10` |
/// | `arrow_head_length` | `8` |
/// | `arrow_head_angle` | `30` |
/// | `arrow_label_size` | `7` |
/// | `arrow_label_color` | `"red"` |
/// | `arrow_label_offset` | `[4, 2]` |
/// | `title_size` | `16` |
/// | `subtitle_size` | `9` |
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    stroke_width: f32,
    stroke_color: String,
    shape_fill: String,
    label_font_size: f32,
    label_line_height: f32,
    arrow_head_length: f32,
    arrow_head_angle: f32,
    arrow_label_size: f32,
    arrow_label_color: String,
    arrow_label_offset: [f32; 2],
    title_size: f32,
    subtitle_size: f32,
}

impl StyleConfig {
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Returns the parsed outline and connector [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        Color::new(&self.stroke_color).map_err(|err| format!("invalid stroke_color in config: {err}"))
    }

    /// Returns the fill of shapes that do not set their own, `None` for
    /// `"none"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn shape_fill(&self) -> Result<Option<Color>, String> {
        if self.shape_fill.eq_ignore_ascii_case(NO_FILL) {
            return Ok(None);
        }
        Color::new(&self.shape_fill)
            .map(Some)
            .map_err(|err| format!("invalid shape_fill in config: {err}"))
    }

    pub fn label_font_size(&self) -> f32 {
        self.label_font_size
    }

    pub fn label_line_height(&self) -> f32 {
        self.label_line_height
    }

    pub fn arrow_head_length(&self) -> f32 {
        self.arrow_head_length
    }

    /// Returns the arrow head half-angle in radians.
    pub fn arrow_head_angle(&self) -> f32 {
        self.arrow_head_angle.to_radians()
    }

    pub fn arrow_label_size(&self) -> f32 {
        self.arrow_label_size
    }

    /// Returns the parsed arrow label [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn arrow_label_color(&self) -> Result<Color, String> {
        Color::new(&self.arrow_label_color)
            .map_err(|err| format!("invalid arrow_label_color in config: {err}"))
    }

    pub fn arrow_label_offset(&self) -> [f32; 2] {
        self.arrow_label_offset
    }

    pub fn title_size(&self) -> f32 {
        self.title_size
    }

    pub fn subtitle_size(&self) -> f32 {
        self.subtitle_size
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_width: 1.5,
            stroke_color: "black".to_string(),
            shape_fill: "lightblue".to_string(),
            label_font_size: 8.0,
            label_line_height: 10.0,
            arrow_head_length: 8.0,
            arrow_head_angle: 30.0,
            arrow_label_size: 7.0,
            arrow_label_color: "red".to_string(),
            arrow_label_offset: [4.0, 2.0],
            title_size: 16.0,
            subtitle_size: 9.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_page_is_a4_landscape() {
        let page = PageConfig::default();
        let size = page.dimensions();

        assert_approx_eq!(f32, size.width(), 841.8898, epsilon = 1e-3);
        assert_approx_eq!(f32, size.height(), 595.2756, epsilon = 1e-3);
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_portrait_letter() {
        let page: PageConfig = toml::from_str(
            r#"
            size = "letter"
            orientation = "portrait"
            "#,
        )
        .unwrap();

        assert_eq!(page.dimensions(), Size::new(612.0, 792.0));
    }

    #[test]
    fn test_custom_page_size() {
        let page: PageConfig = toml::from_str(
            r#"
            size = { custom = { width = 400.0, height = 300.0 } }
            margin = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(page.dimensions(), Size::new(400.0, 300.0));
        assert_eq!(page.margin(), 10.0);
    }

    #[test]
    fn test_margin_larger_than_page_is_rejected() {
        let page: PageConfig = toml::from_str(
            r#"
            size = { custom = { width = 100.0, height = 100.0 } }
            margin = 60.0
            "#,
        )
        .unwrap();

        assert!(page.validate().is_err());
    }

    #[test]
    fn test_style_defaults_and_overrides() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            arrow_head_angle = 45.0
            arrow_label_color = "blue"
            "#,
        )
        .unwrap();

        let style = config.style();
        assert_eq!(style.stroke_width(), 1.5);
        assert_approx_eq!(f32, style.arrow_head_angle(), std::f32::consts::FRAC_PI_4);
        assert_eq!(style.arrow_label_color(), Ok(Color::new("blue").unwrap()));
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            stroke_color = "not-a-color"
            "#,
        )
        .unwrap();

        let err = config.style().stroke_color().unwrap_err();
        assert!(err.contains("stroke_color"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = toml::from_str::<AppConfig>("[page]\nwidth = 10.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_shape_fill() {
        let style = StyleConfig::default();
        assert_eq!(style.shape_fill(), Ok(Some(Color::new("lightblue").unwrap())));

        let style: StyleConfig = toml::from_str(r#"shape_fill = "None""#).unwrap();
        assert_eq!(style.shape_fill(), Ok(None));

        let style: StyleConfig = toml::from_str(r#"shape_fill = "sky""#).unwrap();
        assert!(style.shape_fill().unwrap_err().contains("shape_fill"));
    }
}
