//! Shared drawing definitions built from the style configuration.
//!
//! Every element on every page starts from these definitions. Elements that
//! override nothing share the same [`Rc`], so a page of forty boxes holds one
//! stroke and one label style.

use std::rc::Rc;

use flowdoc_core::{
    color::Color,
    draw::{ArrowDefinition, StrokeDefinition, TextDefinition},
    font::Font,
    geometry::Point,
};

use crate::config::StyleConfig;

/// Default definitions for shapes, arrows and page headers.
#[derive(Debug, Clone)]
pub struct Theme {
    stroke: Rc<StrokeDefinition>,
    fill: Option<Color>,
    label: Rc<TextDefinition>,
    arrow: Rc<ArrowDefinition>,
    title: Rc<TextDefinition>,
    subtitle: Rc<TextDefinition>,
}

impl Theme {
    /// Builds the theme for a style configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured color cannot be parsed.
    pub fn from_style(style: &StyleConfig) -> Result<Self, String> {
        let stroke = Rc::new(StrokeDefinition::solid(
            style.stroke_color()?,
            style.stroke_width(),
        ));

        let mut label = TextDefinition::with_font(Font::Helvetica, style.label_font_size());
        label.set_line_height(style.label_line_height());

        let mut arrow_label = TextDefinition::with_font(Font::Helvetica, style.arrow_label_size());
        arrow_label.set_color(style.arrow_label_color()?);

        let mut arrow = ArrowDefinition::new();
        arrow.set_stroke(Rc::clone(&stroke));
        arrow.set_head_length(style.arrow_head_length());
        arrow.set_head_angle(style.arrow_head_angle());
        arrow.set_label_text(Rc::new(arrow_label));
        let [dx, dy] = style.arrow_label_offset();
        arrow.set_label_offset(Point::new(dx, dy));

        Ok(Self {
            stroke,
            fill: style.shape_fill()?,
            label: Rc::new(label),
            arrow: Rc::new(arrow),
            title: Rc::new(TextDefinition::with_font(
                Font::HelveticaBold,
                style.title_size(),
            )),
            subtitle: Rc::new(TextDefinition::with_font(
                Font::Helvetica,
                style.subtitle_size(),
            )),
        })
    }

    /// Outline stroke of shapes, and the default stroke of plain lines
    pub fn stroke(&self) -> &Rc<StrokeDefinition> {
        &self.stroke
    }

    /// Fill of shapes that do not set one
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Shape label text
    pub fn label(&self) -> &Rc<TextDefinition> {
        &self.label
    }

    pub fn arrow(&self) -> &Rc<ArrowDefinition> {
        &self.arrow
    }

    pub fn title(&self) -> &Rc<TextDefinition> {
        &self.title
    }

    pub fn subtitle(&self) -> &Rc<TextDefinition> {
        &self.subtitle
    }
}

impl Default for Theme {
    fn default() -> Self {
        let label = TextDefinition::default();
        Self {
            stroke: Rc::new(StrokeDefinition::default()),
            fill: Color::new("lightblue").ok(),
            label: Rc::new(label),
            arrow: Rc::new(ArrowDefinition::default()),
            title: Rc::new(TextDefinition::with_font(Font::HelveticaBold, 16.0)),
            subtitle: Rc::new(TextDefinition::with_font(Font::Helvetica, 9.0)),
        }
    }
}
