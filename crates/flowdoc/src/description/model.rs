//! The serde model of a flowchart description file.
//!
//! These types mirror the TOML layout one to one and keep the source span of
//! every value that elaboration may need to point at. They carry no drawing
//! semantics; see [`elaborate`](super::elaborate) for that.

use std::ops::Range;

use serde::Deserialize;
use toml::Spanned;

use flowdoc_core::{draw::TextAlign, geometry::Side};

use crate::config::CM;

/// A whole description file: one output document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentDescription {
    /// Catalog key, used by `--only`
    pub name: Spanned<String>,
    /// Output file name, e.g. `STUDENT_FLOWCHART.pdf`
    pub file: Spanned<String>,
    /// Document title written to the PDF metadata
    #[serde(default)]
    pub title: Option<String>,
    /// Unit of explicit coordinates and shape sizes
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub pages: Vec<PageDescription>,
}

/// Length unit for coordinates and shape sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Pt,
    Cm,
    Mm,
    In,
}

impl Unit {
    /// Returns how many points one unit is.
    pub fn points(self) -> f32 {
        match self {
            Self::Pt => 1.0,
            Self::Cm => CM,
            Self::Mm => CM / 10.0,
            Self::In => 72.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub elements: Vec<Spanned<ElementDescription>>,
}

/// Discriminates the element tables of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Diamond,
    Ellipse,
    Arrow,
    Line,
    Text,
    Section,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Diamond => "diamond",
            Self::Ellipse => "ellipse",
            Self::Arrow => "arrow",
            Self::Line => "line",
            Self::Text => "text",
            Self::Section => "section",
        }
    }

    pub fn is_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Diamond | Self::Ellipse)
    }

    /// Returns the fields an element of this kind may set, besides `kind`.
    pub fn allowed_fields(self) -> &'static [&'static str] {
        match self {
            Self::Rectangle | Self::Diamond | Self::Ellipse => {
                &["id", "x", "y", "width", "height", "label", "fill"]
            }
            Self::Arrow => &["from", "to", "label", "color", "width", "style"],
            Self::Line => &["from", "to", "color", "width", "style"],
            Self::Text => &["x", "y", "content", "font", "size", "color", "align"],
            Self::Section => &[
                "heading",
                "lines",
                "font",
                "size",
                "color",
                "heading_font",
                "heading_size",
                "line_spacing",
                "heading_gap",
                "space_before",
            ],
        }
    }
}

/// One `[[pages.elements]]` table.
///
/// The table is flat: which fields apply depends on `kind`, and the
/// elaborator rejects fields the kind does not use. `width` is the shape
/// width for shapes and the stroke width (in points) for arrows and lines.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDescription {
    pub kind: Spanned<ElementKind>,
    #[serde(default)]
    pub id: Option<Spanned<String>>,
    #[serde(default)]
    pub x: Option<Spanned<f32>>,
    #[serde(default)]
    pub y: Option<Spanned<f32>>,
    #[serde(default)]
    pub width: Option<Spanned<f32>>,
    #[serde(default)]
    pub height: Option<Spanned<f32>>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub fill: Option<Spanned<String>>,
    #[serde(default)]
    pub from: Option<Spanned<EndpointDescription>>,
    #[serde(default)]
    pub to: Option<Spanned<EndpointDescription>>,
    #[serde(default)]
    pub color: Option<Spanned<String>>,
    #[serde(default)]
    pub style: Option<Spanned<String>>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub font: Option<Spanned<String>>,
    #[serde(default)]
    pub size: Option<Spanned<f32>>,
    #[serde(default)]
    pub align: Option<TextAlign>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub lines: Option<Vec<String>>,
    #[serde(default)]
    pub heading_font: Option<Spanned<String>>,
    #[serde(default)]
    pub heading_size: Option<Spanned<f32>>,
    #[serde(default)]
    pub line_spacing: Option<Spanned<f32>>,
    #[serde(default)]
    pub heading_gap: Option<Spanned<f32>>,
    #[serde(default)]
    pub space_before: Option<Spanned<f32>>,
}

impl ElementDescription {
    /// Returns the name of every optional field that is set.
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("id", self.id.is_some()),
            ("x", self.x.is_some()),
            ("y", self.y.is_some()),
            ("width", self.width.is_some()),
            ("height", self.height.is_some()),
            ("label", self.label.is_some()),
            ("fill", self.fill.is_some()),
            ("from", self.from.is_some()),
            ("to", self.to.is_some()),
            ("color", self.color.is_some()),
            ("style", self.style.is_some()),
            ("content", self.content.is_some()),
            ("font", self.font.is_some()),
            ("size", self.size.is_some()),
            ("align", self.align.is_some()),
            ("heading", self.heading.is_some()),
            ("lines", self.lines.is_some()),
            ("heading_font", self.heading_font.is_some()),
            ("heading_size", self.heading_size.is_some()),
            ("line_spacing", self.line_spacing.is_some()),
            ("heading_gap", self.heading_gap.is_some()),
            ("space_before", self.space_before.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Returns every numeric field that is set, with its name and span.
    pub fn numbers(&self) -> Vec<(&'static str, f32, Range<usize>)> {
        [
            ("x", &self.x),
            ("y", &self.y),
            ("width", &self.width),
            ("height", &self.height),
            ("size", &self.size),
            ("heading_size", &self.heading_size),
            ("line_spacing", &self.line_spacing),
            ("heading_gap", &self.heading_gap),
            ("space_before", &self.space_before),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_ref()
                .map(|value| (name, *value.get_ref(), value.span()))
        })
        .collect()
    }
}

/// An arrow or line endpoint: a literal point or a side of a named shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EndpointDescription {
    /// `[x, y]` in the document unit
    Point([f32; 2]),
    /// `{ shape = "id", side = "top" }`; the side defaults to the center
    Anchor {
        shape: String,
        #[serde(default = "center")]
        side: Side,
    },
}

fn center() -> Side {
    Side::Center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        let doc: DocumentDescription = toml::from_str(
            r#"
            name = "demo"
            file = "demo.pdf"
            "#,
        )
        .unwrap();

        assert_eq!(doc.name.get_ref(), "demo");
        assert_eq!(doc.unit, Unit::Pt);
        assert!(doc.pages.is_empty());
    }

    #[test]
    fn test_element_spans_and_fields() {
        let source = r#"
name = "demo"
file = "demo.pdf"
unit = "cm"

[[pages]]
title = "Demo"

[[pages.elements]]
kind = "diamond"
id = "check"
x = 1
y = 2.5
width = 2.0
height = 1.0
label = "Check?"
"#;
        let doc: DocumentDescription = toml::from_str(source).unwrap();
        let element = doc.pages[0].elements[0].get_ref();

        assert_eq!(*element.kind.get_ref(), ElementKind::Diamond);
        assert!(source[element.id.as_ref().unwrap().span()].contains("check"));
        assert_eq!(element.x.as_ref().map(|x| *x.get_ref()), Some(1.0));
        assert_eq!(
            element.present_fields(),
            vec!["id", "x", "y", "width", "height", "label"]
        );
    }

    #[test]
    fn test_endpoint_forms() {
        #[derive(Deserialize)]
        struct Holder {
            a: EndpointDescription,
            b: EndpointDescription,
            c: EndpointDescription,
        }

        let holder: Holder = toml::from_str(
            r#"
            a = [1.0, 2]
            b = { shape = "start", side = "bottom" }
            c = { shape = "end" }
            "#,
        )
        .unwrap();

        assert_eq!(holder.a, EndpointDescription::Point([1.0, 2.0]));
        assert_eq!(
            holder.b,
            EndpointDescription::Anchor {
                shape: "start".to_string(),
                side: Side::Bottom
            }
        );
        assert_eq!(
            holder.c,
            EndpointDescription::Anchor {
                shape: "end".to_string(),
                side: Side::Center
            }
        );
    }

    #[test]
    fn test_unknown_kind_is_a_syntax_error() {
        let result = toml::from_str::<DocumentDescription>(
            r#"
            name = "demo"
            file = "demo.pdf"

            [[pages]]
            [[pages.elements]]
            kind = "hexagon"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unit_points() {
        assert_eq!(Unit::In.points(), 72.0);
        assert!((Unit::Cm.points() - 28.3465).abs() < 1e-3);
        assert!((Unit::Mm.points() * 10.0 - Unit::Cm.points()).abs() < 1e-4);
    }
}
