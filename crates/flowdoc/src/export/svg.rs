//! SVG export: one SVG document per page.
//!
//! SVG puts its origin at the top-left corner, so every y coordinate is
//! flipped against the page height on the way out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{error, info};
use svg::{
    Document, Node,
    node::{
        self,
        element::{Ellipse, Line, Polygon, Rectangle, Text},
    },
};

use flowdoc_core::{
    draw::{Canvas, Paint, StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point, Size},
};

use super::{Error, Exporter};

/// An SVG exporter holding the finished pages and the one being drawn.
pub struct SvgDocument {
    page_size: Size,
    pages: Vec<Document>,
    current: Document,
}

impl SvgDocument {
    /// Creates a document with its first page open.
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            current: Self::blank_page(page_size),
        }
    }

    /// Finalizes the document and returns the markup of every page.
    pub fn finish(mut self) -> Vec<String> {
        self.pages.push(self.current);
        self.pages.iter().map(ToString::to_string).collect()
    }

    /// Writes each page to `<dir>/<stem>-<n>.svg`, numbering pages from 1.
    pub fn save(self, dir: &Path, stem: &str) -> Result<Vec<PathBuf>, Error> {
        let mut paths = Vec::new();
        for (index, markup) in self.finish().into_iter().enumerate() {
            let path = dir.join(format!("{stem}-{}.svg", index + 1));
            fs::write(&path, markup).inspect_err(|err| {
                error!(path:? = path, err:? = err; "Failed to write SVG file");
            })?;
            info!(path:? = path; "SVG page written");
            paths.push(path);
        }
        Ok(paths)
    }

    fn blank_page(size: Size) -> Document {
        Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height())
    }

    fn flip(&self, point: Point) -> (f32, f32) {
        (point.x(), self.page_size.height() - point.y())
    }

    fn paint<T: Node>(mut element: T, paint: Paint<'_>) -> T {
        match paint.fill() {
            Some(fill) => {
                element.assign("fill", &fill);
                element.assign("fill-opacity", fill.alpha());
            }
            None => element.assign("fill", "none"),
        }
        if let Some(stroke) = paint.stroke() {
            element = Self::stroke(element, stroke);
        }
        element
    }

    fn stroke<T: Node>(mut element: T, stroke: &StrokeDefinition) -> T {
        element.assign("stroke", &stroke.color());
        element.assign("stroke-width", stroke.width());
        if let Some(dasharray) = stroke.style().to_svg_value() {
            element.assign("stroke-dasharray", dasharray);
        }
        element
    }
}

impl Canvas for SvgDocument {
    fn draw_rect(&mut self, bounds: Bounds, paint: Paint<'_>) {
        if paint.is_empty() {
            return;
        }
        let (x, y) = self.flip(Point::new(bounds.min_x(), bounds.max_y()));
        let rect = Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", bounds.width())
            .set("height", bounds.height());
        self.current.append(Self::paint(rect, paint));
    }

    fn draw_ellipse(&mut self, bounds: Bounds, paint: Paint<'_>) {
        if paint.is_empty() {
            return;
        }
        let (cx, cy) = self.flip(bounds.center());
        let ellipse = Ellipse::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("rx", bounds.width() / 2.0)
            .set("ry", bounds.height() / 2.0);
        self.current.append(Self::paint(ellipse, paint));
    }

    fn draw_polygon(&mut self, points: &[Point], paint: Paint<'_>) {
        if points.is_empty() || paint.is_empty() {
            return;
        }
        let points = points
            .iter()
            .map(|point| {
                let (x, y) = self.flip(*point);
                format!("{x},{y}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let polygon = Polygon::new().set("points", points);
        self.current.append(Self::paint(polygon, paint));
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition) {
        let (x1, y1) = self.flip(from);
        let (x2, y2) = self.flip(to);
        let line = Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2);
        self.current.append(Self::stroke(line, stroke));
    }

    fn draw_text(&mut self, origin: Point, content: &str, text: &TextDefinition) {
        if content.is_empty() {
            return;
        }
        let (x, y) = self.flip(origin);
        let mut element = Text::new("")
            .set("x", x)
            .set("y", y)
            .set("font-family", text.font().css_family())
            .set("font-size", text.font_size())
            .set("fill", &text.color());
        if text.font().is_bold() {
            element = element.set("font-weight", "bold");
        }
        self.current
            .append(element.add(node::Text::new(content)));
    }
}

impl Exporter for SvgDocument {
    fn new_page(&mut self) -> Result<(), Error> {
        let page = std::mem::replace(&mut self.current, Self::blank_page(self.page_size));
        self.pages.push(page);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len() + 1
    }
}
