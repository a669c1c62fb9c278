//! Drawing elaborated documents onto an exporter.

use log::{debug, trace};

use flowdoc_core::{
    draw::{self, Canvas, TextAlign},
    geometry::Point,
};

use crate::{
    config::PageConfig,
    document::{Document, Element, Page},
    export::{Error, Exporter},
    layout::LayoutContext,
};

/// Draws every page of `document`, starting a new exporter page between
/// consecutive pages.
pub fn render_document<E: Exporter>(
    exporter: &mut E,
    document: &Document,
    config: &PageConfig,
) -> Result<(), Error> {
    if document.pages().is_empty() {
        return Err(Error::Render(format!(
            "document `{}` has no pages",
            document.name()
        )));
    }
    for (index, page) in document.pages().iter().enumerate() {
        if index > 0 {
            exporter.new_page()?;
        }
        render_page(exporter, page, config);
        trace!(page = index + 1; "Page rendered");
    }
    debug!(name = document.name(), pages = exporter.page_count(); "Document rendered");
    Ok(())
}

/// Draws one page: the header first, then each element in order.
///
/// Sections flow below the header through a [`LayoutContext`]; everything
/// else is placed at its own coordinates.
pub fn render_page(canvas: &mut dyn Canvas, page: &Page, config: &PageConfig) {
    let size = config.dimensions();
    let margin = config.margin();
    let mut layout = LayoutContext::new(size, config);

    if let Some(header) = page.header() {
        let top = size.height() - margin;
        draw::draw_text(
            canvas,
            Point::new(margin, top),
            header.title(),
            header.title_text(),
            TextAlign::Start,
        );
        if let Some(subtitle) = header.subtitle() {
            draw::draw_text(
                canvas,
                Point::new(margin, top - config.subtitle_gap()),
                subtitle,
                header.subtitle_text(),
                TextAlign::Start,
            );
        }
        layout = layout.below_header(config.header_gap());
    }

    for element in page.elements() {
        match element {
            Element::Shape(shape) => draw::draw_shape(canvas, shape),
            Element::Arrow(arrow) => draw::draw_arrow(canvas, arrow),
            Element::Line(line) => canvas.draw_line(line.from(), line.to(), line.stroke()),
            Element::Text(block) => draw::draw_text(
                canvas,
                block.anchor(),
                block.content(),
                block.text(),
                block.align(),
            ),
            Element::Section(section) => {
                let (placed, next) = layout.place_section(section);
                for text in &placed {
                    canvas.draw_text(text.origin(), text.content(), text.text());
                }
                layout = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use flowdoc_core::{
        color::Color,
        draw::{Paint, Shape, ShapeKind, StrokeDefinition, TextDefinition},
        font::Font,
        geometry::{Bounds, Size},
    };

    use super::*;
    use crate::{
        config::CM,
        document::{PageHeader, Section},
        export::svg::SvgDocument,
    };

    #[derive(Default)]
    struct Recorder {
        texts: Vec<(Point, String)>,
        shapes: usize,
        pages: usize,
    }

    impl Canvas for Recorder {
        fn draw_rect(&mut self, _bounds: Bounds, _paint: Paint<'_>) {
            self.shapes += 1;
        }

        fn draw_ellipse(&mut self, _bounds: Bounds, _paint: Paint<'_>) {
            self.shapes += 1;
        }

        fn draw_polygon(&mut self, _points: &[Point], _paint: Paint<'_>) {
            self.shapes += 1;
        }

        fn draw_line(&mut self, _from: Point, _to: Point, _stroke: &StrokeDefinition) {}

        fn draw_text(&mut self, origin: Point, content: &str, _text: &TextDefinition) {
            self.texts.push((origin, content.to_string()));
        }
    }

    impl Exporter for Recorder {
        fn new_page(&mut self) -> Result<(), Error> {
            self.pages += 1;
            Ok(())
        }

        fn page_count(&self) -> usize {
            self.pages + 1
        }
    }

    fn header(title: &str, subtitle: Option<&str>) -> PageHeader {
        PageHeader::new(
            title.to_string(),
            subtitle.map(str::to_string),
            Rc::new(TextDefinition::with_font(Font::HelveticaBold, 16.0)),
            Rc::new(TextDefinition::with_font(Font::Helvetica, 9.0)),
        )
    }

    #[test]
    fn test_header_at_top_left_margin() {
        let config = PageConfig::default();
        let page = Page::new(Some(header("Title", Some("Sub"))), Vec::new());
        let mut recorder = Recorder::default();

        render_page(&mut recorder, &page, &config);

        let top = config.dimensions().height() - CM;
        assert_eq!(recorder.texts[0], (Point::new(CM, top), "Title".to_string()));
        assert_eq!(recorder.texts[1].1, "Sub");
        assert!((recorder.texts[1].0.y() - (top - 0.5 * CM)).abs() < 1e-3);
    }

    #[test]
    fn test_sections_flow_below_header() {
        let config = PageConfig::default();
        let section = Section::new(
            Some("Heading".to_string()),
            Rc::new(TextDefinition::with_font(Font::HelveticaBold, 12.0)),
            vec!["line".to_string()],
            Rc::new(TextDefinition::with_font(Font::Helvetica, 11.0)),
        );
        let page = Page::new(
            Some(header("Notes", None)),
            vec![Element::Section(section)],
        );
        let mut recorder = Recorder::default();

        render_page(&mut recorder, &page, &config);

        let top = config.dimensions().height() - CM;
        assert_eq!(recorder.texts.len(), 3);
        assert!((recorder.texts[1].0.y() - (top - 40.0)).abs() < 1e-3);
        assert!((recorder.texts[2].0.y() - (top - 65.0)).abs() < 1e-3);
    }

    #[test]
    fn test_pages_are_separated() {
        let shape = Shape::new(
            ShapeKind::Diamond,
            Bounds::new_from_origin(Point::new(10.0, 10.0), Size::new(20.0, 10.0)),
        )
        .with_fill(Color::new("yellow").ok());
        let document = Document::new(
            "demo".to_string(),
            "demo.pdf".to_string(),
            None,
            vec![
                Page::new(None, vec![Element::Shape(shape)]),
                Page::default(),
                Page::default(),
            ],
        );
        let mut recorder = Recorder::default();

        render_document(&mut recorder, &document, &PageConfig::default()).unwrap();

        assert_eq!(recorder.page_count(), 3);
        assert_eq!(recorder.shapes, 1);
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let document = Document::new(
            "empty".to_string(),
            "empty.pdf".to_string(),
            None,
            Vec::new(),
        );
        let mut recorder = Recorder::default();

        let result = render_document(&mut recorder, &document, &PageConfig::default());
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_render_to_svg() {
        let config = PageConfig::default();
        let document = Document::new(
            "demo".to_string(),
            "demo.pdf".to_string(),
            None,
            vec![Page::new(Some(header("Hello", None)), Vec::new())],
        );
        let mut svg = SvgDocument::new(config.dimensions());

        render_document(&mut svg, &document, &config).unwrap();

        let pages = svg.finish();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("Hello"));
    }
}
