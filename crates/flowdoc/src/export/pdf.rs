//! PDF export built on the `lopdf` object graph.
//!
//! The document is assembled in memory: one shared resources dictionary
//! with the four base-14 fonts, one uncompressed content stream per page and
//! an info dictionary without dates. Nothing depends on the clock or on
//! random ids, so the same input always produces the same bytes.

use std::{fs, path::Path};

use log::{debug, error, info, warn};
use lopdf::{
    Document, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};

use flowdoc_core::{
    color::Color,
    draw::{Canvas, Paint, StrokeDefinition, TextDefinition},
    font::Font,
    geometry::{Bounds, Point, Size},
};

use super::{Error, Exporter};

const PDF_VERSION: &str = "1.7";
const PRODUCER: &str = "flowdoc";

/// Control point distance for approximating a quarter ellipse with a cubic
/// Bézier curve, relative to the radius.
const KAPPA: f32 = 0.552_284_8;

/// An in-memory PDF document that is drawn on page by page.
pub struct PdfDocument {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_size: Size,
    content: Content,
    replaced_chars: usize,
    /// Fill opacities in thousandths, one `ExtGState` each, in first-use order
    fill_alphas: Vec<u16>,
}

impl PdfDocument {
    /// Creates a document with its first page open.
    pub fn new(page_size: Size, title: Option<&str>) -> Self {
        let mut document = Document::with_version(PDF_VERSION);
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for font in Font::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        document.objects.insert(
            resources_id,
            Object::Dictionary(dictionary! { "Font" => fonts }),
        );

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        };
        if let Some(title) = title {
            info.set("Title", Object::string_literal(Font::encode(title).into_bytes()));
        }
        let info_id = document.add_object(info);
        document.trailer.set("Info", info_id);

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            page_size,
            content: Content {
                operations: Vec::new(),
            },
            replaced_chars: 0,
            fill_alphas: Vec::new(),
        }
    }

    /// Finalizes the document and returns the encoded file.
    pub fn finish(mut self) -> Result<Vec<u8>, Error> {
        self.flush_page()?;

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let count = self.page_ids.len() as i64;
        if let Some(Object::Dictionary(pages)) = self.document.objects.get_mut(&self.pages_id) {
            pages.set("Kids", kids);
            pages.set("Count", count);
        }

        if !self.fill_alphas.is_empty() {
            let mut states = lopdf::Dictionary::new();
            for (index, alpha) in self.fill_alphas.iter().enumerate() {
                states.set(
                    alpha_state_name(index),
                    dictionary! {
                        "Type" => "ExtGState",
                        "ca" => f32::from(*alpha) / 1000.0,
                    },
                );
            }
            if let Some(Object::Dictionary(resources)) =
                self.document.objects.get_mut(&self.resources_id)
            {
                resources.set("ExtGState", states);
            }
        }

        if self.replaced_chars > 0 {
            warn!(
                characters = self.replaced_chars;
                "Text contained characters outside WinAnsiEncoding; they were replaced by '?'",
            );
        }

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        debug!(pages = self.page_ids.len(), bytes = bytes.len(); "PDF document encoded");
        Ok(bytes)
    }

    /// Finalizes the document and writes it to `path`, replacing any existing file.
    pub fn save(self, path: &Path) -> Result<(), Error> {
        let bytes = self.finish()?;
        fs::write(path, bytes).inspect_err(|err| {
            error!(path:? = path, err:? = err; "Failed to write PDF file");
        })?;
        info!(path:? = path; "PDF written");
        Ok(())
    }

    fn flush_page(&mut self) -> Result<(), Error> {
        let content = std::mem::replace(
            &mut self.content,
            Content {
                operations: Vec::new(),
            },
        );
        let stream = Stream::new(lopdf::Dictionary::new(), content.encode()?);
        let content_id = self.document.add_object(stream);

        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            self.page_size.width().into(),
            self.page_size.height().into(),
        ];
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content
            .operations
            .push(Operation::new(operator, operands));
    }

    /// Sets the fill color, and its opacity through a graphics state when
    /// the color is translucent. Callers wrap this in `q`/`Q`.
    fn set_fill_color(&mut self, color: Color) {
        let [r, g, b] = color.rgb();
        self.push("rg", vec![r.into(), g.into(), b.into()]);

        let alpha = (color.alpha().clamp(0.0, 1.0) * 1000.0).round() as u16;
        if alpha < 1000 {
            let index = match self.fill_alphas.iter().position(|known| *known == alpha) {
                Some(index) => index,
                None => {
                    self.fill_alphas.push(alpha);
                    self.fill_alphas.len() - 1
                }
            };
            self.push(
                "gs",
                vec![Object::Name(alpha_state_name(index).into_bytes())],
            );
        }
    }

    fn set_stroke(&mut self, stroke: &StrokeDefinition) {
        let [r, g, b] = stroke.color().rgb();
        self.push("RG", vec![r.into(), g.into(), b.into()]);
        self.push("w", vec![stroke.width().into()]);
        let dashes: Vec<Object> = stroke
            .style()
            .dash_array()
            .iter()
            .map(|length| (*length).into())
            .collect();
        if !dashes.is_empty() {
            self.push("d", vec![dashes.into(), 0.into()]);
        }
    }

    /// Wraps a path construction in a saved graphics state and paints it.
    fn paint_path(&mut self, paint: Paint<'_>, build: impl FnOnce(&mut Self)) {
        let operator = match (paint.fill(), paint.stroke()) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            (None, Some(_)) => "S",
            (None, None) => return,
        };

        self.push("q", vec![]);
        if let Some(fill) = paint.fill() {
            self.set_fill_color(fill);
        }
        if let Some(stroke) = paint.stroke() {
            self.set_stroke(stroke);
        }
        build(self);
        self.push(operator, vec![]);
        self.push("Q", vec![]);
    }
}

impl Canvas for PdfDocument {
    fn draw_rect(&mut self, bounds: Bounds, paint: Paint<'_>) {
        self.paint_path(paint, |pdf| {
            pdf.push(
                "re",
                vec![
                    bounds.min_x().into(),
                    bounds.min_y().into(),
                    bounds.width().into(),
                    bounds.height().into(),
                ],
            );
        });
    }

    fn draw_ellipse(&mut self, bounds: Bounds, paint: Paint<'_>) {
        let center = bounds.center();
        let (rx, ry) = (bounds.width() / 2.0, bounds.height() / 2.0);
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        let (cx, cy) = (center.x(), center.y());

        // Four quarter arcs, counter-clockwise from the rightmost point.
        let arcs: [[f32; 6]; 4] = [
            [cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry],
            [cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy],
            [cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry],
            [cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy],
        ];

        self.paint_path(paint, |pdf| {
            pdf.push("m", vec![(cx + rx).into(), cy.into()]);
            for arc in arcs {
                pdf.push("c", arc.iter().map(|value| (*value).into()).collect());
            }
            pdf.push("h", vec![]);
        });
    }

    fn draw_polygon(&mut self, points: &[Point], paint: Paint<'_>) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.paint_path(paint, |pdf| {
            pdf.push("m", vec![first.x().into(), first.y().into()]);
            for point in rest {
                pdf.push("l", vec![point.x().into(), point.y().into()]);
            }
            pdf.push("h", vec![]);
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition) {
        self.push("q", vec![]);
        self.set_stroke(stroke);
        self.push("m", vec![from.x().into(), from.y().into()]);
        self.push("l", vec![to.x().into(), to.y().into()]);
        self.push("S", vec![]);
        self.push("Q", vec![]);
    }

    fn draw_text(&mut self, origin: Point, content: &str, text: &TextDefinition) {
        if content.is_empty() {
            return;
        }
        let encoded = Font::encode(content);
        self.replaced_chars += encoded.replaced();

        self.push("q", vec![]);
        self.set_fill_color(text.color());
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![
                Object::Name(text.font().resource_name().as_bytes().to_vec()),
                text.font_size().into(),
            ],
        );
        self.push("Td", vec![origin.x().into(), origin.y().into()]);
        self.push("Tj", vec![Object::string_literal(encoded.into_bytes())]);
        self.push("ET", vec![]);
        self.push("Q", vec![]);
    }
}

fn alpha_state_name(index: usize) -> String {
    format!("GS{}", index + 1)
}

impl Exporter for PdfDocument {
    fn new_page(&mut self) -> Result<(), Error> {
        self.flush_page()
    }

    fn page_count(&self) -> usize {
        self.page_ids.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use float_cmp::assert_approx_eq;

    use super::*;
    use flowdoc_core::draw::{Arrow, ArrowDefinition, Shape, ShapeKind};

    fn page() -> Size {
        Size::new(841.89, 595.28)
    }

    fn operations(bytes: &[u8]) -> Vec<Vec<Operation>> {
        let document = Document::load_mem(bytes).unwrap();
        document
            .get_pages()
            .values()
            .map(|id| {
                let content = document.get_page_content(*id).unwrap();
                Content::decode(&content).unwrap().operations
            })
            .collect()
    }

    fn operators(operations: &[Operation]) -> Vec<&str> {
        operations.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let pdf = PdfDocument::new(page(), None);
        assert_eq!(pdf.page_count(), 1);

        let bytes = pdf.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert_eq!(operations(&bytes).len(), 1);
    }

    #[test]
    fn test_new_page_flushes() {
        let mut pdf = PdfDocument::new(page(), Some("Demo"));
        pdf.draw_line(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            &StrokeDefinition::default(),
        );
        pdf.new_page().unwrap();
        pdf.new_page().unwrap();
        assert_eq!(pdf.page_count(), 3);

        let pages = operations(&pdf.finish().unwrap());
        assert_eq!(pages.len(), 3);
        assert_eq!(operators(&pages[0]), vec!["q", "RG", "w", "m", "l", "S", "Q"]);
        assert!(pages[1].is_empty());
    }

    #[test]
    fn test_filled_shape_uses_fill_and_stroke() {
        let mut pdf = PdfDocument::new(page(), None);
        let shape = Shape::new(
            ShapeKind::Rectangle,
            Bounds::new_from_origin(Point::new(10.0, 20.0), Size::new(80.0, 20.0)),
        )
        .with_fill(Some(Color::new("lightblue").unwrap()));
        shape.draw(&mut pdf);

        let pages = operations(&pdf.finish().unwrap());
        assert_eq!(
            operators(&pages[0]),
            vec!["q", "rg", "RG", "w", "re", "B", "Q"]
        );
    }

    #[test]
    fn test_translucent_fill_uses_graphics_state() {
        let mut pdf = PdfDocument::new(page(), None);
        let bounds = Bounds::new_from_origin(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let half = Color::new("rgba(255, 0, 0, 0.5)").unwrap();
        pdf.draw_rect(bounds, Paint::new(Some(half), None));
        pdf.draw_rect(bounds, Paint::new(Some(half), None));
        pdf.draw_rect(bounds, Paint::new(Some(Color::new("red").unwrap()), None));

        let bytes = pdf.finish().unwrap();
        let pages = operations(&bytes);
        assert_eq!(
            operators(&pages[0]),
            vec![
                "q", "rg", "gs", "re", "f", "Q", "q", "rg", "gs", "re", "f", "Q", "q", "rg",
                "re", "f", "Q",
            ]
        );
        match &pages[0][2].operands[0] {
            Object::Name(name) => assert_eq!(name.as_slice(), b"GS1"),
            other => panic!("unexpected gs operand {other:?}"),
        }

        let document = Document::load_mem(&bytes).unwrap();
        let page_id = *document.get_pages().values().next().unwrap();
        let resources = document
            .get_object(page_id)
            .and_then(Object::as_dict)
            .and_then(|page| page.get(b"Resources"))
            .and_then(Object::as_reference)
            .and_then(|id| document.get_dictionary(id))
            .unwrap();
        let state = resources
            .get(b"ExtGState")
            .and_then(Object::as_dict)
            .and_then(|states| states.get(b"GS1"))
            .and_then(Object::as_dict)
            .unwrap();
        assert_approx_eq!(f32, state.get(b"ca").unwrap().as_float().unwrap(), 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_ellipse_is_four_curves() {
        let mut pdf = PdfDocument::new(page(), None);
        let stroke = StrokeDefinition::default();
        pdf.draw_ellipse(
            Bounds::new_from_origin(Point::new(0.0, 0.0), Size::new(40.0, 20.0)),
            Paint::new(None, Some(&stroke)),
        );

        let pages = operations(&pdf.finish().unwrap());
        let ops = operators(&pages[0]);
        assert_eq!(ops.iter().filter(|op| **op == "c").count(), 4);
        assert_eq!(ops[ops.len() - 2], "S");
    }

    #[test]
    fn test_arrow_head_is_filled_polygon() {
        let mut pdf = PdfDocument::new(page(), None);
        let arrow = Arrow::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Rc::new(ArrowDefinition::default()),
        );
        arrow.draw(&mut pdf);

        let pages = operations(&pdf.finish().unwrap());
        let ops = operators(&pages[0]);
        assert!(ops.contains(&"f"));
        assert!(!ops.contains(&"B"));
    }

    #[test]
    fn test_text_operations() {
        let mut pdf = PdfDocument::new(page(), None);
        let text = TextDefinition::with_font(Font::HelveticaBold, 16.0);
        pdf.draw_text(Point::new(28.35, 566.93), "Flow → Chart", &text);

        let pages = operations(&pdf.finish().unwrap());
        let ops = &pages[0];
        assert_eq!(
            operators(ops),
            vec!["q", "rg", "BT", "Tf", "Td", "Tj", "ET", "Q"]
        );
        match &ops[3].operands[0] {
            Object::Name(name) => assert_eq!(name.as_slice(), b"F2"),
            other => panic!("unexpected Tf operand {other:?}"),
        }
        assert_approx_eq!(f32, ops[4].operands[0].as_float().unwrap(), 28.35, epsilon = 1e-3);
        match &ops[5].operands[0] {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"Flow ? Chart"),
            other => panic!("unexpected Tj operand {other:?}"),
        }
    }

    #[test]
    fn test_dashed_stroke_sets_dash_pattern() {
        let mut pdf = PdfDocument::new(page(), None);
        pdf.draw_line(
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            &StrokeDefinition::dashed(Color::default(), 0.5),
        );

        let pages = operations(&pdf.finish().unwrap());
        assert!(operators(&pages[0]).contains(&"d"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let render = || {
            let mut pdf = PdfDocument::new(page(), Some("Same"));
            pdf.draw_text(Point::new(1.0, 2.0), "same", &TextDefinition::default());
            pdf.finish().unwrap()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let mut pdf = PdfDocument::new(page(), None);
        pdf.new_page().unwrap();

        pdf.save(&path).unwrap();

        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded.get_pages().len(), 2);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");

        let result = PdfDocument::new(page(), None).save(&path);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
