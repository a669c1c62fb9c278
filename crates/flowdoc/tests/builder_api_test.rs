//! Integration tests for the FlowchartBuilder API
//!
//! These tests drive descriptions through parsing, elaboration and PDF
//! rendering, then read the PDF back to check what was drawn.

use flowdoc::{
    FlowchartBuilder, FlowdocError,
    config::{AppConfig, CM},
    description::ErrorCode,
    font::Font,
};
use lopdf::{Document, Object, content::Content};

/// One text-showing operation read back from a page.
#[derive(Debug)]
struct ShownText {
    font: Font,
    size: f32,
    x: f32,
    y: f32,
    content: String,
}

fn page_texts(pdf: &[u8]) -> Vec<Vec<ShownText>> {
    let document = Document::load_mem(pdf).expect("PDF should load");
    document
        .get_pages()
        .values()
        .map(|page_id| {
            let content = document
                .get_page_content(*page_id)
                .expect("page should have content");
            let operations = Content::decode(&content)
                .expect("content should decode")
                .operations;

            let mut texts = Vec::new();
            let mut font = Font::Helvetica;
            let mut size = 0.0;
            let mut origin = (0.0, 0.0);
            for operation in operations {
                match operation.operator.as_str() {
                    "Tf" => {
                        if let Object::Name(name) = &operation.operands[0] {
                            font = Font::ALL
                                .into_iter()
                                .find(|font| font.resource_name().as_bytes() == name.as_slice())
                                .expect("font resource should be known");
                        }
                        size = operation.operands[1].as_float().unwrap();
                    }
                    "Td" => {
                        origin = (
                            operation.operands[0].as_float().unwrap(),
                            operation.operands[1].as_float().unwrap(),
                        );
                    }
                    "Tj" => {
                        if let Object::String(bytes, _) = &operation.operands[0] {
                            texts.push(ShownText {
                                font,
                                size,
                                x: origin.0,
                                y: origin.1,
                                content: bytes.iter().map(|byte| char::from(*byte)).collect(),
                            });
                        }
                    }
                    _ => {}
                }
            }
            texts
        })
        .collect()
}

const SHAPES: &str = r#"
name = "shapes"
file = "shapes.pdf"
title = "Shapes"
unit = "cm"

[[pages]]
title = "Shapes"

[[pages.elements]]
kind = "ellipse"
id = "start"
x = 2.0
y = 15.0
width = 2.0
height = 0.6
label = "START\nPage Load"

[[pages.elements]]
kind = "rectangle"
id = "load"
x = 1.5
y = 12.0
width = 3.0
height = 0.8
label = "Load Progress\nfrom localStorage"

[[pages.elements]]
kind = "diamond"
id = "check"
x = 2.0
y = 9.0
width = 2.0
height = 1.0
label = "Attempts\n< 2?\nor locked"

[[pages.elements]]
kind = "arrow"
from = { shape = "start", side = "bottom" }
to = { shape = "load", side = "top" }

[[pages.elements]]
kind = "arrow"
from = { shape = "load", side = "bottom" }
to = { shape = "check", side = "top" }
label = "Next"
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = FlowchartBuilder::default();
}

#[test]
fn test_labels_are_centered_on_their_shapes() {
    let builder = FlowchartBuilder::new(AppConfig::default());
    let document = builder.load(SHAPES).expect("Failed to load shapes");
    let pdf = builder.render_pdf(&document).expect("Failed to render");

    let texts = page_texts(&pdf);
    assert_eq!(texts.len(), 1);

    for shape in document.pages()[0].shapes() {
        let center = shape.bounds().center();
        let lines: Vec<&str> = shape.label().split('\n').collect();
        for line in lines {
            let shown = texts[0]
                .iter()
                .find(|text| text.content == line)
                .unwrap_or_else(|| panic!("label line {line:?} should be drawn"));
            let width = shown.font.text_width(&shown.content, shown.size);
            assert!(
                (shown.x + width / 2.0 - center.x()).abs() < 0.05,
                "{line:?} is not centered: {} vs {}",
                shown.x + width / 2.0,
                center.x()
            );
        }
    }
}

#[test]
fn test_three_line_label_is_balanced() {
    let builder = FlowchartBuilder::default();
    let document = builder.load(SHAPES).expect("Failed to load shapes");
    let pdf = builder.render_pdf(&document).expect("Failed to render");
    let texts = page_texts(&pdf);

    let center_y = 9.0 * CM + 0.5 * CM;
    let y_of = |content: &str| {
        texts[0]
            .iter()
            .find(|text| text.content == content)
            .map(|text| text.y)
            .expect("line should be drawn")
    };

    assert!((y_of("< 2?") - center_y).abs() < 0.05);
    assert!((y_of("Attempts") - (center_y + 10.0)).abs() < 0.05);
    assert!((y_of("or locked") - (center_y - 10.0)).abs() < 0.05);
}

#[test]
fn test_arrow_label_is_red_helvetica() {
    let builder = FlowchartBuilder::default();
    let document = builder.load(SHAPES).expect("Failed to load shapes");
    let pdf = builder.render_pdf(&document).expect("Failed to render");
    let texts = page_texts(&pdf);

    let label = texts[0]
        .iter()
        .find(|text| text.content == "Next")
        .expect("arrow label should be drawn");
    assert_eq!(label.font, Font::Helvetica);
    assert_eq!(label.size, 7.0);
}

#[test]
fn test_builder_with_config() {
    let config: AppConfig = toml::from_str(
        r#"
        [page]
        size = "letter"
        orientation = "portrait"
        "#,
    )
    .unwrap();
    let builder = FlowchartBuilder::new(config);
    let document = builder.load(SHAPES).expect("Failed to load shapes");
    let pdf = builder.render_pdf(&document).expect("Failed to render");

    let loaded = Document::load_mem(&pdf).unwrap();
    let page_id = *loaded.get_pages().values().next().unwrap();
    let media_box = loaded
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|value| value.as_float().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(media_box, vec![0.0, 0.0, 612.0, 792.0]);
}

#[test]
fn test_description_errors_keep_source() {
    let source = SHAPES.replace(
        r#"label = "Next""#,
        "label = \"Next\"\ncolor = \"not a color\"",
    );

    let err = FlowchartBuilder::default()
        .load(&source)
        .expect_err("invalid color should be rejected");
    match err {
        FlowdocError::Description { err, src } => {
            assert_eq!(src, source);
            let diagnostic = &err.diagnostics()[0];
            assert_eq!(diagnostic.code(), Some(ErrorCode::E200));
            assert!(src[diagnostic.labels()[0].span()].contains("not a color"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_invalid_syntax_returns_error() {
    let result = FlowchartBuilder::default().parse("this is not [valid toml");
    assert!(matches!(result, Err(FlowdocError::Description { .. })));
}

#[test]
fn test_render_svg_pages() {
    let builder = FlowchartBuilder::default();
    let document = builder.load(SHAPES).expect("Failed to load shapes");
    let pages = builder.render_svg(&document).expect("Failed to render");

    assert_eq!(pages.len(), 1);
    assert!(pages[0].contains("<svg"));
    assert!(pages[0].contains("</svg>"));
}

#[test]
fn test_save_pdf_and_svg() {
    let dir = tempfile::tempdir().unwrap();
    let builder = FlowchartBuilder::default();
    let document = builder.load(SHAPES).expect("Failed to load shapes");

    let pdf_path = dir.path().join(document.file());
    builder.save_pdf(&document, &pdf_path).expect("Failed to save PDF");
    assert_eq!(Document::load(&pdf_path).unwrap().get_pages().len(), 1);

    let svg_paths = builder
        .save_svg(&document, dir.path())
        .expect("Failed to save SVG");
    assert_eq!(svg_paths, vec![dir.path().join("shapes-1.svg")]);
}
