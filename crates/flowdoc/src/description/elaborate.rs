//! Elaboration of a parsed description into a render-ready [`Document`].
//!
//! The builder validates every element against its kind, parses colors,
//! fonts and stroke styles, scales coordinates to points and resolves shape
//! anchors. Problems are collected rather than returned one at a time, so a
//! description with several mistakes reports all of them.

use std::{ops::Range, rc::Rc, str::FromStr};

use indexmap::IndexMap;
use log::{debug, info, trace, warn};
use toml::Spanned;

use flowdoc_core::{
    color::Color,
    draw::{
        Arrow, Shape, ShapeKind, StrokeDefinition, StrokeStyle, TextAlign, TextDefinition,
    },
    font::Font,
    geometry::{Bounds, Point, Size},
};

use super::{
    error::{DescriptionError, Diagnostic, ErrorCode},
    model::{
        DocumentDescription, ElementDescription, ElementKind, EndpointDescription,
        PageDescription,
    },
};
use crate::{
    config::NO_FILL,
    document::{Document, Element, Line, Page, PageHeader, Section, TextBlock},
    theme::Theme,
};

const TEXT_SIZE: f32 = 10.0;
const SECTION_SIZE: f32 = 11.0;
const SECTION_HEADING_SIZE: f32 = 12.0;

/// Shape ids of one page, with the bounds and the span of their definition.
type AnchorMap<'d> = IndexMap<&'d str, (Bounds, Range<usize>)>;

pub struct Builder<'a> {
    theme: &'a Theme,
    page_size: Size,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Builder<'a> {
    pub fn new(theme: &'a Theme, page_size: Size) -> Self {
        Self {
            theme,
            page_size,
            diagnostics: Vec::new(),
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    pub fn build(mut self, description: &DocumentDescription) -> Result<Document, DescriptionError> {
        let name = description.name.get_ref();
        debug!(name, unit:? = description.unit; "Elaborating document");

        self.check_file_name(&description.file);

        if description.pages.is_empty() {
            self.diagnostics.push(
                Diagnostic::error(format!("document `{name}` has no pages"))
                    .with_code(ErrorCode::E103)
                    .with_label(description.name.span(), "this document")
                    .with_help("add at least one `[[pages]]` table"),
            );
        }

        let scale = description.unit.points();
        let pages: Vec<Page> = description
            .pages
            .iter()
            .enumerate()
            .map(|(index, page)| self.build_page(index + 1, page, scale))
            .collect();

        if !self.diagnostics.is_empty() {
            debug!(errors = self.diagnostics.len(); "Elaboration failed");
            return Err(DescriptionError::new(self.diagnostics));
        }

        info!(name, pages = pages.len(); "Document elaboration completed successfully");
        Ok(Document::new(
            name.clone(),
            description.file.get_ref().clone(),
            description.title.clone(),
            pages,
        ))
    }

    fn build_page(&mut self, number: usize, page: &PageDescription, scale: f32) -> Page {
        let header = self.build_header(page);

        let valid: Vec<bool> = page
            .elements
            .iter()
            .map(|element| self.check_element(element))
            .collect();

        // Shapes first, so anchors resolve regardless of declaration order.
        let mut anchors = AnchorMap::new();
        let mut shapes: Vec<Option<Shape>> = Vec::with_capacity(page.elements.len());
        for (element, valid) in page.elements.iter().zip(&valid) {
            let description = element.get_ref();
            let shape = if *valid && description.kind.get_ref().is_shape() {
                self.build_shape(description, scale, number)
            } else {
                None
            };
            if let (Some(shape), Some(id)) = (&shape, &description.id) {
                self.register_anchor(&mut anchors, id, shape.bounds());
            }
            shapes.push(shape);
        }
        trace!(page = number, ids:? = anchors.keys().collect::<Vec<_>>(); "Registered shape ids");

        let mut elements = Vec::with_capacity(page.elements.len());
        for ((element, valid), shape) in page.elements.iter().zip(valid).zip(shapes) {
            if !valid {
                continue;
            }
            let description = element.get_ref();
            let built = match description.kind.get_ref() {
                ElementKind::Rectangle | ElementKind::Diamond | ElementKind::Ellipse => {
                    shape.map(Element::Shape)
                }
                ElementKind::Arrow => self
                    .build_arrow(description, scale, &anchors)
                    .map(Element::Arrow),
                ElementKind::Line => self
                    .build_line(description, scale, &anchors)
                    .map(Element::Line),
                ElementKind::Text => self.build_text(description, scale).map(Element::Text),
                ElementKind::Section => self.build_section(description).map(Element::Section),
            };
            elements.extend(built);
        }

        debug!(page = number, elements = elements.len(); "Elaborated page");
        Page::new(header, elements)
    }

    fn build_header(&self, page: &PageDescription) -> Option<PageHeader> {
        if page.title.is_none() && page.subtitle.is_none() {
            return None;
        }
        Some(PageHeader::new(
            page.title.clone().unwrap_or_default(),
            page.subtitle.clone(),
            Rc::clone(self.theme.title()),
            Rc::clone(self.theme.subtitle()),
        ))
    }

    // ============================================================================
    // Validation
    // ============================================================================

    fn check_file_name(&mut self, file: &Spanned<String>) {
        let name = file.get_ref();
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            self.diagnostics.push(
                Diagnostic::error(format!("invalid output file name `{name}`"))
                    .with_code(ErrorCode::E205)
                    .with_label(file.span(), "invalid file name")
                    .with_help("use a plain file name; the output directory is chosen on the command line"),
            );
        }
    }

    /// Rejects fields the element kind does not use and non-finite numbers.
    fn check_element(&mut self, element: &Spanned<ElementDescription>) -> bool {
        let description = element.get_ref();
        let kind = *description.kind.get_ref();
        let allowed = kind.allowed_fields();
        let mut valid = true;

        for field in description.present_fields() {
            if !allowed.contains(&field) {
                self.diagnostics.push(
                    Diagnostic::error(format!(
                        "field `{field}` is not allowed on {} elements",
                        kind.as_str()
                    ))
                    .with_code(ErrorCode::E102)
                    .with_label(element.span(), "in this element")
                    .with_help(format!(
                        "{} elements accept: {}",
                        kind.as_str(),
                        allowed.join(", ")
                    )),
                );
                valid = false;
            }
        }

        for (name, value, span) in description.numbers() {
            if !value.is_finite() {
                self.diagnostics.push(
                    Diagnostic::error(format!("`{name}` must be a finite number"))
                        .with_code(ErrorCode::E204)
                        .with_label(span, "not finite"),
                );
                valid = false;
            }
        }

        valid
    }

    fn register_anchor<'d>(
        &mut self,
        anchors: &mut AnchorMap<'d>,
        id: &'d Spanned<String>,
        bounds: Bounds,
    ) {
        if let Some((_, first)) = anchors.get(id.get_ref().as_str()) {
            self.diagnostics.push(
                Diagnostic::error(format!(
                    "shape id `{}` is defined multiple times",
                    id.get_ref()
                ))
                .with_code(ErrorCode::E301)
                .with_label(id.span(), "duplicate definition")
                .with_secondary_label(first.clone(), "first defined here")
                .with_help("give each shape on a page a unique id"),
            );
            return;
        }
        anchors.insert(id.get_ref().as_str(), (bounds, id.span()));
    }

    fn require<'d, T>(
        &mut self,
        value: &'d Option<T>,
        field: &str,
        description: &ElementDescription,
    ) -> Option<&'d T> {
        if value.is_none() {
            let kind = description.kind.get_ref().as_str();
            self.diagnostics.push(
                Diagnostic::error(format!("missing field `{field}` for {kind} element"))
                    .with_code(ErrorCode::E101)
                    .with_label(description.kind.span(), format!("{kind} declared here"))
                    .with_help(format!("add `{field} = ...` to the element")),
            );
        }
        value.as_ref()
    }

    fn positive(&mut self, value: &Spanned<f32>, field: &str) -> Option<f32> {
        let number = *value.get_ref();
        if number > 0.0 {
            Some(number)
        } else {
            self.diagnostics.push(
                Diagnostic::error(format!("`{field}` must be positive, got {number}"))
                    .with_code(ErrorCode::E203)
                    .with_label(value.span(), "not positive"),
            );
            None
        }
    }

    fn color(&mut self, value: &Spanned<String>) -> Option<Color> {
        Color::new(value.get_ref())
            .map_err(|err| {
                self.diagnostics.push(
                    Diagnostic::error(err)
                        .with_code(ErrorCode::E200)
                        .with_label(value.span(), "invalid color")
                        .with_help("use a CSS color such as \"lightblue\" or \"#FFD700\""),
                );
            })
            .ok()
    }

    fn font(&mut self, value: &Spanned<String>) -> Option<Font> {
        Font::from_str(value.get_ref())
            .map_err(|err| {
                self.diagnostics.push(
                    Diagnostic::error(err)
                        .with_code(ErrorCode::E201)
                        .with_label(value.span(), "unknown font"),
                );
            })
            .ok()
    }

    fn stroke_style(&mut self, value: &Spanned<String>) -> Option<StrokeStyle> {
        StrokeStyle::from_str(value.get_ref())
            .map_err(|err| {
                self.diagnostics.push(
                    Diagnostic::error(err)
                        .with_code(ErrorCode::E202)
                        .with_label(value.span(), "invalid stroke style"),
                );
            })
            .ok()
    }

    /// Parses an optional value, keeping `default` when it is absent.
    fn optional<T, V>(
        &mut self,
        value: &Option<V>,
        default: T,
        parse: impl FnOnce(&mut Self, &V) -> Option<T>,
    ) -> Option<T> {
        match value {
            Some(value) => parse(self, value),
            None => Some(default),
        }
    }

    // ============================================================================
    // Element Builders
    // ============================================================================

    fn build_shape(
        &mut self,
        description: &ElementDescription,
        scale: f32,
        page: usize,
    ) -> Option<Shape> {
        let kind = match description.kind.get_ref() {
            ElementKind::Diamond => ShapeKind::Diamond,
            ElementKind::Ellipse => ShapeKind::Ellipse,
            _ => ShapeKind::Rectangle,
        };

        let x = self.require(&description.x, "x", description).cloned();
        let y = self.require(&description.y, "y", description).cloned();
        let width = self.require(&description.width, "width", description).cloned();
        let height = self.require(&description.height, "height", description).cloned();
        let width = width.and_then(|width| self.positive(&width, "width"));
        let height = height.and_then(|height| self.positive(&height, "height"));
        let fill = match &description.fill {
            Some(fill) if fill.get_ref().eq_ignore_ascii_case(NO_FILL) => None,
            Some(fill) => Some(self.color(fill)?),
            None => self.theme.fill(),
        };
        let (x, y, width, height) = (x?, y?, width?, height?);

        let bounds = Bounds::new_from_origin(
            Point::new(*x.get_ref(), *y.get_ref()).scale(scale),
            Size::new(width, height).scale(scale),
        );
        if !self.on_page(bounds) {
            warn!(
                page,
                id = description.id.as_ref().map(|id| id.get_ref().as_str()).unwrap_or_default(),
                label = description.label.as_deref().unwrap_or_default();
                "Shape extends past the page edge",
            );
        }

        Some(
            Shape::new(kind, bounds)
                .with_label(description.label.clone().unwrap_or_default())
                .with_fill(fill)
                .with_stroke(Rc::clone(self.theme.stroke()))
                .with_text(Rc::clone(self.theme.label())),
        )
    }

    fn build_arrow(
        &mut self,
        description: &ElementDescription,
        scale: f32,
        anchors: &AnchorMap<'_>,
    ) -> Option<Arrow> {
        let (from, to) = self.endpoints(description, scale, anchors);
        let theme = self.theme;
        let base = theme.arrow();
        let stroke = self.stroke(description, base.stroke());
        let (from, to, stroke) = (from?, to?, stroke?);

        let definition = match stroke {
            Some(stroke) => {
                let mut definition = base.as_ref().clone();
                definition.set_stroke(Rc::new(stroke));
                Rc::new(definition)
            }
            None => Rc::clone(base),
        };

        Some(Arrow::new(from, to, definition).with_label(description.label.clone()))
    }

    fn build_line(
        &mut self,
        description: &ElementDescription,
        scale: f32,
        anchors: &AnchorMap<'_>,
    ) -> Option<Line> {
        let (from, to) = self.endpoints(description, scale, anchors);
        let theme = self.theme;
        let base = theme.stroke();
        let stroke = self.stroke(description, base);
        let (from, to, stroke) = (from?, to?, stroke?);

        let stroke = stroke.map(Rc::new).unwrap_or_else(|| Rc::clone(base));
        Some(Line::new(from, to, stroke))
    }

    fn build_text(&mut self, description: &ElementDescription, scale: f32) -> Option<TextBlock> {
        let x = self.require(&description.x, "x", description).cloned();
        let y = self.require(&description.y, "y", description).cloned();
        let content = self
            .require(&description.content, "content", description)
            .cloned();
        let text = self.text_definition(
            &description.font,
            &description.size,
            &description.color,
            Font::Helvetica,
            TEXT_SIZE,
        );
        let (x, y, content, text) = (x?, y?, content?, text?);

        let anchor = Point::new(*x.get_ref(), *y.get_ref()).scale(scale);
        Some(TextBlock::new(
            anchor,
            content,
            Rc::new(text),
            description.align.unwrap_or(TextAlign::Start),
        ))
    }

    fn build_section(&mut self, description: &ElementDescription) -> Option<Section> {
        if description.heading.is_none() && description.lines.is_none() {
            self.diagnostics.push(
                Diagnostic::error("section has neither a heading nor lines")
                    .with_code(ErrorCode::E101)
                    .with_label(description.kind.span(), "section declared here")
                    .with_help("add `heading = ...` or `lines = [...]`"),
            );
            return None;
        }

        let text = self.text_definition(
            &description.font,
            &description.size,
            &description.color,
            Font::Helvetica,
            SECTION_SIZE,
        );
        let heading_text = self.text_definition(
            &description.heading_font,
            &description.heading_size,
            &description.color,
            Font::HelveticaBold,
            SECTION_HEADING_SIZE,
        );
        let (text, heading_text) = (text?, heading_text?);

        let mut section = Section::new(
            description.heading.clone(),
            Rc::new(heading_text),
            description.lines.clone().unwrap_or_default(),
            Rc::new(text),
        )
        .with_space_before(description.space_before.as_ref().map(|gap| *gap.get_ref()));
        if let Some(spacing) = &description.line_spacing {
            section = section.with_line_spacing(*spacing.get_ref());
        }
        if let Some(gap) = &description.heading_gap {
            section = section.with_heading_gap(*gap.get_ref());
        }
        Some(section)
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    fn endpoints(
        &mut self,
        description: &ElementDescription,
        scale: f32,
        anchors: &AnchorMap<'_>,
    ) -> (Option<Point>, Option<Point>) {
        let from = self.require(&description.from, "from", description);
        let to = self.require(&description.to, "to", description);
        let from = from.and_then(|from| self.resolve_endpoint(from, scale, anchors));
        let to = to.and_then(|to| self.resolve_endpoint(to, scale, anchors));
        (from, to)
    }

    fn resolve_endpoint(
        &mut self,
        endpoint: &Spanned<EndpointDescription>,
        scale: f32,
        anchors: &AnchorMap<'_>,
    ) -> Option<Point> {
        match endpoint.get_ref() {
            EndpointDescription::Point([x, y]) => {
                let point = Point::new(*x, *y);
                if point.is_finite() {
                    Some(point.scale(scale))
                } else {
                    self.diagnostics.push(
                        Diagnostic::error("endpoint coordinates must be finite numbers")
                            .with_code(ErrorCode::E204)
                            .with_label(endpoint.span(), "not finite"),
                    );
                    None
                }
            }
            EndpointDescription::Anchor { shape, side } => match anchors.get(shape.as_str()) {
                Some((bounds, _)) => Some(bounds.side_midpoint(*side)),
                None => {
                    let known = anchors.keys().copied().collect::<Vec<_>>().join(", ");
                    let help = if known.is_empty() {
                        "no shape on this page has an id".to_string()
                    } else {
                        format!("shape ids on this page: {known}")
                    };
                    self.diagnostics.push(
                        Diagnostic::error(format!("unknown shape `{shape}`"))
                            .with_code(ErrorCode::E300)
                            .with_label(endpoint.span(), "referenced here")
                            .with_help(help),
                    );
                    None
                }
            },
        }
    }

    /// Returns `Some(None)` when the element keeps the base stroke.
    fn stroke(
        &mut self,
        description: &ElementDescription,
        base: &StrokeDefinition,
    ) -> Option<Option<StrokeDefinition>> {
        if description.color.is_none()
            && description.width.is_none()
            && description.style.is_none()
        {
            return Some(None);
        }

        let color = self.optional(&description.color, base.color(), Self::color);
        let width = self.optional(&description.width, base.width(), |this, width| {
            this.positive(width, "width")
        });
        let style = self.optional(&description.style, base.style().clone(), Self::stroke_style);
        let (color, width, style) = (color?, width?, style?);

        let mut stroke = StrokeDefinition::new(color, width);
        stroke.set_style(style);
        Some(Some(stroke))
    }

    fn text_definition(
        &mut self,
        font: &Option<Spanned<String>>,
        size: &Option<Spanned<f32>>,
        color: &Option<Spanned<String>>,
        default_font: Font,
        default_size: f32,
    ) -> Option<TextDefinition> {
        let font = self.optional(font, default_font, Self::font);
        let size = self.optional(size, default_size, |this, size| this.positive(size, "size"));
        let color = self.optional(color, Color::default(), Self::color);
        let (font, size, color) = (font?, size?, color?);

        let mut text = TextDefinition::with_font(font, size);
        text.set_color(color);
        Some(text)
    }

    fn on_page(&self, bounds: Bounds) -> bool {
        bounds.min_x() >= 0.0
            && bounds.min_y() >= 0.0
            && bounds.max_x() <= self.page_size.width()
            && bounds.max_y() <= self.page_size.height()
    }
}
