//! Top-down placement of flowing text sections.
//!
//! Shapes, arrows and free text are positioned absolutely. Sections are not:
//! they are stacked from the top margin downward. [`LayoutContext`] carries
//! the cursor for that stacking. Placement consumes a context and returns the
//! advanced one, so the cursor never lives in shared state.

use std::rc::Rc;

use log::warn;

use flowdoc_core::{
    draw::TextDefinition,
    geometry::{Point, Size},
};

use crate::{config::PageConfig, document::Section};

/// A line of section text with its resolved baseline origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    origin: Point,
    content: String,
    text: Rc<TextDefinition>,
}

impl PlacedText {
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn text(&self) -> &TextDefinition {
        &self.text
    }
}

/// Cursor and spacing for laying out sections on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutContext {
    left: f32,
    indent: f32,
    cursor: f32,
    bottom: f32,
    section_gap: f32,
    sections: usize,
}

impl LayoutContext {
    /// Creates a context whose cursor starts at the top margin.
    pub fn new(page: Size, config: &PageConfig) -> Self {
        let margin = config.margin();
        Self {
            left: margin,
            indent: config.indent(),
            cursor: page.height() - margin,
            bottom: margin,
            section_gap: config.section_gap(),
            sections: 0,
        }
    }

    /// Moves the cursor below a page header.
    pub fn below_header(self, header_gap: f32) -> Self {
        Self {
            cursor: self.cursor - header_gap,
            ..self
        }
    }

    /// Returns the baseline the next heading would be placed on.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Returns the number of sections placed so far.
    pub fn sections(&self) -> usize {
        self.sections
    }

    /// Places a section and returns its lines with the advanced context.
    ///
    /// Every section but the first is preceded by its own `space_before` or
    /// the page section gap. The heading sits at the left margin, the lines
    /// are indented. Content below the bottom margin is still placed; it is
    /// reported as a warning.
    pub fn place_section(self, section: &Section) -> (Vec<PlacedText>, Self) {
        let mut cursor = self.cursor;
        if self.sections > 0 {
            cursor -= section.space_before().unwrap_or(self.section_gap);
        }

        let mut placed = Vec::with_capacity(section.lines().len() + 1);
        if let Some(heading) = section.heading() {
            placed.push(PlacedText {
                origin: Point::new(self.left, cursor),
                content: heading.to_string(),
                text: Rc::clone(section.heading_text()),
            });
            cursor -= section.heading_gap();
        }

        for line in section.lines() {
            placed.push(PlacedText {
                origin: Point::new(self.left + self.indent, cursor),
                content: line.clone(),
                text: Rc::clone(section.text()),
            });
            cursor -= section.line_spacing();
        }

        let lowest = placed.last().map(|text| text.origin.y());
        if lowest.is_some_and(|baseline| baseline < self.bottom) {
            warn!(
                heading = section.heading().unwrap_or_default(),
                bottom = self.bottom;
                "Section runs past the bottom margin"
            );
        }

        let next = Self {
            cursor,
            sections: self.sections + 1,
            ..self
        };
        (placed, next)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;
    use flowdoc_core::font::Font;

    fn section(heading: Option<&str>, lines: &[&str]) -> Section {
        Section::new(
            heading.map(str::to_string),
            Rc::new(TextDefinition::with_font(Font::HelveticaBold, 12.0)),
            lines.iter().map(|line| line.to_string()).collect(),
            Rc::new(TextDefinition::with_font(Font::Helvetica, 11.0)),
        )
    }

    fn context() -> LayoutContext {
        LayoutContext::new(Size::new(800.0, 600.0), &PageConfig::default())
    }

    #[test]
    fn test_cursor_starts_at_top_margin() {
        let ctx = context();
        assert_approx_eq!(f32, ctx.cursor(), 600.0 - crate::config::CM);
        assert_approx_eq!(f32, ctx.below_header(40.0).cursor(), ctx.cursor() - 40.0);
    }

    #[test]
    fn test_first_section_heading_then_indented_lines() {
        let ctx = context().below_header(40.0);
        let top = ctx.cursor();

        let (placed, next) = ctx.place_section(&section(Some("Key Functions:"), &["a()", "b()"]));

        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].content(), "Key Functions:");
        assert_eq!(placed[0].origin(), Point::new(crate::config::CM, top));
        assert_eq!(placed[0].text().font(), Font::HelveticaBold);
        assert_approx_eq!(f32, placed[1].origin().x(), crate::config::CM + 20.0);
        assert_approx_eq!(f32, placed[1].origin().y(), top - 25.0);
        assert_approx_eq!(f32, placed[2].origin().y(), top - 45.0);
        assert_approx_eq!(f32, next.cursor(), top - 65.0);
        assert_eq!(next.sections(), 1);
    }

    #[test]
    fn test_later_sections_get_gap() {
        let ctx = context();
        let (_, ctx) = ctx.place_section(&section(Some("One"), &[]));
        let after_first = ctx.cursor();

        let (placed, ctx) = ctx.place_section(&section(Some("Two"), &[]));
        assert_approx_eq!(f32, placed[0].origin().y(), after_first - 20.0);

        let custom = section(Some("Three"), &[]).with_space_before(Some(5.0));
        let before = ctx.cursor();
        let (placed, _) = ctx.place_section(&custom);
        assert_approx_eq!(f32, placed[0].origin().y(), before - 5.0);
    }

    #[test]
    fn test_section_without_heading() {
        let (placed, next) = context().place_section(&section(None, &["only line"]));

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].content(), "only line");
        assert_approx_eq!(f32, next.cursor(), context().cursor() - 20.0);
    }

    #[test]
    fn test_overflow_is_still_placed() {
        let lines: Vec<&str> = std::iter::repeat_n("line", 60).collect();
        let (placed, next) = context().place_section(&section(Some("Long"), &lines));

        assert_eq!(placed.len(), 61);
        assert!(next.cursor() < 0.0);
    }

    proptest! {
        #[test]
        fn prop_cursor_advances_by_heading_and_lines(
            line_count in 0usize..40,
            spacing in 1.0f32..40.0,
            gap in 1.0f32..40.0,
        ) {
            let lines = vec!["line"; line_count];
            let section = section(Some("Heading"), &lines)
                .with_line_spacing(spacing)
                .with_heading_gap(gap);
            let ctx = context();

            let (placed, next) = ctx.place_section(&section);

            prop_assert_eq!(placed.len(), line_count + 1);
            let expected = ctx.cursor() - gap - spacing * line_count as f32;
            prop_assert!((next.cursor() - expected).abs() < 1e-2);
            prop_assert!(
                placed.windows(2).all(|pair| pair[1].origin().y() < pair[0].origin().y())
            );
        }
    }
}
