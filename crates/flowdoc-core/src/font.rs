//! Base-14 fonts, their metrics and WinAnsi text encoding.
//!
//! Flowdoc only draws with the standard PDF Type1 fonts, which every PDF
//! reader provides without embedding. Centering a label requires knowing how
//! wide it renders, so this module carries the advance widths (in 1/1000 em)
//! from the Adobe font metrics of the fonts in use.
//!
//! # Quick Start
//!
//! ```
//! # use flowdoc_core::font::Font;
//! let width = Font::Helvetica.text_width("Hello", 10.0);
//! assert!((width - 22.78).abs() < 1e-4);
//!
//! let encoded = Font::encode("Start • End");
//! assert_eq!(encoded.bytes()[6], 0x95);
//! ```

use std::{fmt, str::FromStr};

use log::trace;

/// Glyph widths of Helvetica for WinAnsi codes 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Glyph widths of Helvetica-Bold for WinAnsi codes 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Every Courier glyph has the same advance width.
const COURIER_WIDTH: u16 = 600;

/// Replacement byte for characters WinAnsiEncoding cannot represent.
const REPLACEMENT: u8 = b'?';

/// Unicode characters outside Latin-1 that WinAnsiEncoding maps into 0x80..=0x9F.
const WIN_ANSI_EXTRAS: [(char, u8); 12] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('…', 0x85),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('™', 0x99),
    ('›', 0x9B),
];

/// One of the standard PDF fonts used for diagram text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Font {
    #[default]
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl Font {
    /// All fonts, in the order their resources are registered.
    pub const ALL: [Font; 4] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::Courier,
        Font::CourierBold,
    ];

    /// Returns the PostScript name used as the PDF `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    /// Returns the resource name content streams refer to this font by.
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
            Self::Courier => "F3",
            Self::CourierBold => "F4",
        }
    }

    /// Returns a CSS `font-family` list approximating this font.
    pub fn css_family(self) -> &'static str {
        match self {
            Self::Helvetica | Self::HelveticaBold => "Helvetica, Arial, sans-serif",
            Self::Courier | Self::CourierBold => "Courier, 'Courier New', monospace",
        }
    }

    /// Returns true for the bold variants.
    pub fn is_bold(self) -> bool {
        matches!(self, Self::HelveticaBold | Self::CourierBold)
    }

    /// Returns the advance width of a single WinAnsi code in 1/1000 em.
    pub fn glyph_width(self, code: u8) -> u16 {
        match self {
            Self::Courier | Self::CourierBold => COURIER_WIDTH,
            Self::Helvetica => helvetica_width(&HELVETICA_WIDTHS, code),
            Self::HelveticaBold => helvetica_width(&HELVETICA_BOLD_WIDTHS, code),
        }
    }

    /// Returns the rendered width of `text` at `size` points.
    ///
    /// The text is measured after WinAnsi encoding, so replaced characters
    /// count as the width of `?`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = Self::encode(text)
            .bytes()
            .iter()
            .map(|&code| u32::from(self.glyph_width(code)))
            .sum();
        units as f32 * size / 1000.0
    }

    /// Encodes `text` as WinAnsiEncoding bytes for a PDF string operand.
    pub fn encode(text: &str) -> EncodedText {
        let mut bytes = Vec::with_capacity(text.len());
        let mut replaced = 0;
        for ch in text.chars() {
            match win_ansi_code(ch) {
                Some(code) => bytes.push(code),
                None => {
                    trace!(character:? = ch; "Character not representable in WinAnsiEncoding");
                    bytes.push(REPLACEMENT);
                    replaced += 1;
                }
            }
        }
        EncodedText { bytes, replaced }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_font())
    }
}

impl FromStr for Font {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "helvetica" => Ok(Self::Helvetica),
            "helvetica-bold" | "bold" => Ok(Self::HelveticaBold),
            "courier" | "code" => Ok(Self::Courier),
            "courier-bold" => Ok(Self::CourierBold),
            _ => Err(format!(
                "invalid font `{s}`, valid values: helvetica, helvetica-bold, courier, courier-bold"
            )),
        }
    }
}

/// Text encoded for a PDF string operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    bytes: Vec<u8>,
    replaced: usize,
}

impl EncodedText {
    /// Returns the encoded bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the value, returning the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns how many characters were replaced by `?`
    pub fn replaced(&self) -> usize {
        self.replaced
    }
}

fn helvetica_width(table: &[u16; 95], code: u8) -> u16 {
    match code {
        32..=126 => table[usize::from(code - 32)],
        0x95 => 350,
        0x85 | 0x97 => 1000,
        0x80 | 0x96 => 556,
        0x91 | 0x92 | 0x82 => 278,
        0x93 | 0x94 => 500,
        0x99 => 1000,
        0x9B => 333,
        // Latin-1 letters are close to the lowercase average.
        _ => 556,
    }
}

fn win_ansi_code(ch: char) -> Option<u8> {
    match u32::from(ch) {
        code @ 32..=126 => u8::try_from(code).ok(),
        code @ 0xA0..=0xFF => u8::try_from(code).ok(),
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(extra, _)| *extra == ch)
            .map(|(_, code)| *code),
    }
}
