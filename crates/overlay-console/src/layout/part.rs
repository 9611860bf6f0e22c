//! Splitting log text into layout parts.
//!
//! A part is the smallest unit the fitter places: a run of one to three
//! non-space characters, or a single space. Rows are packed part by part, so
//! a line never breaks inside a part.

use super::glyph::GlyphWidthTable;
use regex::Regex;
use std::sync::OnceLock;

/// Maximum number of characters in a glyph part.
pub const MAX_PART_CHARS: usize = 3;

/// Width reserved for a space token.
pub const SPACE_TOKEN_WIDTH: f32 = 7.0;

/// Text drawn when a row is cut short.
pub const ELLIPSIS: &str = "...";

/// A text layout unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// One to three non-space characters.
    Glyphs(String),
    /// A single space. Only advances the pen; nothing is drawn.
    Space,
    /// The truncation marker.
    Ellipsis,
}

impl Part {
    pub fn glyphs(text: impl Into<String>) -> Self {
        Part::Glyphs(text.into())
    }

    /// The literal text of this part.
    pub fn text(&self) -> &str {
        match self {
            Part::Glyphs(text) => text,
            Part::Space => " ",
            Part::Ellipsis => ELLIPSIS,
        }
    }

    pub fn is_space(&self) -> bool {
        matches!(self, Part::Space)
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, Part::Ellipsis)
    }

    /// Unscaled width of this part.
    pub fn width(&self, table: &GlyphWidthTable) -> f32 {
        match self {
            Part::Space => SPACE_TOKEN_WIDTH,
            other => table.text_width(other.text()),
        }
    }
}

/// Split `text` into parts, left to right.
///
/// Non-space characters are grouped greedily in runs of up to
/// [`MAX_PART_CHARS`]; each space becomes its own [`Part::Space`].
/// Only U+0020 counts as a space; tabs and newlines are ordinary glyphs.
pub fn split(text: &str) -> Vec<Part> {
    static PART_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = PART_REGEX.get_or_init(|| Regex::new(r"[^ ]{1,3}| ").unwrap());

    re.find_iter(text)
        .map(|m| match m.as_str() {
            " " => Part::Space,
            glyphs => Part::glyphs(glyphs),
        })
        .collect()
}

/// Concatenate the text of `parts`, with a literal space for each space token.
pub fn join(parts: &[Part]) -> String {
    parts.iter().map(Part::text).collect()
}
