//! Per-glyph width estimates used for packing parts into rows.
//!
//! Widths are in layout units at text size 20 and approximate the rendered
//! advance of the console font. They are estimates, not font metrics.

use std::sync::OnceLock;

/// Width of any character not listed in a width class.
pub const DEFAULT_GLYPH_WIDTH: f32 = 10.0;

/// Width classes, widest first.
const WIDTH_CLASSES: &[(f32, &str)] = &[
    (14.0, "Wm@"),
    (12.5, "Mw"),
    (12.0, "#?"),
    (11.5, "-+="),
    (11.0, "U&~"),
    (10.5, "CDGHNOQS$%<>"),
    (10.0, "03689ABVX_"),
    (9.5, "245EFKPRTYZahns"),
    (9.0, "7Lbcdegopqu^*`"),
    (8.5, "kvxyz"),
    (8.0, "J[]\""),
    (7.5, "1"),
    (7.0, "\\/"),
    (6.5, "r"),
    (6.0, "f {}"),
    (5.5, "t"),
    (5.0, "(),"),
    (4.5, "';"),
    (4.0, "!I|.:"),
    (3.5, "ijl"),
];

/// Immutable character → width lookup.
///
/// One table is shared by every panel in the process; see [`GlyphWidthTable::global`].
#[derive(Debug, Clone)]
pub struct GlyphWidthTable {
    classes: &'static [(f32, &'static str)],
    default_width: f32,
}

impl GlyphWidthTable {
    /// The process-wide table.
    pub fn global() -> &'static GlyphWidthTable {
        static TABLE: OnceLock<GlyphWidthTable> = OnceLock::new();
        TABLE.get_or_init(|| GlyphWidthTable {
            classes: WIDTH_CLASSES,
            default_width: DEFAULT_GLYPH_WIDTH,
        })
    }

    /// Width of a single character. Unmapped characters get the default width.
    pub fn width_of(&self, c: char) -> f32 {
        self.classes
            .iter()
            .find(|(_, members)| members.contains(c))
            .map(|(width, _)| *width)
            .unwrap_or(self.default_width)
    }

    /// Sum of the widths of every character in `text`.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.width_of(c)).sum()
    }

    /// The widest width any single character can have.
    pub fn max_width(&self) -> f32 {
        self.classes
            .iter()
            .map(|(width, _)| *width)
            .fold(self.default_width, f32::max)
    }

    pub fn default_width(&self) -> f32 {
        self.default_width
    }
}
