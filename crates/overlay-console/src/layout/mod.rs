//! Text layout: glyph widths, part splitting and row fitting.

mod fit;
mod glyph;
mod part;

pub use fit::{FitOutcome, LineFitter, PlacedPart};
pub use glyph::{GlyphWidthTable, DEFAULT_GLYPH_WIDTH};
pub use part::{join, split, Part, ELLIPSIS, MAX_PART_CHARS, SPACE_TOKEN_WIDTH};
