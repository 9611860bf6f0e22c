//! Greedy packing of parts into fixed-width rows.

use super::glyph::GlyphWidthTable;
use super::part::{Part, MAX_PART_CHARS};

/// A part with its horizontal offset inside a row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPart {
    pub part: Part,
    /// Offset from the row's left edge, in layout units.
    pub x: f32,
    /// Scaled width of the part.
    pub width: f32,
}

impl PlacedPart {
    /// Right edge of the part.
    pub fn end(&self) -> f32 {
        self.x + self.width
    }
}

/// Result of packing one row.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome<'p> {
    /// Parts placed in this row, left to right.
    pub placed: Vec<PlacedPart>,
    /// Parts that belong on following rows. Always empty when truncated.
    pub remainder: &'p [Part],
    /// Whether overflow was replaced by an ellipsis.
    pub truncated: bool,
}

impl FitOutcome<'_> {
    /// Right edge of the last placed part.
    pub fn used_width(&self) -> f32 {
        self.placed.last().map(PlacedPart::end).unwrap_or(0.0)
    }
}

/// Packs parts into rows of a fixed width.
///
/// With truncation enabled every part except the last of the input must leave
/// room for an ellipsis behind it. The last part may use that reserve, since
/// nothing can follow it.
#[derive(Debug, Clone)]
pub struct LineFitter<'t> {
    table: &'t GlyphWidthTable,
    available_width: f32,
    scale: f32,
    truncate: bool,
    ellipsis_width: f32,
    worst_case_part_width: f32,
}

impl<'t> LineFitter<'t> {
    pub fn new(table: &'t GlyphWidthTable, available_width: f32, scale: f32, truncate: bool) -> Self {
        Self {
            table,
            available_width,
            scale,
            truncate,
            ellipsis_width: Part::Ellipsis.width(table) * scale,
            worst_case_part_width: Self::worst_case_part_width_for(table, scale),
        }
    }

    /// Widest any single input part can be at `scale`.
    pub fn worst_case_part_width_for(table: &GlyphWidthTable, scale: f32) -> f32 {
        table.max_width() * MAX_PART_CHARS as f32 * scale
    }

    /// Narrowest row width that can always take at least one part and an ellipsis.
    pub fn min_row_width(table: &GlyphWidthTable, scale: f32) -> f32 {
        Self::worst_case_part_width_for(table, scale) + Part::Ellipsis.width(table) * scale
    }

    pub fn available_width(&self) -> f32 {
        self.available_width
    }

    pub fn truncates(&self) -> bool {
        self.truncate
    }

    /// Width held back for an ellipsis.
    pub fn reserved_width(&self) -> f32 {
        if self.truncate {
            self.ellipsis_width
        } else {
            0.0
        }
    }

    /// Right edge no part except the input's last may cross.
    pub fn placement_limit(&self) -> f32 {
        self.available_width - self.reserved_width()
    }

    pub fn part_width(&self, part: &Part) -> f32 {
        part.width(self.table) * self.scale
    }

    /// Pack as many of `parts` as fit into one row.
    pub fn fit_row<'p>(&self, parts: &'p [Part]) -> FitOutcome<'p> {
        let limit = self.placement_limit();
        let mut placed: Vec<PlacedPart> = Vec::with_capacity(parts.len().min(64));
        let mut x = 0.0;

        for (i, part) in parts.iter().enumerate() {
            let part_limit = if i + 1 == parts.len() {
                limit + self.reserved_width()
            } else {
                limit
            };

            // Far from the edge any part fits; only measure near the boundary.
            let fits = x + self.worst_case_part_width <= part_limit || {
                x + self.part_width(part) <= part_limit
            };

            // A row always takes at least one part so wrapping makes progress.
            if !fits && !placed.is_empty() {
                if self.truncate {
                    placed.push(PlacedPart {
                        part: Part::Ellipsis,
                        x,
                        width: self.ellipsis_width,
                    });
                    return FitOutcome {
                        placed,
                        remainder: &[],
                        truncated: true,
                    };
                }

                return FitOutcome {
                    placed,
                    remainder: &parts[i..],
                    truncated: false,
                };
            }

            let width = self.part_width(part);
            placed.push(PlacedPart {
                part: part.clone(),
                x,
                width,
            });
            x += width;
        }

        FitOutcome {
            placed,
            remainder: &[],
            truncated: false,
        }
    }
}
