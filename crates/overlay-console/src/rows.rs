//! Row slots and the widgets backing them.
//!
//! The manager owns a fixed array of `max_rows` slots. A slot is either empty
//! or holds exactly one row container plus the text widgets painted into it.
//! Writing to an occupied slot deletes the old widgets first, so nothing
//! leaks however often a slot is reused.
//!
//! Two addressing schemes share the slots:
//! - static: the caller names the slot; it sits at `index × row_height`
//! - scrolling: a cursor walks the slots round-robin, new text always lands
//!   on the bottom line, older rows move up one line per append and are
//!   deleted once they would leave the top of the panel

use crate::config::OutOfRangePolicy;
use crate::error::ConsoleError;
use crate::layout::{join, LineFitter, Part, PlacedPart};
use crate::widget::{
    Anchor, Background, Color, ContainerSpec, Position, Size, TextSpec, WidgetService,
};

/// Rows at or above this offset are evicted on the next scroll.
pub const TOP_BOUNDARY: f32 = 1.0;

/// A placed part and the text widget drawing it. Spaces have no widget.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedPart<H> {
    pub placed: PlacedPart,
    pub handle: Option<H>,
}

#[derive(Debug)]
struct RowSlot<H> {
    handle: H,
    parts: Vec<PaintedPart<H>>,
    /// Row whose static text wrapped into this one.
    continuation_of: Option<usize>,
}

/// One horizontal slot of the panel.
#[derive(Debug)]
pub struct Row<H> {
    index: usize,
    /// Vertical offset inside the panel.
    y: f32,
    slot: Option<RowSlot<H>>,
}

impl<H> Row<H> {
    fn empty(index: usize) -> Self {
        Self {
            index,
            y: 0.0,
            slot: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn is_occupied(&self) -> bool {
        self.slot.is_some()
    }

    /// The row container, if the slot is occupied.
    pub fn handle(&self) -> Option<&H> {
        self.slot.as_ref().map(|slot| &slot.handle)
    }

    /// The row this one continues, if it holds wrapped static text.
    pub fn continuation_of(&self) -> Option<usize> {
        self.slot.as_ref().and_then(|slot| slot.continuation_of)
    }

    pub fn parts(&self) -> &[PaintedPart<H>] {
        self.slot
            .as_ref()
            .map(|slot| slot.parts.as_slice())
            .unwrap_or(&[])
    }

    /// The text shown in this row, spaces and ellipsis included.
    pub fn text(&self) -> String {
        let parts: Vec<Part> = self.parts().iter().map(|p| p.placed.part.clone()).collect();
        join(&parts)
    }

    pub fn snapshot(&self) -> Option<RowSnapshot> {
        self.slot.as_ref()?;
        Some(RowSnapshot {
            index: self.index,
            y: self.y,
            text: self.text(),
            offsets: self.parts().iter().map(|p| p.placed.x).collect(),
        })
    }
}

/// Plain view of an occupied row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    pub index: usize,
    pub y: f32,
    pub text: String,
    /// Horizontal offset of every part, spaces included.
    pub offsets: Vec<f32>,
}

/// Geometry and paint for row widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct RowStyle {
    /// Row container width (the panel's inner width).
    pub width: f32,
    /// Row container height.
    pub height: f32,
    /// Vertical distance between rows.
    pub row_height: f32,
    pub text_size: f32,
    pub text_color: Color,
}

/// What one `log` call produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOutcome {
    /// Rows (re)written by the call.
    pub rows_written: usize,
    /// The text was cut short with an ellipsis.
    pub truncated: bool,
    /// Parts that wrapped past the last static row and were not shown.
    pub dropped_parts: usize,
}

/// Result of a single scrolling append.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStep<'p> {
    /// Slot the text went into.
    pub index: usize,
    /// Parts still waiting for a row.
    pub remainder: Option<&'p [Part]>,
    pub truncated: bool,
}

/// Fixed-capacity row slots for one panel.
#[derive(Debug)]
pub struct RowSlotManager<H> {
    /// Panel container every row is created in.
    parent: H,
    rows: Vec<Row<H>>,
    style: RowStyle,
    policy: OutOfRangePolicy,
    /// Next slot for scrolling appends.
    cursor: usize,
}

impl<H: Clone + PartialEq + std::fmt::Debug> RowSlotManager<H> {
    pub fn new(parent: H, max_rows: usize, style: RowStyle, policy: OutOfRangePolicy) -> Self {
        Self {
            parent,
            rows: (0..max_rows).map(Row::empty).collect(),
            style,
            policy,
            cursor: Self::initial_cursor(max_rows),
        }
    }

    /// Scrolling starts in the last slot.
    fn initial_cursor(max_rows: usize) -> usize {
        max_rows.saturating_sub(1)
    }

    pub fn max_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row<H>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row<H>> {
        self.rows.get(index)
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_occupied()).count()
    }

    /// Slot the next scrolling append will use.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Occupied rows ordered top to bottom.
    pub fn snapshots(&self) -> Vec<RowSnapshot> {
        let mut snapshots: Vec<RowSnapshot> =
            self.rows.iter().filter_map(Row::snapshot).collect();
        snapshots.sort_by(|a, b| a.y.total_cmp(&b.y));
        snapshots
    }

    fn bottom_y(&self) -> f32 {
        Self::initial_cursor(self.rows.len()) as f32 * self.style.row_height
    }

    /// `Ok(true)` when `index` is a slot, `Ok(false)` when it should be ignored.
    fn check_index(&self, index: usize) -> Result<bool, ConsoleError> {
        if index < self.rows.len() {
            return Ok(true);
        }

        match self.policy {
            OutOfRangePolicy::Ignore => {
                log::warn!(
                    "Ignoring row index {} (panel has {} rows)",
                    index,
                    self.rows.len()
                );
                Ok(false)
            }
            OutOfRangePolicy::Reject => Err(ConsoleError::RowOutOfRange {
                index,
                max_rows: self.rows.len(),
            }),
        }
    }

    /// Write `parts` into row `index`, replacing whatever was there.
    ///
    /// Without truncation, overflow continues on the following rows; parts
    /// that would need a row past the last one are dropped. Rows an earlier
    /// write to `index` wrapped onto are deleted first.
    pub fn place_static<S>(
        &mut self,
        service: &mut S,
        fitter: &LineFitter<'_>,
        index: usize,
        parts: &[Part],
    ) -> Result<LogOutcome, ConsoleError>
    where
        S: WidgetService<Handle = H>,
    {
        let mut outcome = LogOutcome::default();
        if !self.check_index(index)? {
            return Ok(outcome);
        }

        let mut row = index;
        let mut pending = parts;
        loop {
            let fit = fitter.fit_row(pending);
            let y = row as f32 * self.style.row_height;
            let continuation_of = (row != index).then_some(index);
            self.evict_chain(service, row);
            self.fill_row(service, row, y, fit.placed, continuation_of);
            outcome.rows_written += 1;
            outcome.truncated |= fit.truncated;

            if fit.remainder.is_empty() {
                break;
            }

            row += 1;
            if row >= self.rows.len() {
                log::debug!(
                    "Dropping {} parts past the last row",
                    fit.remainder.len()
                );
                outcome.dropped_parts = fit.remainder.len();
                break;
            }
            pending = fit.remainder;
        }

        Ok(outcome)
    }

    /// Scroll every row up one line and write one row of `parts` at the bottom.
    pub fn append_scrolling<'p, S>(
        &mut self,
        service: &mut S,
        fitter: &LineFitter<'_>,
        parts: &'p [Part],
    ) -> ScrollStep<'p>
    where
        S: WidgetService<Handle = H>,
    {
        let fit = fitter.fit_row(parts);

        self.shift_up(service);

        let index = self.cursor;
        let y = self.bottom_y();
        self.fill_row(service, index, y, fit.placed, None);
        self.cursor = (index + 1) % self.rows.len();

        ScrollStep {
            index,
            remainder: (!fit.remainder.is_empty()).then_some(fit.remainder),
            truncated: fit.truncated,
        }
    }

    /// Append `parts`, taking as many bottom rows as the text needs.
    pub fn append_wrapped<S>(
        &mut self,
        service: &mut S,
        fitter: &LineFitter<'_>,
        parts: &[Part],
    ) -> LogOutcome
    where
        S: WidgetService<Handle = H>,
    {
        let mut outcome = LogOutcome::default();
        let mut pending = parts;

        loop {
            let step = self.append_scrolling(service, fitter, pending);
            outcome.rows_written += 1;
            outcome.truncated |= step.truncated;

            match step.remainder {
                Some(rest) => pending = rest,
                None => break,
            }
        }

        outcome
    }

    /// Delete the row in slot `index`, if any, and the rows its text
    /// wrapped onto.
    pub fn evict_index<S>(&mut self, service: &mut S, index: usize) -> Result<bool, ConsoleError>
    where
        S: WidgetService<Handle = H>,
    {
        if !self.check_index(index)? {
            return Ok(false);
        }
        Ok(self.evict_chain(service, index))
    }

    /// Delete every row and rewind the scrolling cursor. Returns the number
    /// of rows deleted.
    pub fn clear_all<S>(&mut self, service: &mut S) -> usize
    where
        S: WidgetService<Handle = H>,
    {
        let mut cleared = 0;
        for index in 0..self.rows.len() {
            if self.evict(service, index) {
                cleared += 1;
            }
        }
        self.cursor = Self::initial_cursor(self.rows.len());
        cleared
    }

    /// Evict `index` and every row continuing it.
    fn evict_chain<S>(&mut self, service: &mut S, index: usize) -> bool
    where
        S: WidgetService<Handle = H>,
    {
        let mut evicted = self.evict(service, index);
        for follower in index + 1..self.rows.len() {
            if self.rows[follower].continuation_of() == Some(index) {
                evicted |= self.evict(service, follower);
            }
        }
        evicted
    }

    fn evict<S>(&mut self, service: &mut S, index: usize) -> bool
    where
        S: WidgetService<Handle = H>,
    {
        match self.rows[index].slot.take() {
            Some(slot) => {
                service.delete_widget(&slot.handle);
                log::trace!("Evicted row {}", index);
                true
            }
            None => false,
        }
    }

    fn shift_up<S>(&mut self, service: &mut S)
    where
        S: WidgetService<Handle = H>,
    {
        let row_height = self.style.row_height;

        for row in self.rows.iter_mut().filter(|row| row.is_occupied()) {
            if row.y <= TOP_BOUNDARY {
                if let Some(slot) = row.slot.take() {
                    service.delete_widget(&slot.handle);
                    log::trace!("Row {} scrolled out of the panel", row.index);
                }
                continue;
            }

            row.y -= row_height;
            if let Some(slot) = &row.slot {
                service.set_position(&slot.handle, Position::new(0.0, row.y));
            }
        }
    }

    fn fill_row<S>(
        &mut self,
        service: &mut S,
        index: usize,
        y: f32,
        placed: Vec<PlacedPart>,
        continuation_of: Option<usize>,
    ) where
        S: WidgetService<Handle = H>,
    {
        self.evict(service, index);

        let container = ContainerSpec::new(format!("consoleRow_{}", index))
            .at(Position::new(0.0, y))
            .sized(Size::new(self.style.width, self.style.height))
            .anchored(Anchor::TopLeft)
            .background(Background::NONE);
        let handle = service.create_container(&container, Some(&self.parent));

        let mut parts = Vec::with_capacity(placed.len());
        for (n, placed) in placed.into_iter().enumerate() {
            let text = if placed.part.is_space() {
                None
            } else {
                let spec = self.text_spec(index, n, &placed);
                Some(service.create_text(&spec, Some(&handle)))
            };
            parts.push(PaintedPart {
                placed,
                handle: text,
            });
        }

        log::trace!("Row {} written at y={} ({} parts)", index, y, parts.len());

        let row = &mut self.rows[index];
        row.y = y;
        row.slot = Some(RowSlot {
            handle,
            parts,
            continuation_of,
        });
    }

    fn text_spec(&self, index: usize, n: usize, placed: &PlacedPart) -> TextSpec {
        TextSpec::new(format!("consoleText_{}_{}", index, n), placed.part.text())
            .at(Position::new(placed.x, 0.0))
            .sized(Size::new(placed.width, self.style.height))
            .anchored(Anchor::CenterLeft)
            .text_size(self.style.text_size)
            .text_color(self.style.text_color)
            .text_anchor(Anchor::CenterLeft)
    }
}
