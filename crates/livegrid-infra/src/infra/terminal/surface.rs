//! Slot surface backed by a terminal frame.
//!
//! Slots keep the last text pushed to them and an optional highlight deadline.
//! Nothing is written to the terminal here; the event loop asks for a
//! [`ScreenBuffer`] with [`TerminalSurface::frame`] and paints it.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{CellStyle, ScreenBuffer};
use crate::domain::SlotId;
use crate::infra::Viewport;
use crate::usecases::ports::{CellSurface, Clock};

const MIN_GUTTER: usize = 4;
const CHROME_ROWS: usize = 2;

/// Geometry of a frame: a row-label gutter followed by fixed-width cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    cell_width: usize,
    gutter: usize,
}

impl FrameLayout {
    pub fn new(cell_width: u16, grid_rows: usize) -> Self {
        let digits = grid_rows
            .saturating_sub(1)
            .checked_ilog10()
            .map_or(1, |d| d as usize + 1);
        Self {
            cell_width: usize::from(cell_width).max(1),
            gutter: (digits + 1).max(MIN_GUTTER),
        }
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    pub fn gutter(&self) -> usize {
        self.gutter
    }

    /// Rows and columns of slots that fit a terminal of the given size, after
    /// the header and status lines.
    pub fn visible_slots(&self, term_cols: u16, term_rows: u16) -> (usize, usize) {
        let rows = usize::from(term_rows).saturating_sub(CHROME_ROWS);
        let cols = usize::from(term_cols).saturating_sub(self.gutter) / self.cell_width;
        (rows, cols)
    }

    pub fn width(&self, cols: usize) -> usize {
        self.gutter + cols * self.cell_width
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub renders: u64,
    pub highlights: u64,
}

#[derive(Debug, Clone, Default)]
struct SlotState {
    text: String,
    flash_until: Option<Instant>,
}

pub struct TerminalSurface {
    slots: RefCell<Vec<SlotState>>,
    stats: RefCell<SurfaceStats>,
    clock: Arc<dyn Clock>,
    flash: Duration,
}

impl TerminalSurface {
    pub fn new(clock: Arc<dyn Clock>, flash: Duration) -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            stats: RefCell::new(SurfaceStats::default()),
            clock,
            flash,
        }
    }

    /// Shrinks or grows the slot pool. Dropped slots lose their text.
    pub fn resize_slots(&self, count: usize) {
        self.slots.borrow_mut().resize_with(count, SlotState::default);
    }

    pub fn slot_count(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn slot_text(&self, slot: SlotId) -> Option<String> {
        self.slots
            .borrow()
            .get(slot.index())
            .map(|state| state.text.clone())
    }

    pub fn is_flashing(&self, slot: SlotId, now: Instant) -> bool {
        self.slots
            .borrow()
            .get(slot.index())
            .is_some_and(|state| flashing(state, now))
    }

    pub fn has_active_flash(&self, now: Instant) -> bool {
        self.slots.borrow().iter().any(|state| flashing(state, now))
    }

    /// Time until the earliest running highlight ends.
    pub fn next_flash_expiry(&self, now: Instant) -> Option<Duration> {
        self.slots
            .borrow()
            .iter()
            .filter_map(|state| state.flash_until)
            .filter(|until| *until > now)
            .map(|until| until - now)
            .min()
    }

    pub fn stats(&self) -> SurfaceStats {
        *self.stats.borrow()
    }

    /// Lays out header, slot rows and a status line for the current viewport.
    pub fn frame(&self, viewport: &Viewport, layout: &FrameLayout, status: &str) -> ScreenBuffer {
        let now = self.clock.now();
        let rows = viewport.rows();
        let cols = viewport.cols();
        let origin = viewport.origin();
        let text_width = layout.cell_width().saturating_sub(1).max(1);
        let mut buffer = ScreenBuffer::new(layout.width(cols), rows + CHROME_ROWS);

        for col in 0..cols {
            let label = format!("c{}", origin.col + col);
            buffer.put_str(
                0,
                layout.gutter() + col * layout.cell_width(),
                &format!("{label:>text_width$.text_width$}"),
                CellStyle::header(),
            );
        }

        let slots = self.slots.borrow();
        for row in 0..rows {
            let line = row + 1;
            let label = (origin.row + row).to_string();
            let gutter_text = layout.gutter() - 1;
            buffer.put_str(
                line,
                0,
                &format!("{label:>gutter_text$}"),
                CellStyle::header(),
            );
            for col in 0..cols {
                let Some(state) = slots.get(row * cols + col) else {
                    continue;
                };
                let x = layout.gutter() + col * layout.cell_width();
                let text = &state.text;
                buffer.put_str(
                    line,
                    x,
                    &format!("{text:>text_width$.text_width$}"),
                    CellStyle::default(),
                );
                if flashing(state, now) {
                    buffer.paint(line, x, text_width, CellStyle::flash());
                }
            }
        }

        let status_line = rows + 1;
        let width = buffer.cols();
        buffer.put_str(
            status_line,
            0,
            &format!("{status:<width$.width$}"),
            CellStyle::status(),
        );
        buffer
    }
}

impl CellSurface for TerminalSurface {
    fn render(&self, slot: SlotId, text: &str) {
        let mut slots = self.slots.borrow_mut();
        if slots.len() <= slot.index() {
            slots.resize_with(slot.index() + 1, SlotState::default);
        }
        slots[slot.index()].text.clear();
        slots[slot.index()].text.push_str(text);
        self.stats.borrow_mut().renders += 1;
    }

    fn highlight(&self, slot: SlotId) {
        let until = self.clock.now() + self.flash;
        let mut slots = self.slots.borrow_mut();
        if slots.len() <= slot.index() {
            slots.resize_with(slot.index() + 1, SlotState::default);
        }
        slots[slot.index()].flash_until = Some(until);
        self.stats.borrow_mut().highlights += 1;
    }
}

fn flashing(state: &SlotState, now: Instant) -> bool {
    state.flash_until.is_some_and(|until| now < until)
}
