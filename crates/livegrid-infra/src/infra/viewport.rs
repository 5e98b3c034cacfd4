//! Scrollable window over the grid with a fixed pool of reusable slots.
//!
//! Slot `k` always sits at the same screen position (`k / cols`, `k % cols`
//! inside the window). Scrolling moves the origin, so every slot starts
//! showing a different cell and has to be rebound.

use crate::domain::{CellPosition, SlotId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    grid_rows: usize,
    grid_cols: usize,
    visible_rows: usize,
    visible_cols: usize,
    origin_row: usize,
    origin_col: usize,
}

impl Viewport {
    pub fn new(grid_rows: usize, grid_cols: usize, visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            grid_rows,
            grid_cols,
            visible_rows,
            visible_cols,
            origin_row: 0,
            origin_col: 0,
        }
    }

    pub fn origin(&self) -> CellPosition {
        CellPosition::new(self.origin_row, self.origin_col)
    }

    /// Rows of slots actually in use; never more than the grid has.
    pub fn rows(&self) -> usize {
        self.visible_rows.min(self.grid_rows)
    }

    pub fn cols(&self) -> usize {
        self.visible_cols.min(self.grid_cols)
    }

    pub fn slot_count(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn slots(&self) -> impl Iterator<Item = (SlotId, CellPosition)> + '_ {
        (0..self.slot_count()).filter_map(move |index| {
            let slot = SlotId::new(index);
            self.position_of(slot).map(|position| (slot, position))
        })
    }

    pub fn position_of(&self, slot: SlotId) -> Option<CellPosition> {
        let cols = self.cols();
        if cols == 0 || slot.index() >= self.slot_count() {
            return None;
        }
        Some(CellPosition::new(
            self.origin_row + slot.index() / cols,
            self.origin_col + slot.index() % cols,
        ))
    }

    pub fn slot_for(&self, position: CellPosition) -> Option<SlotId> {
        let row = position.row.checked_sub(self.origin_row)?;
        let col = position.col.checked_sub(self.origin_col)?;
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(SlotId::new(row * self.cols() + col))
    }

    /// Moves the origin, clamped to the grid. Returns whether it moved.
    pub fn scroll_by(&mut self, d_row: isize, d_col: isize) -> bool {
        let row = clamp_offset(self.origin_row, d_row, self.max_origin_row());
        let col = clamp_offset(self.origin_col, d_col, self.max_origin_col());
        let moved = row != self.origin_row || col != self.origin_col;
        self.origin_row = row;
        self.origin_col = col;
        moved
    }

    pub fn scroll_to(&mut self, origin: CellPosition) -> bool {
        let row = origin.row.min(self.max_origin_row());
        let col = origin.col.min(self.max_origin_col());
        let moved = row != self.origin_row || col != self.origin_col;
        self.origin_row = row;
        self.origin_col = col;
        moved
    }

    /// Changes the window size and re-clamps the origin. Returns whether the
    /// slot layout changed.
    pub fn resize(&mut self, visible_rows: usize, visible_cols: usize) -> bool {
        let before = (self.rows(), self.cols(), self.origin());
        self.visible_rows = visible_rows;
        self.visible_cols = visible_cols;
        self.origin_row = self.origin_row.min(self.max_origin_row());
        self.origin_col = self.origin_col.min(self.max_origin_col());
        before != (self.rows(), self.cols(), self.origin())
    }

    /// Tracks a grid replacement of a different shape.
    pub fn set_grid_size(&mut self, grid_rows: usize, grid_cols: usize) {
        self.grid_rows = grid_rows;
        self.grid_cols = grid_cols;
        self.origin_row = self.origin_row.min(self.max_origin_row());
        self.origin_col = self.origin_col.min(self.max_origin_col());
    }

    fn max_origin_row(&self) -> usize {
        self.grid_rows.saturating_sub(self.visible_rows)
    }

    fn max_origin_col(&self) -> usize {
        self.grid_cols.saturating_sub(self.visible_cols)
    }
}

fn clamp_offset(current: usize, delta: isize, max: usize) -> usize {
    current.saturating_add_signed(delta).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_cover_window_in_row_major_order() {
        let viewport = Viewport::new(100, 5, 3, 2);
        let slots: Vec<(SlotId, CellPosition)> = viewport.slots().collect();

        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0], (SlotId::new(0), CellPosition::new(0, 0)));
        assert_eq!(slots[1], (SlotId::new(1), CellPosition::new(0, 1)));
        assert_eq!(slots[5], (SlotId::new(5), CellPosition::new(2, 1)));
    }

    #[test]
    fn test_window_larger_than_grid_is_trimmed() {
        let viewport = Viewport::new(2, 3, 10, 10);
        assert_eq!(viewport.slot_count(), 6);
        assert_eq!(viewport.position_of(SlotId::new(6)), None);
    }

    #[test]
    fn test_scroll_reassigns_slots() {
        let mut viewport = Viewport::new(100, 5, 3, 2);
        assert!(viewport.scroll_by(10, 1));

        assert_eq!(viewport.origin(), CellPosition::new(10, 1));
        assert_eq!(
            viewport.position_of(SlotId::new(0)),
            Some(CellPosition::new(10, 1))
        );
        assert_eq!(viewport.slot_for(CellPosition::new(11, 2)), Some(SlotId::new(3)));
        assert_eq!(viewport.slot_for(CellPosition::new(0, 0)), None);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut viewport = Viewport::new(100, 5, 3, 2);
        viewport.scroll_by(500, 500);
        assert_eq!(viewport.origin(), CellPosition::new(97, 3));

        assert!(!viewport.scroll_by(1, 1));
        assert!(viewport.scroll_by(-1000, -1000));
        assert_eq!(viewport.origin(), CellPosition::new(0, 0));
        assert!(!viewport.scroll_by(-1, 0));
    }

    #[test]
    fn test_resize_reclamps_origin() {
        let mut viewport = Viewport::new(10, 5, 3, 2);
        viewport.scroll_to(CellPosition::new(7, 3));

        assert!(viewport.resize(6, 5));

        assert_eq!(viewport.origin(), CellPosition::new(4, 0));
        assert_eq!(viewport.slot_count(), 30);
        assert!(!viewport.resize(6, 5));
    }

    #[test]
    fn test_empty_grid_has_no_slots() {
        let viewport = Viewport::new(0, 0, 5, 5);
        assert_eq!(viewport.slot_count(), 0);
        assert_eq!(viewport.slots().count(), 0);
        assert_eq!(viewport.position_of(SlotId::new(0)), None);
    }

    #[test]
    fn test_redraw_after_scroll_shows_new_window() {
        use crate::domain::GridModel;
        use crate::usecases::ports::test_support::RecordingSurface;
        use crate::usecases::redraw_slots;

        let grid = GridModel::filled(6, 2, "0");
        grid.at(4, 1).unwrap().set_value("9");
        let surface = RecordingSurface::new();
        let mut viewport = Viewport::new(6, 2, 2, 2);
        viewport.scroll_by(3, 0);

        let report = redraw_slots(&grid, viewport.slots(), &surface);

        assert_eq!(report.rendered, 4);
        assert_eq!(report.highlighted, 1);
        assert_eq!(surface.renders(SlotId::new(3)), vec!["9"]);
    }

    #[test]
    fn test_slot_position_round_trip() {
        let mut viewport = Viewport::new(50, 8, 4, 3);
        viewport.scroll_by(7, 2);
        for (slot, position) in viewport.slots() {
            assert_eq!(viewport.slot_for(position), Some(slot));
        }
    }
}
