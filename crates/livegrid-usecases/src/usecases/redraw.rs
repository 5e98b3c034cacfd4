//! Full redraw of visible slots without subscriptions.

use crate::domain::{CellPosition, GridModel, SlotId};
use crate::usecases::ports::CellSurface;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawReport {
    pub rendered: usize,
    pub highlighted: usize,
    pub missing: usize,
}

/// Renders every assigned slot from the grid, highlighting and consuming any
/// pending change. Positions outside the grid are counted and skipped.
pub fn redraw_slots<I>(grid: &GridModel, assignments: I, surface: &dyn CellSurface) -> RedrawReport
where
    I: IntoIterator<Item = (SlotId, CellPosition)>,
{
    let mut report = RedrawReport::default();
    for (slot, position) in assignments {
        let Ok(item) = grid.at_position(position) else {
            report.missing += 1;
            continue;
        };
        surface.render(slot, &item.value());
        report.rendered += 1;
        if item.is_changed() {
            surface.highlight(slot);
            item.mark_consumed();
            report.highlighted += 1;
        }
    }
    report
}
