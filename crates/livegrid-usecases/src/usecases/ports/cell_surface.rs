//! Rendering port for visual slots.

use std::rc::Rc;

use crate::domain::SlotId;

/// Whatever draws slots on screen. The core only ever pushes text and asks for
/// a transient highlight; layout and animation belong to the implementation.
pub trait CellSurface {
    fn render(&self, slot: SlotId, text: &str);

    fn highlight(&self, slot: SlotId);
}

pub type CellSurfaceHandle = Rc<dyn CellSurface>;
