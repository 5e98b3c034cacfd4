use std::cell::RefCell;

use crate::domain::SlotId;
use crate::usecases::ports::CellSurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Render { slot: SlotId, text: String },
    Highlight { slot: SlotId },
}

/// Surface that records every call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: RefCell<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn renders(&self, slot: SlotId) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Render { slot: s, text } if *s == slot => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn highlight_count(&self, slot: SlotId) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::Highlight { slot: s } if *s == slot))
            .count()
    }

    pub fn last_text(&self, slot: SlotId) -> Option<String> {
        self.renders(slot).pop()
    }
}

impl CellSurface for RecordingSurface {
    fn render(&self, slot: SlotId, text: &str) {
        self.events.borrow_mut().push(SurfaceEvent::Render {
            slot,
            text: text.to_string(),
        });
    }

    fn highlight(&self, slot: SlotId) {
        self.events
            .borrow_mut()
            .push(SurfaceEvent::Highlight { slot });
    }
}
