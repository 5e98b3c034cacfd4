//! Reuse-safe binding of visual slots to data items.
//!
//! Each slot is either unbound or bound to exactly one [`DataItem`] through
//! exactly one live subscription. Binding a slot that is already bound first
//! unsubscribes from the previous item, so an item the widget has scrolled away
//! from can never write into a slot that now shows something else.
//!
//! On bind, and on every later write to the bound item, the slot is rendered
//! with the item's value. If the item carries an unconsumed change, the slot is
//! highlighted once and the change is consumed.
//!
//! Slots that are discarded for good must be passed to [`BindingController::release`];
//! dropping the controller releases everything it still holds.

use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::{DataItem, SlotId, SubscriptionId};
use crate::usecases::ports::{CellSurface, CellSurfaceHandle};

struct SlotBinding {
    item: Rc<DataItem>,
    subscription: SubscriptionId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingStats {
    pub binds: u64,
    pub rebinds: u64,
    pub releases: u64,
}

pub struct BindingController {
    surface: CellSurfaceHandle,
    slots: HashMap<SlotId, SlotBinding>,
    stats: BindingStats,
}

impl BindingController {
    pub fn new(surface: CellSurfaceHandle) -> Self {
        Self {
            surface,
            slots: HashMap::new(),
            stats: BindingStats::default(),
        }
    }

    pub fn bind(&mut self, slot: SlotId, item: &Rc<DataItem>) {
        if let Some(previous) = self.slots.remove(&slot) {
            previous.item.unsubscribe(previous.subscription);
            self.stats.rebinds += 1;
        }

        let surface = Rc::clone(&self.surface);
        let subscription = item.subscribe(move |item, change| {
            present(surface.as_ref(), slot, item, &change.value, change.changed);
        });
        self.slots.insert(
            slot,
            SlotBinding {
                item: Rc::clone(item),
                subscription,
            },
        );
        self.stats.binds += 1;

        present(
            self.surface.as_ref(),
            slot,
            item,
            &item.value(),
            item.is_changed(),
        );
    }

    /// Drops the slot's subscription. Returns `false` if the slot was unbound.
    pub fn release(&mut self, slot: SlotId) -> bool {
        match self.slots.remove(&slot) {
            Some(binding) => {
                binding.item.unsubscribe(binding.subscription);
                self.stats.releases += 1;
                true
            }
            None => false,
        }
    }

    /// Releases every slot at or beyond `count`.
    pub fn release_from(&mut self, count: usize) -> usize {
        let stale: Vec<SlotId> = self
            .slots
            .keys()
            .copied()
            .filter(|slot| slot.index() >= count)
            .collect();
        stale.into_iter().filter(|slot| self.release(*slot)).count()
    }

    pub fn release_all(&mut self) -> usize {
        self.release_from(0)
    }

    pub fn bound_item(&self, slot: SlotId) -> Option<&Rc<DataItem>> {
        self.slots.get(&slot).map(|binding| &binding.item)
    }

    pub fn is_bound(&self, slot: SlotId) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn bound_count(&self) -> usize {
        self.slots.len()
    }

    pub fn stats(&self) -> BindingStats {
        self.stats
    }
}

impl Drop for BindingController {
    fn drop(&mut self) {
        self.release_all();
    }
}

fn present(surface: &dyn CellSurface, slot: SlotId, item: &DataItem, value: &str, changed: bool) {
    surface.render(slot, value);
    if changed {
        surface.highlight(slot);
        item.mark_consumed();
    }
}
