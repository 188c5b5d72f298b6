//! Gadget events and observer delivery.
//!
//! Interaction raises typed events tagged with the source gadget. Events
//! are queued during dispatch and delivered at the end of the interaction
//! cycle, so observer callbacks never run while the tree is mid-mutation.
//! Observers subscribe per (gadget, kind) pair.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::gadget::GadgetId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Release,
    Drag,
    Scroll,
    Resize,
    Move,
    ValueChange,
    Focus,
    Blur,
    Close,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventPayload {
    None,
    /// Pointer position in screen coordinates.
    Point { x: i16, y: i16 },
    /// Applied displacement.
    Delta { dx: i16, dy: i16 },
    Size { width: u16, height: u16 },
    Value(i32),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GadgetEvent {
    pub source: GadgetId,
    pub kind: EventKind,
    pub payload: EventPayload,
}

impl GadgetEvent {
    pub fn new(source: GadgetId, kind: EventKind, payload: EventPayload) -> Self {
        Self { source, kind, payload }
    }
}

pub type Observer = Box<dyn FnMut(&GadgetEvent)>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ObserverId(usize);

struct Entry {
    gadget: GadgetId,
    kind: EventKind,
    callback: Observer,
}

/// Observer callbacks keyed by (gadget, kind). Slots are tombstoned on
/// unsubscribe so `ObserverId`s stay stable.
#[derive(Default)]
pub struct ObserverRegistry {
    entries: Vec<Option<Entry>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn subscribe(&mut self, gadget: GadgetId, kind: EventKind, callback: Observer) -> ObserverId {
        let entry = Entry { gadget, kind, callback };
        for (i, slot) in self.entries.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(entry);
                return ObserverId(i);
            }
        }
        self.entries.push(Some(entry));
        ObserverId(self.entries.len() - 1)
    }

    /// Returns false when the id was already unsubscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        match self.entries.get_mut(id.0) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Drop every subscription attached to a gadget. Used when the gadget
    /// is swept out of the tree.
    pub fn forget_gadget(&mut self, gadget: GadgetId) {
        for slot in &mut self.entries {
            if matches!(slot, Some(e) if e.gadget == gadget) {
                *slot = None;
            }
        }
    }

    pub fn deliver(&mut self, event: &GadgetEvent) {
        for slot in self.entries.iter_mut().flatten() {
            if slot.gadget == event.source && slot.kind == event.kind {
                (slot.callback)(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn delivery_filters_by_gadget_and_kind() {
        let mut reg = ObserverRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        reg.subscribe(3, EventKind::Click, Box::new(move |_| h.set(h.get() + 1)));

        reg.deliver(&GadgetEvent::new(3, EventKind::Click, EventPayload::None));
        reg.deliver(&GadgetEvent::new(3, EventKind::Close, EventPayload::None));
        reg.deliver(&GadgetEvent::new(4, EventKind::Click, EventPayload::None));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery_and_is_idempotent() {
        let mut reg = ObserverRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = reg.subscribe(1, EventKind::Scroll, Box::new(move |_| h.set(h.get() + 1)));

        assert!(reg.unsubscribe(id));
        assert!(!reg.unsubscribe(id));
        reg.deliver(&GadgetEvent::new(1, EventKind::Scroll, EventPayload::None));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn forget_gadget_drops_all_its_subscriptions() {
        let mut reg = ObserverRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let (a, b) = (hits.clone(), hits.clone());
        reg.subscribe(7, EventKind::Click, Box::new(move |_| a.set(a.get() + 1)));
        reg.subscribe(7, EventKind::Close, Box::new(move |_| b.set(b.get() + 1)));

        reg.forget_gadget(7);
        reg.deliver(&GadgetEvent::new(7, EventKind::Click, EventPayload::None));
        reg.deliver(&GadgetEvent::new(7, EventKind::Close, EventPayload::None));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn tombstoned_slots_are_reused() {
        let mut reg = ObserverRegistry::new();
        let first = reg.subscribe(1, EventKind::Click, Box::new(|_| {}));
        reg.unsubscribe(first);
        let second = reg.subscribe(2, EventKind::Click, Box::new(|_| {}));
        assert_eq!(first, second);
    }
}
