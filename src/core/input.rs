//! Global pointer stream with scoped subscriptions
//!
//! Every mouse press in the terminal is offered to whoever is subscribed at
//! that moment. A subscription is held as a `PointerSubscription` guard and
//! leaves the bus when the guard is dropped, so no listener outlives its
//! owner.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

pub type SubscriptionId = u64;

/// A pointer press at a terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub column: u16,
    pub row: u16,
}

impl PointerEvent {
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: SubscriptionId,
    listeners: BTreeSet<SubscriptionId>,
}

/// Handle to the process-wide pointer stream. Clones share one registry.
#[derive(Debug, Clone, Default)]
pub struct PointerBus {
    registry: Rc<RefCell<Registry>>,
}

impl PointerBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> PointerSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id);
        PointerSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Subscribers that receive the next event, oldest first
    pub fn listeners(&self) -> Vec<SubscriptionId> {
        self.registry.borrow().listeners.iter().copied().collect()
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Registration on a `PointerBus`; unregisters on drop
#[derive(Debug)]
pub struct PointerSubscription {
    id: SubscriptionId,
    registry: Weak<RefCell<Registry>>,
}

impl PointerSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.remove(&self.id);
        }
    }
}
