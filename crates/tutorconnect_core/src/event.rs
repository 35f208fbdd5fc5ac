//! In-process change notification channel.
//!
//! # Responsibility
//! - Broadcast table-change and authentication events to any number of
//!   subscribers within the process.
//! - Decouple writes from observer reaction: events sit in per-subscriber
//!   FIFO mailboxes until the owner drains them.
//!
//! # Invariants
//! - Delivery is FIFO per publisher within one mailbox.
//! - Delivery is at-least-once per live subscription; consumers must
//!   tolerate duplicates even though the store emits once per write.
//! - A dropped [`Subscription`] receives nothing further.
//!
//! The bus is single-threaded by design: the data layer models one
//! cooperative UI thread, so handles are `Rc`, not `Arc`.

use crate::model::profile::TeacherProfile;
use log::debug;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

/// Typed change event. Replaces the original pair of untyped signals
/// (a payload-free "auth changed" ping and a loose `{table, type, data}`
/// table notification) with one tagged enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A record was inserted into `table`.
    Inserted {
        table: String,
        record: TeacherProfile,
    },
    /// A record in `table` was merged with a patch.
    Updated {
        table: String,
        record: TeacherProfile,
    },
    /// Session identity changed (register, login, or logout).
    AuthChanged,
}

impl Event {
    fn kind(&self) -> &'static str {
        match self {
            Self::Inserted { .. } => "inserted",
            Self::Updated { .. } => "updated",
            Self::AuthChanged => "auth_changed",
        }
    }
}

type SubscriberId = u64;

#[derive(Default)]
struct BusInner {
    next_id: SubscriberId,
    mailboxes: BTreeMap<SubscriberId, VecDeque<Event>>,
}

/// Process-wide broadcast channel with per-subscriber mailboxes.
#[derive(Default)]
pub struct EventBus {
    inner: RefCell<BusInner>,
}

impl EventBus {
    /// Creates a bus handle shared between publishers and subscribers.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Registers a new subscriber and returns its mailbox handle.
    ///
    /// The subscription starts empty: events published before `subscribe`
    /// are never delivered to it.
    pub fn subscribe(self: &Rc<Self>) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.mailboxes.insert(id, VecDeque::new());
        Subscription {
            bus: Rc::downgrade(self),
            id,
        }
    }

    /// Clones the event into every live mailbox.
    pub fn publish(&self, event: Event) {
        let mut inner = self.inner.borrow_mut();
        debug!(
            "event=bus_publish module=event kind={} subscribers={}",
            event.kind(),
            inner.mailboxes.len()
        );
        for mailbox in inner.mailboxes.values_mut() {
            mailbox.push_back(event.clone());
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().mailboxes.len()
    }

    fn take_next(&self, id: SubscriberId) -> Option<Event> {
        self.inner
            .borrow_mut()
            .mailboxes
            .get_mut(&id)
            .and_then(VecDeque::pop_front)
    }

    fn drain(&self, id: SubscriberId) -> Vec<Event> {
        self.inner
            .borrow_mut()
            .mailboxes
            .get_mut(&id)
            .map(|mailbox| mailbox.drain(..).collect())
            .unwrap_or_default()
    }

    fn pending(&self, id: SubscriberId) -> usize {
        self.inner
            .borrow()
            .mailboxes
            .get(&id)
            .map_or(0, VecDeque::len)
    }

    fn unsubscribe(&self, id: SubscriberId) {
        self.inner.borrow_mut().mailboxes.remove(&id);
    }
}

/// Subscriber handle owning one mailbox. Dropping it unsubscribes, so a
/// torn-down consumer can never observe further events.
pub struct Subscription {
    bus: Weak<EventBus>,
    id: SubscriberId,
}

impl Subscription {
    /// Pops the oldest undelivered event, if any.
    pub fn try_next(&self) -> Option<Event> {
        self.bus.upgrade()?.take_next(self.id)
    }

    /// Takes every undelivered event in publish order.
    pub fn drain(&self) -> Vec<Event> {
        self.bus
            .upgrade()
            .map(|bus| bus.drain(self.id))
            .unwrap_or_default()
    }

    /// Number of undelivered events.
    pub fn pending(&self) -> usize {
        self.bus.upgrade().map_or(0, |bus| bus.pending(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}
