//! Named-event emitter.
//!
//! Listeners register under an event name and run synchronously, in
//! registration order, each time that name is emitted.  `once` listeners
//! are dropped after their first run.  [`EventEmitter::next`] bridges an
//! emission into a [`Deferred`], the event-side counterpart of
//! [`promisify`](crate::adapter::promisify).
//!
//! ```text
//!   on("new user", l1) ─┐
//!   once("new user", l2)┼──▶ emit("new user", &data) ──▶ l1(&data), l2(&data)
//!   next("new user") ───┘                               deferred ← data.clone()
//! ```

use core::convert::Infallible;
use std::collections::BTreeMap;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::deferred::{self, Deferred};

/// Handle returned by [`EventEmitter::on`] / [`EventEmitter::once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

struct Listener<T> {
    id: ListenerId,
    once: bool,
    callback: Box<dyn FnMut(&T)>,
}

pub struct EventEmitter<T> {
    listeners: BTreeMap<String, Vec<Listener<T>>>,
    next_id: u64,
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Run `callback` on every emission of `event`.
    pub fn on(&mut self, event: &str, callback: impl FnMut(&T) + 'static) -> ListenerId {
        self.register(event, false, Box::new(callback))
    }

    /// Run `callback` on the next emission of `event` only.
    pub fn once(&mut self, event: &str, callback: impl FnMut(&T) + 'static) -> ListenerId {
        self.register(event, true, Box::new(callback))
    }

    /// Remove a listener.  Returns `false` if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        self.listeners.retain(|_, list| {
            let before = list.len();
            list.retain(|l| l.id != id);
            removed |= list.len() != before;
            !list.is_empty()
        });
        removed
    }

    /// Call every listener for `event` with `payload`.  Returns `true` if
    /// at least one listener ran.
    pub fn emit(&mut self, event: &str, payload: &T) -> bool {
        let Some(list) = self.listeners.get_mut(event) else {
            return false;
        };
        for listener in list.iter_mut() {
            (listener.callback)(payload);
        }
        list.retain(|l| !l.once);
        if list.is_empty() {
            self.listeners.remove(event);
        }
        true
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    /// Names with at least one listener, sorted.
    pub fn event_names(&self) -> Vec<&str> {
        self.listeners.keys().map(String::as_str).collect()
    }

    fn register(&mut self, event: &str, once: bool, callback: Box<dyn FnMut(&T)>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push(Listener { id, once, callback });
        id
    }
}

impl<T: Clone + 'static> EventEmitter<T> {
    /// A deferred that settles with the payload of the next emission of
    /// `event`.  Never fails; stays pending if the event never fires.
    pub fn next(&mut self, event: &str) -> Deferred<T, Infallible> {
        let (cb, deferred) = deferred::channel();
        self.once(event, move |payload: &T| {
            cb.succeed(payload.clone());
        });
        deferred
    }
}

impl EventSink for EventEmitter<AppEvent> {
    fn emit(&mut self, event: &AppEvent) {
        EventEmitter::emit(self, event.name(), event);
    }
}
