//! Per-instance notification registry.
//!
//! Each widget owns its own [`Emitter`]; there is no process-wide listener
//! state. Listeners are identified by the [`ListenerId`] returned when they
//! are registered.

use std::collections::HashMap;
use std::fmt;

/// Handle to a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener<A> {
    id: ListenerId,
    once: bool,
    callback: Box<dyn FnMut(&A)>,
}

/// Named-event listener registry carrying payloads of type `A`.
pub struct Emitter<A> {
    callbacks: HashMap<String, Vec<Listener<A>>>,
    next_id: u64,
}

impl<A> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .callbacks
            .iter()
            .map(|(event, listeners)| (event.as_str(), listeners.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("Emitter").field("listeners", &counts).finish()
    }
}

impl<A> Emitter<A> {
    /// Create an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
            next_id: 0,
        }
    }

    fn register(&mut self, event: &str, once: bool, callback: Box<dyn FnMut(&A)>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks
            .entry(event.to_string())
            .or_default()
            .push(Listener { id, once, callback });
        id
    }

    /// Listen on `event`.
    pub fn on(&mut self, event: &str, callback: impl FnMut(&A) + 'static) -> ListenerId {
        self.register(event, false, Box::new(callback))
    }

    /// Listen on `event` for a single emission.
    pub fn once(&mut self, event: &str, callback: impl FnMut(&A) + 'static) -> ListenerId {
        self.register(event, true, Box::new(callback))
    }

    /// Remove one listener from `event`. Returns whether it was registered.
    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(listeners) = self.callbacks.get_mut(event) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        let removed = before != listeners.len();
        if listeners.is_empty() {
            self.callbacks.remove(event);
        }
        removed
    }

    /// Remove every listener for `event`.
    pub fn off_event(&mut self, event: &str) {
        self.callbacks.remove(event);
    }

    /// Remove every listener.
    pub fn off_all(&mut self) {
        self.callbacks.clear();
    }

    /// Call every listener of `event` with `payload`, in registration order.
    ///
    /// One-shot listeners are dropped after running. Returns the number of
    /// listeners called.
    pub fn emit(&mut self, event: &str, payload: &A) -> usize {
        let Some(listeners) = self.callbacks.get_mut(event) else {
            return 0;
        };
        for listener in listeners.iter_mut() {
            (listener.callback)(payload);
        }
        let called = listeners.len();
        listeners.retain(|l| !l.once);
        if listeners.is_empty() {
            self.callbacks.remove(event);
        }
        called
    }

    /// Number of listeners on `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.callbacks.get(event).map_or(0, Vec::len)
    }

    /// Whether `event` has any listener.
    #[must_use]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }
}
