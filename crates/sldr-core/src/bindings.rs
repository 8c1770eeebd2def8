//! Event binding table for one scene node.
//!
//! An [`Events`] value records which handler of its owner should run for a
//! given event type on a node. Handlers are plain values (usually a fieldless
//! enum naming the owner's methods); the owner asks for the handlers that
//! apply to a dispatched event and calls them itself, so no callback ever
//! needs to borrow the owner.
//!
//! Bindings are either direct (any event reaching the node or bubbling up
//! from a descendant) or delegated, which only fire when the event target,
//! or an ancestor below the bound node, matches a selector.

use crate::event::{EventType, UnknownEventType};
use crate::scene::{NodeId, Scene};
use crate::selector::{Selector, SelectorError};
use thiserror::Error;

/// Errors produced by string-based binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// Binding spec was empty
    #[error("empty event binding")]
    Empty,
    /// Event name not recognised
    #[error(transparent)]
    UnknownEvent(#[from] UnknownEventType),
    /// Delegation selector did not parse
    #[error("invalid delegate selector: {0}")]
    Selector(#[from] SelectorError),
}

/// Opaque handle to a single binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u64);

#[derive(Debug, Clone)]
struct Binding<H> {
    id: BindingId,
    event: EventType,
    delegate: Option<Selector>,
    handler: H,
}

/// Bindings of handlers `H` to events on one node.
#[derive(Debug, Clone)]
pub struct Events<H> {
    node: NodeId,
    bindings: Vec<Binding<H>>,
    next_id: u64,
}

impl<H: Copy + PartialEq> Events<H> {
    /// Create an empty binding table for `node`.
    #[must_use]
    pub const fn new(node: NodeId) -> Self {
        Self {
            node,
            bindings: Vec::new(),
            next_id: 0,
        }
    }

    /// Node the bindings are attached to.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Number of live bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no binding is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn push(&mut self, event: EventType, delegate: Option<Selector>, handler: H) -> BindingId {
        let id = BindingId(self.next_id);
        self.next_id += 1;
        tracing::trace!(
            node = self.node.index(),
            event = event.as_str(),
            delegated = delegate.is_some(),
            "bind"
        );
        self.bindings.push(Binding {
            id,
            event,
            delegate,
            handler,
        });
        id
    }

    /// Bind `handler` to `event` on the node.
    pub fn bind(&mut self, event: EventType, handler: H) -> BindingId {
        self.push(event, None, handler)
    }

    /// Bind `handler` to `event` for targets matching `selector` below the node.
    ///
    /// # Errors
    ///
    /// Returns an error if `selector` does not parse.
    pub fn bind_delegate(
        &mut self,
        event: EventType,
        selector: &str,
        handler: H,
    ) -> Result<BindingId, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.push(event, Some(selector), handler))
    }

    /// Bind from an `"event"` or `"event selector"` spec, e.g.
    /// `"mousedown .gauge"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event name is unknown or the selector is
    /// invalid.
    pub fn bind_spec(&mut self, spec: &str, handler: H) -> Result<BindingId, BindError> {
        let spec = spec.trim();
        let (name, selector) = match spec.split_once(char::is_whitespace) {
            Some((name, selector)) => (name, Some(selector.trim())),
            None => (spec, None),
        };
        if name.is_empty() {
            return Err(BindError::Empty);
        }
        let event: EventType = name.parse()?;
        match selector {
            Some(selector) => Ok(self.bind_delegate(event, selector, handler)?),
            None => Ok(self.bind(event, handler)),
        }
    }

    /// Remove one binding. Returns whether it was live.
    pub fn unbind(&mut self, id: BindingId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.id != id);
        before != self.bindings.len()
    }

    /// Remove every binding for `event`.
    pub fn unbind_event(&mut self, event: EventType) {
        self.bindings.retain(|b| b.event != event);
    }

    /// Remove every binding of `handler` to `event`.
    pub fn unbind_handler(&mut self, event: EventType, handler: H) {
        self.bindings
            .retain(|b| b.event != event || b.handler != handler);
    }

    /// Remove every binding.
    pub fn unbind_all(&mut self) {
        if !self.bindings.is_empty() {
            tracing::trace!(node = self.node.index(), count = self.bindings.len(), "unbind all");
        }
        self.bindings.clear();
    }

    /// Handlers to run, in binding order, for `event` dispatched at `target`.
    ///
    /// Nothing applies unless `target` is the bound node or one of its
    /// descendants.
    #[must_use]
    pub fn handlers(&self, scene: &Scene, target: NodeId, event: EventType) -> Vec<H> {
        if !scene.contains_node(self.node, target) {
            return Vec::new();
        }
        self.bindings
            .iter()
            .filter(|b| b.event == event)
            .filter(|b| {
                b.delegate
                    .as_ref()
                    .map_or(true, |selector| self.delegate_hit(scene, selector, target))
            })
            .map(|b| b.handler)
            .collect()
    }

    fn delegate_hit(&self, scene: &Scene, selector: &Selector, target: NodeId) -> bool {
        let mut current = Some(target);
        while let Some(id) = current {
            if id == self.node {
                return false;
            }
            if selector.matches(scene, id) {
                return true;
            }
            current = scene.parent(id);
        }
        false
    }
}
