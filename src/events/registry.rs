//! Handler registration table: [`HandlerToken`], [`HandlerRegistry`].
//!
//! Registrations live in a slotmap keyed by [`HandlerToken`]; a secondary
//! index maps `(node, event type)` to the tokens active there, in
//! registration order. Entries are removed wholesale when a node is
//! permanently detached so no handler reference outlives its node.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use crate::host::NodeRef;
use crate::tree::EventHandler;

new_key_type! {
    /// Token returned by [`HandlerRegistry::register`], able to reverse
    /// the registration.
    pub struct HandlerToken;
}

/// A single active registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The node the handler is attached to.
    pub node: NodeRef,
    /// The event type, e.g. `"click"`.
    pub event_type: String,
    /// The callback.
    pub handler: EventHandler,
}

/// Table of active handler registrations.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    registrations: SlotMap<HandlerToken, Registration>,
    by_node: HashMap<NodeRef, HashMap<String, Vec<HandlerToken>>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `handler` as active for `(node, event_type)`.
    pub fn register(
        &mut self,
        node: NodeRef,
        event_type: impl Into<String>,
        handler: EventHandler,
    ) -> HandlerToken {
        let event_type = event_type.into();
        let token = self.registrations.insert(Registration {
            node,
            event_type: event_type.clone(),
            handler,
        });
        self.by_node
            .entry(node)
            .or_default()
            .entry(event_type)
            .or_default()
            .push(token);
        token
    }

    /// Reverse a registration. Returns the removed record, or `None` if
    /// the token was already spent.
    pub fn unregister(&mut self, token: HandlerToken) -> Option<Registration> {
        let reg = self.registrations.remove(token)?;
        if let Some(events) = self.by_node.get_mut(&reg.node) {
            if let Some(tokens) = events.get_mut(&reg.event_type) {
                tokens.retain(|&t| t != token);
                if tokens.is_empty() {
                    events.remove(&reg.event_type);
                }
            }
            if events.is_empty() {
                self.by_node.remove(&reg.node);
            }
        }
        Some(reg)
    }

    /// Replace every registration for `(node, event_type)` with a single
    /// new one. Used by the attribute diff when a handler value changes.
    pub fn rebind(
        &mut self,
        node: NodeRef,
        event_type: &str,
        handler: EventHandler,
    ) -> HandlerToken {
        self.unbind(node, event_type);
        self.register(node, event_type, handler)
    }

    /// Remove every registration for `(node, event_type)`.
    pub fn unbind(&mut self, node: NodeRef, event_type: &str) {
        let tokens = self
            .by_node
            .get(&node)
            .and_then(|events| events.get(event_type))
            .cloned()
            .unwrap_or_default();
        for token in tokens {
            self.unregister(token);
        }
    }

    /// Remove every registration for `node`, across all event types.
    /// Part of the detach cleanup contract.
    pub fn remove_node(&mut self, node: NodeRef) {
        if let Some(events) = self.by_node.remove(&node) {
            for tokens in events.into_values() {
                for token in tokens {
                    self.registrations.remove(token);
                }
            }
        }
    }

    /// Handlers active for `(node, event_type)`, in registration order.
    pub fn handlers_for(&self, node: NodeRef, event_type: &str) -> Vec<EventHandler> {
        self.by_node
            .get(&node)
            .and_then(|events| events.get(event_type))
            .map(|tokens| {
                tokens
                    .iter()
                    .filter_map(|&t| self.registrations.get(t))
                    .map(|r| r.handler.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of registrations for `(node, event_type)`.
    pub fn active_count(&self, node: NodeRef, event_type: &str) -> usize {
        self.by_node
            .get(&node)
            .and_then(|events| events.get(event_type))
            .map_or(0, Vec::len)
    }

    /// Total number of active registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether no registrations are active.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_node(sm: &mut SlotMap<NodeRef, ()>) -> NodeRef {
        sm.insert(())
    }

    fn noop() -> EventHandler {
        EventHandler::new(|_| {})
    }

    // ── Register / unregister ────────────────────────────────────────

    #[test]
    fn new_registry_is_empty() {
        let reg = HandlerRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn register_and_lookup() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();

        reg.register(node, "click", noop());
        assert_eq!(reg.active_count(node, "click"), 1);
        assert_eq!(reg.handlers_for(node, "click").len(), 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unregister_via_token() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();

        let token = reg.register(node, "click", noop());
        let removed = reg.unregister(token);
        assert!(removed.is_some());
        assert_eq!(removed.unwrap().event_type, "click");
        assert!(reg.is_empty());
        assert_eq!(reg.active_count(node, "click"), 0);
    }

    #[test]
    fn unregister_spent_token_is_none() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();

        let token = reg.register(node, "click", noop());
        reg.unregister(token);
        assert!(reg.unregister(token).is_none());
    }

    #[test]
    fn multiple_handlers_preserve_order() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();

        let h1 = noop();
        let h2 = noop();
        reg.register(node, "click", h1.clone());
        reg.register(node, "click", h2.clone());

        let handlers = reg.handlers_for(node, "click");
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0], h1);
        assert_eq!(handlers[1], h2);
    }

    #[test]
    fn event_types_are_independent() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();

        reg.register(node, "click", noop());
        reg.register(node, "input", noop());
        assert_eq!(reg.active_count(node, "click"), 1);
        assert_eq!(reg.active_count(node, "input"), 1);
        assert!(reg.handlers_for(node, "change").is_empty());
    }

    // ── Rebind ───────────────────────────────────────────────────────

    #[test]
    fn rebind_leaves_exactly_one() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();

        let h1 = noop();
        let h2 = noop();
        reg.register(node, "click", h1);
        reg.rebind(node, "click", h2.clone());

        let handlers = reg.handlers_for(node, "click");
        assert_eq!(handlers.len(), 1);
        assert_eq!(handlers[0], h2);
    }

    #[test]
    fn unbind_clears_one_event_type() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();

        reg.register(node, "click", noop());
        reg.register(node, "input", noop());
        reg.unbind(node, "click");
        assert_eq!(reg.active_count(node, "click"), 0);
        assert_eq!(reg.active_count(node, "input"), 1);
    }

    // ── Node removal ─────────────────────────────────────────────────

    #[test]
    fn remove_node_clears_all_types() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let other = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();

        reg.register(node, "click", noop());
        reg.register(node, "input", noop());
        reg.register(other, "click", noop());

        reg.remove_node(node);
        assert_eq!(reg.active_count(node, "click"), 0);
        assert_eq!(reg.active_count(node, "input"), 0);
        assert_eq!(reg.active_count(other, "click"), 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn remove_unknown_node_is_noop() {
        let mut sm = SlotMap::with_key();
        let node = make_node(&mut sm);
        let mut reg = HandlerRegistry::new();
        reg.remove_node(node);
        assert!(reg.is_empty());
    }
}
