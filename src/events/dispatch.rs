//! Delegated event dispatch: [`EventContext`], [`Dispatcher`].
//!
//! The dispatcher installs at most one physical listener per event type at
//! the host root. On every observed interaction it walks from the origin
//! node upward through its ancestors, invoking every handler registered at
//! each level. A panicking handler is caught and reported; it never stops
//! the ancestor walk.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::registry::{HandlerRegistry, HandlerToken};
use crate::host::{Host, NodeRef};
use crate::tree::EventHandler;

// ---------------------------------------------------------------------------
// EventContext
// ---------------------------------------------------------------------------

/// Per-dispatch state handed to each handler invocation.
#[derive(Debug)]
pub struct EventContext {
    /// The node the interaction originated at.
    pub target: NodeRef,
    /// The node whose registration is currently firing.
    pub current: NodeRef,
    /// The event type, e.g. `"click"`.
    pub event_type: String,
    stopped: bool,
}

impl EventContext {
    /// Stop the upward walk after the current level finishes.
    /// Remaining handlers at the same level still fire.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Whether propagation has been stopped.
    pub fn propagation_stopped(&self) -> bool {
        self.stopped
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Root-delegated event dispatcher.
///
/// Owns the [`HandlerRegistry`] and the set of event types for which a
/// physical root listener has been installed.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: HandlerRegistry,
    installed: HashSet<String>,
}

impl Dispatcher {
    /// Create a dispatcher with no registrations and no root listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `handler` as active for `(node, event_type)`, installing the
    /// physical root listener for `event_type` if this is the first
    /// registration of that type.
    pub fn register(
        &mut self,
        host: &mut dyn Host,
        node: NodeRef,
        event_type: &str,
        handler: EventHandler,
    ) -> HandlerToken {
        self.ensure_listener(host, event_type);
        self.registry.register(node, event_type, handler)
    }

    /// Reverse a registration made with [`register`](Self::register).
    ///
    /// The physical root listener stays installed; listener installation is
    /// one-way and idempotent.
    pub fn unregister(&mut self, token: HandlerToken) {
        self.registry.unregister(token);
    }

    /// Replace every registration for `(node, event_type)` with `handler`.
    pub fn rebind(
        &mut self,
        host: &mut dyn Host,
        node: NodeRef,
        event_type: &str,
        handler: EventHandler,
    ) -> HandlerToken {
        self.ensure_listener(host, event_type);
        self.registry.rebind(node, event_type, handler)
    }

    /// Remove every registration for `(node, event_type)`.
    pub fn unbind(&mut self, node: NodeRef, event_type: &str) {
        self.registry.unbind(node, event_type);
    }

    /// Remove every registration for `node`. Part of the detach cleanup
    /// contract.
    pub fn remove_node(&mut self, node: NodeRef) {
        self.registry.remove_node(node);
    }

    /// The underlying registration table.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Whether a physical root listener is installed for `event_type`.
    pub fn is_listening(&self, event_type: &str) -> bool {
        self.installed.contains(event_type)
    }

    fn ensure_listener(&mut self, host: &mut dyn Host, event_type: &str) {
        if self.installed.insert(event_type.to_owned()) {
            host.listen(event_type);
        }
    }

    /// Route an observed interaction.
    ///
    /// Walks from `origin` up through its ancestors. At each level, every
    /// handler registered for `event_type` fires in registration order. A
    /// panic in one handler is caught and reported via `tracing::error!`
    /// and does not prevent the remaining handlers (same level or
    /// ancestors) from firing. Returns the number of handler invocations.
    pub fn dispatch(&self, host: &dyn Host, origin: NodeRef, event_type: &str) -> usize {
        let mut ctx = EventContext {
            target: origin,
            current: origin,
            event_type: event_type.to_owned(),
            stopped: false,
        };
        let mut fired = 0;
        let mut cursor = Some(origin);
        while let Some(node) = cursor {
            ctx.current = node;
            for handler in self.registry.handlers_for(node, event_type) {
                let outcome = catch_unwind(AssertUnwindSafe(|| handler.call(&mut ctx)));
                fired += 1;
                if outcome.is_err() {
                    tracing::error!(
                        event_type,
                        node = ?node,
                        "event handler panicked; continuing dispatch walk"
                    );
                }
            }
            if ctx.stopped {
                break;
            }
            cursor = host.parent(node);
        }
        fired
    }
}

// ===========================================================================
// Tests
// ===========================================================================
