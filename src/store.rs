//! Reducer-driven state container: [`Store`], [`SubscriberId`].
//!
//! `dispatch` applies a pure transition to the current state and notifies
//! every subscriber synchronously, in registration order. The engine has
//! no coupling to the store beyond this: a subscriber typically builds a
//! fresh description and calls `render` again.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Token returned by [`Store::subscribe`], able to reverse the
    /// subscription.
    pub struct SubscriberId;
}

/// State container with a pure reducer and synchronous subscribers.
pub struct Store<S, A> {
    state: S,
    reducer: Box<dyn Fn(&S, &A) -> S>,
    subscribers: SlotMap<SubscriberId, Box<dyn Fn(&S)>>,
}

impl<S, A> Store<S, A> {
    /// Create a store from an initial state and a reducer.
    pub fn new(initial: S, reducer: impl Fn(&S, &A) -> S + 'static) -> Self {
        Self {
            state: initial,
            reducer: Box::new(reducer),
            subscribers: SlotMap::with_key(),
        }
    }

    /// The current state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Apply `action` through the reducer, then notify every subscriber
    /// with the new state.
    pub fn dispatch(&mut self, action: &A) {
        self.state = (self.reducer)(&self.state, action);
        for subscriber in self.subscribers.values() {
            subscriber(&self.state);
        }
    }

    /// Register a callback run after every dispatch.
    pub fn subscribe(&mut self, callback: impl Fn(&S) + 'static) -> SubscriberId {
        self.subscribers.insert(Box::new(callback))
    }

    /// Reverse a subscription. Returns whether the token was still active.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<S: std::fmt::Debug, A> std::fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
