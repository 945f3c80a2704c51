//! Delegated event layer: handler registry and root dispatcher.
//!
//! One physical listener per event type at the host root; interactions are
//! routed to whatever handlers are registered on the origin node and its
//! ancestors at dispatch time.

mod dispatch;
mod registry;

pub use dispatch::{Dispatcher, EventContext};
pub use registry::{HandlerRegistry, HandlerToken, Registration};
