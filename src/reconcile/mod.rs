//! The reconciliation engine: diff a new [`Desc`](crate::tree::Desc)
//! against the last-rendered one and patch the live tree minimally.
//!
//! Entry point is [`RenderContext::render`]. The context owns the mount
//! registry (mount point -> last-rendered description), the unmount-hook
//! table, and the event [`Dispatcher`](crate::events::Dispatcher); it is an
//! explicit value passed by whoever renders, never ambient global state, so
//! independent mount roots can coexist.

mod children;
mod context;
mod patch;

pub use context::{RenderContext, RenderQueue};

/// Fatal reconciliation failures.
///
/// These indicate a corrupted live tree or a misuse of the API, not a bad
/// description: a render either fully succeeds or returns one of these,
/// and the mount registry is never updated on failure.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The live child count disagrees with the registered description.
    /// The live tree was mutated outside the reconciler.
    #[error("live children out of sync with last-rendered description: expected {expected}, found {found}")]
    ChildArityMismatch {
        /// Children the registered description says should exist.
        expected: usize,
        /// Children actually present in the host tree.
        found: usize,
    },
}
