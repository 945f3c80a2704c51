//! Host tree abstraction: [`NodeRef`], [`PropValue`], and the [`Host`] trait.
//!
//! The reconciler never talks to a concrete UI backend. It drives a [`Host`],
//! which exposes the minimal set of tree primitives the patch algorithm
//! needs: create, insert, remove, and attribute/property mutation, plus the
//! parent/child queries the event dispatcher uses to walk ancestor chains.

mod traits;

pub use traits::Host;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a live node in the host tree. Copy, lightweight (u64).
    ///
    /// The reconciler owns the id space: hosts allocate an entry keyed by
    /// `NodeRef` for every node they create and resolve handles back to
    /// their internal node representation on every call.
    pub struct NodeRef;
}

/// A value set as a live object property rather than a string attribute.
///
/// Form-control state (`checked`, `value`, `selected`) diverges from the
/// attribute namespace in real hosts, so these are always routed here.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// A boolean property, e.g. `checked`.
    Bool(bool),
    /// A textual property, e.g. `value`.
    Text(String),
    /// A numeric property.
    Number(f64),
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}
