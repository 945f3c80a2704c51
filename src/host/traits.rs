//! The [`Host`] trait: the seam between the reconciler and a backend.

use super::{NodeRef, PropValue};

/// Tree primitives a backend must provide.
///
/// The contract mirrors what the patch algorithm actually needs, nothing
/// more: structural mutation, attribute/property mutation, text mutation,
/// and parent/child queries. Implementations are expected to be cheap and
/// infallible for valid handles; passing a stale [`NodeRef`] is a caller
/// bug and may panic in debug builds.
///
/// # Structural semantics
///
/// - `insert_before(parent, node, None)` appends `node` as the last child.
/// - If `node` already has a parent, `insert_before` detaches it first and
///   re-attaches at the new position (move, not copy). The keyed move pass
///   relies on this.
/// - `remove(node)` detaches `node` and drops its whole subtree.
pub trait Host {
    /// Create a detached element node with the given tag.
    fn create_element(&mut self, tag: &str) -> NodeRef;

    /// Create a detached text node with the given payload.
    fn create_text(&mut self, text: &str) -> NodeRef;

    /// Overwrite the payload of a text node in place.
    fn set_text(&mut self, node: NodeRef, text: &str);

    /// Insert `node` as a child of `parent`, before `anchor`
    /// (or at the end when `anchor` is `None`).
    fn insert_before(&mut self, parent: NodeRef, node: NodeRef, anchor: Option<NodeRef>);

    /// Detach `node` from its parent and drop its subtree.
    fn remove(&mut self, node: NodeRef);

    /// Set a string attribute. An empty value is valid (boolean-attribute
    /// presence form).
    fn set_attribute(&mut self, node: NodeRef, name: &str, value: &str);

    /// Remove a string attribute. No-op if absent.
    fn remove_attribute(&mut self, node: NodeRef, name: &str);

    /// Set a live object property (never stringified into an attribute).
    fn set_property(&mut self, node: NodeRef, name: &str, value: PropValue);

    /// Remove a live object property. No-op if absent.
    fn remove_property(&mut self, node: NodeRef, name: &str);

    /// Parent of `node`, if attached.
    fn parent(&self, node: NodeRef) -> Option<NodeRef>;

    /// Ordered children of `node`.
    fn children(&self, node: NodeRef) -> Vec<NodeRef>;

    /// Child of `node` at `index`, if present.
    fn child_at(&self, node: NodeRef, index: usize) -> Option<NodeRef> {
        self.children(node).get(index).copied()
    }

    /// Number of children of `node`.
    fn child_count(&self, node: NodeRef) -> usize {
        self.children(node).len()
    }

    /// Install the single physical listener for `event_type` at the host
    /// root. Called at most once per event type by the dispatcher; hosts
    /// that observe interactions push them back through
    /// [`Dispatcher::dispatch`](crate::events::Dispatcher::dispatch).
    fn listen(&mut self, event_type: &str);
}
