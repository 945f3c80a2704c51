//! Child reconciliation: keyed (linear, identity-preserving) and
//! positional.
//!
//! Keyed mode is chosen when any child of the union of the old and new
//! sibling groups carries a key. The union matters: a keyed list filtered
//! down to zero new children is still keyed removal, never positional
//! churn.

use std::collections::{HashMap, HashSet};

use super::context::RenderContext;
use super::RenderError;
use crate::host::{Host, NodeRef};
use crate::tree::{Desc, Key};

impl RenderContext {
    /// Reconcile the children of a live element against old and new
    /// sibling groups.
    pub(super) fn reconcile_children(
        &mut self,
        host: &mut dyn Host,
        parent: NodeRef,
        old: &[Desc],
        new: &[Desc],
    ) -> Result<(), RenderError> {
        let keyed = old.iter().chain(new).any(|d| d.key().is_some());
        if keyed {
            self.reconcile_keyed(host, parent, old, new)
        } else {
            self.reconcile_positional(host, parent, old, new)
        }
    }

    /// Index-by-index reconciliation. Simple, but shifting items without
    /// keys causes detach/recreate churn; order-sensitive dynamic lists
    /// are expected to carry keys.
    fn reconcile_positional(
        &mut self,
        host: &mut dyn Host,
        parent: NodeRef,
        old: &[Desc],
        new: &[Desc],
    ) -> Result<(), RenderError> {
        let live = live_children(host, parent, old.len())?;

        let shared = old.len().min(new.len());
        for i in 0..shared {
            self.patch_node(host, parent, live[i], &old[i], &new[i])?;
        }
        // Shrink from the tail.
        for i in (new.len()..old.len()).rev() {
            self.detach(host, live[i]);
        }
        // Grow at the end.
        for desc in &new[old.len()..] {
            let node = self.materialize(host, desc);
            host.insert_before(parent, node, None);
        }
        Ok(())
    }

    /// Keyed reconciliation, linear in the number of children.
    ///
    /// 1. Build the key lookup from the old siblings; the live node for an
    ///    old key is the live child at the same index (sound because a
    ///    successful render leaves the live tree exactly matching the
    ///    registered description).
    /// 2. Walk the new siblings in order, reusing and patching matched
    ///    nodes, materializing the rest.
    /// 3. Detach old children whose key no longer appears (unkeyed old
    ///    children in keyed mode never match).
    /// 4. Walk the processed sequence by position, moving any node not
    ///    already where it belongs.
    fn reconcile_keyed(
        &mut self,
        host: &mut dyn Host,
        parent: NodeRef,
        old: &[Desc],
        new: &[Desc],
    ) -> Result<(), RenderError> {
        let live = live_children(host, parent, old.len())?;

        let mut old_by_key: HashMap<Key, (usize, Desc, NodeRef)> = HashMap::new();
        for (i, desc) in old.iter().enumerate() {
            if let Some(key) = desc.key() {
                if old_by_key.contains_key(key) {
                    tracing::warn!(%key, "duplicate reconciliation key among siblings; first occurrence wins");
                } else {
                    old_by_key.insert(key.clone(), (i, desc.clone(), live[i]));
                }
            }
        }

        let mut seen_new: HashSet<&Key> = HashSet::new();
        for desc in new {
            if let Some(key) = desc.key() {
                if !seen_new.insert(key) {
                    tracing::warn!(%key, "duplicate reconciliation key among siblings; first occurrence wins");
                }
            }
        }

        let mut reused = vec![false; old.len()];
        let mut processed: Vec<NodeRef> = Vec::with_capacity(new.len());
        for desc in new {
            let node = match desc.key().and_then(|key| old_by_key.remove(key)) {
                Some((index, old_desc, live_node)) => {
                    reused[index] = true;
                    self.patch_node(host, parent, live_node, &old_desc, desc)?
                }
                None => self.materialize(host, desc),
            };
            processed.push(node);
        }

        // Keys that vanished, plus unkeyed old children.
        for (i, was_reused) in reused.iter().enumerate() {
            if !was_reused {
                self.detach(host, live[i]);
            }
        }

        // Move pass: only nodes out of position are touched.
        for (position, &node) in processed.iter().enumerate() {
            let occupant = host.child_at(parent, position);
            if occupant != Some(node) {
                host.insert_before(parent, node, occupant);
            }
        }
        Ok(())
    }
}

/// Snapshot the live children, checking they agree with the registered
/// description. Disagreement means the live tree was mutated outside the
/// reconciler, which is fatal.
fn live_children(
    host: &dyn Host,
    parent: NodeRef,
    expected: usize,
) -> Result<Vec<NodeRef>, RenderError> {
    let live = host.children(parent);
    if live.len() != expected {
        return Err(RenderError::ChildArityMismatch {
            expected,
            found: live.len(),
        });
    }
    Ok(live)
}

// ===========================================================================
// Tests
// ===========================================================================
