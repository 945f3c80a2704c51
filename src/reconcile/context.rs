//! [`RenderContext`]: mount registry, hook table, render entry point.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use super::RenderError;
use crate::events::Dispatcher;
use crate::host::{Host, NodeRef};
use crate::tree::{Desc, UnmountHook};

// ---------------------------------------------------------------------------
// RenderQueue
// ---------------------------------------------------------------------------

/// Clone-able handle for requesting a render from inside a handler or
/// unmount hook.
///
/// Rendering is synchronous and takes the context by `&mut`, so a nested
/// render cannot run while one is in progress. Code that wants one pushes
/// here instead; [`RenderContext::render`] drains the queue after the
/// top-level pass completes.
#[derive(Clone, Default)]
pub struct RenderQueue {
    pending: Rc<RefCell<VecDeque<(Desc, NodeRef)>>>,
}

impl RenderQueue {
    /// Request that `desc` be rendered into `mount` once the current
    /// render completes.
    pub fn push(&self, desc: Desc, mount: NodeRef) {
        self.pending.borrow_mut().push_back((desc, mount));
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether no requests are queued.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    fn pop(&self) -> Option<(Desc, NodeRef)> {
        self.pending.borrow_mut().pop_front()
    }
}

impl std::fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderQueue")
            .field("pending", &self.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

/// Everything a sequence of renders needs to carry between calls.
///
/// Owned by the caller and passed explicitly to [`render`](Self::render).
/// Holds the mount registry (mount point -> last-rendered description),
/// the unmount-hook table for live nodes, the event dispatcher, and the
/// nested-render queue.
#[derive(Debug, Default)]
pub struct RenderContext {
    registry: HashMap<NodeRef, Desc>,
    pub(super) events: Dispatcher,
    pub(super) hooks: HashMap<NodeRef, UnmountHook>,
    queue: RenderQueue,
}

impl RenderContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `desc` into `mount`.
    ///
    /// On first render to a mount point, any existing content is replaced
    /// and the description is materialized in full. On later renders the
    /// live tree is patched against the registered previous description,
    /// reusing nodes wherever identity can be established.
    ///
    /// Runs to completion before returning; render requests queued during
    /// the pass (see [`queue`](Self::queue)) are drained afterwards, in
    /// order. The registry is only updated for a mount whose pass fully
    /// succeeded.
    pub fn render(
        &mut self,
        host: &mut dyn Host,
        desc: Desc,
        mount: NodeRef,
    ) -> Result<(), RenderError> {
        self.render_one(host, desc, mount)?;
        while let Some((queued_desc, queued_mount)) = self.queue.pop() {
            self.render_one(host, queued_desc, queued_mount)?;
        }
        Ok(())
    }

    fn render_one(
        &mut self,
        host: &mut dyn Host,
        desc: Desc,
        mount: NodeRef,
    ) -> Result<(), RenderError> {
        let previous = self.registry.get(&mount).cloned();
        tracing::trace!(?mount, first_render = previous.is_none(), "render pass");
        match previous {
            None => {
                // First render: replace whatever content the mount holds.
                for stray in host.children(mount) {
                    host.remove(stray);
                }
                let node = self.materialize(host, &desc);
                host.insert_before(mount, node, None);
            }
            Some(old) => {
                let live = host.children(mount);
                if live.len() != 1 {
                    return Err(RenderError::ChildArityMismatch {
                        expected: 1,
                        found: live.len(),
                    });
                }
                self.patch_node(host, mount, live[0], &old, &desc)?;
            }
        }
        self.registry.insert(mount, desc);
        Ok(())
    }

    /// Apply every queued render request without starting a new pass.
    ///
    /// Useful when something outside a render (a store subscriber, an
    /// event handler) has pushed to the [`queue`](Self::queue).
    pub fn flush(&mut self, host: &mut dyn Host) -> Result<(), RenderError> {
        while let Some((desc, mount)) = self.queue.pop() {
            self.render_one(host, desc, mount)?;
        }
        Ok(())
    }

    /// Tear down a mount point: detach and clean up its live content and
    /// forget its registry entry. Returns whether the mount was known.
    pub fn unmount(&mut self, host: &mut dyn Host, mount: NodeRef) -> bool {
        if self.registry.remove(&mount).is_none() {
            return false;
        }
        for child in host.children(mount) {
            self.detach(host, child);
        }
        true
    }

    /// The last-rendered description for `mount`, if any.
    pub fn last_rendered(&self, mount: NodeRef) -> Option<Desc> {
        self.registry.get(&mount).cloned()
    }

    /// Whether `mount` has a registered render.
    pub fn is_mounted(&self, mount: NodeRef) -> bool {
        self.registry.contains_key(&mount)
    }

    /// The event dispatcher, for routing observed interactions.
    pub fn events(&self) -> &Dispatcher {
        &self.events
    }

    /// A handle for queueing renders from handlers and hooks.
    pub fn queue(&self) -> RenderQueue {
        self.queue.clone()
    }

    /// Permanently detach a live node: run the cleanup contract for its
    /// subtree, then remove it from the host.
    pub(super) fn detach(&mut self, host: &mut dyn Host, node: NodeRef) {
        self.cleanup_subtree(host, node);
        host.remove(node);
    }

    /// Cleanup contract, children first: descendants are cleaned before
    /// their parent, so teardown mirrors construction order. For each node:
    /// run its unmount hook, then drop its handler registrations.
    fn cleanup_subtree(&mut self, host: &mut dyn Host, node: NodeRef) {
        for child in host.children(node) {
            self.cleanup_subtree(host, child);
        }
        if let Some(hook) = self.hooks.remove(&node) {
            hook.call(node);
        }
        self.events.remove_node(node);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
