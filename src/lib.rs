//! # reweave
//!
//! A host-agnostic virtual tree reconciler: describe the UI you want as an
//! immutable tree, render it into a mount point, and the engine patches
//! the live tree with the minimal set of mutations — reusing live nodes
//! across renders by position or by reconciliation key, and routing
//! interactions through a single delegated listener per event type.
//!
//! ## Core Systems
//!
//! - **[`tree`]** — Immutable tree descriptions: builders, tagged
//!   attribute model, reconciliation keys
//! - **[`host`]** — The `Host` trait: the minimal mutable-tree primitives
//!   a backend must provide
//! - **[`reconcile`]** — Diff/patch engine with keyed and positional child
//!   reconciliation, explicit mount registry, cleanup contract
//! - **[`events`]** — Token-based handler registry and root-delegated
//!   dispatch with ancestor bubbling
//! - **[`store`]** — Reducer-driven state container with synchronous
//!   subscriber notification
//! - **[`router`]** — Path-pattern matching with `:param` captures and
//!   query parsing
//! - **[`testing`]** — Mutation-counting in-memory host and text snapshots
//!
//! ## Example
//!
//! ```
//! use reweave::reconcile::RenderContext;
//! use reweave::testing::MockHost;
//! use reweave::tree::element;
//!
//! let mut host = MockHost::new();
//! let mut ctx = RenderContext::new();
//! let mount = host.mount_point();
//!
//! let list = element("ul")
//!     .children([1i64, 2, 3].map(|id| {
//!         element("li").key(id).child(format!("item {id}")).build()
//!     }))
//!     .build();
//! ctx.render(&mut host, list, mount).unwrap();
//! ```

// Foundation
pub mod host;
pub mod tree;

// Engine
pub mod events;
pub mod reconcile;

// Collaborators
pub mod router;
pub mod store;

// Test support
pub mod testing;
