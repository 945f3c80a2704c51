//! Test support: an in-memory mutation-counting host and text snapshots.

mod host;
mod snapshot;

pub use host::{MockContent, MockHost, MockNode, MutationCounts};
pub use snapshot::{mount_to_string, subtree_to_string};
