//! Tree descriptions: immutable values describing desired UI structure.
//!
//! A [`TreeDescription`] is either a text leaf or an element with a tag, a
//! tagged attribute map, ordered children, and an optional reconciliation
//! [`Key`]. Descriptions are built with [`element`] and [`text`] and never
//! mutated afterwards; each render pass produces a fresh tree.

mod attrs;
mod builder;
mod desc;

pub use attrs::{classify, AttrValue, EventHandler, StyleMap, LIVE_PROPERTY_NAMES};
pub use builder::{element, text, Child, ElementBuilder};
pub use desc::{Desc, Key, TreeDescription, UnmountHook};
