//! Description types: [`Key`], [`UnmountHook`], [`TreeDescription`], [`Desc`].

use std::collections::BTreeMap;
use std::rc::Rc;

use super::attrs::AttrValue;
use crate::host::NodeRef;

/// Shared, immutable handle to a description node.
///
/// Every render builds a fresh description tree; nodes are never mutated
/// after construction. Keyed reuse treats two `Desc`s as "the same render
/// output" only when they are the same allocation (`Rc::ptr_eq`).
pub type Desc = Rc<TreeDescription>;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Reconciliation key: a sibling-unique identity token that lets the
/// differ match children across renders independent of position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Integer key, typically an external id.
    Int(i64),
    /// String key.
    Str(String),
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// UnmountHook
// ---------------------------------------------------------------------------

/// Teardown callback invoked when the node it was registered on is
/// permanently detached. Receives the live node handle being torn down.
#[derive(Clone)]
pub struct UnmountHook(Rc<dyn Fn(NodeRef)>);

impl UnmountHook {
    /// Wrap a teardown callback.
    pub fn new(f: impl Fn(NodeRef) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback for `node`.
    pub fn call(&self, node: NodeRef) {
        (self.0)(node)
    }
}

impl std::fmt::Debug for UnmountHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnmountHook(<fn>)")
    }
}

// ---------------------------------------------------------------------------
// TreeDescription
// ---------------------------------------------------------------------------

/// An immutable description of desired UI structure for one render pass.
///
/// Either a text leaf or an element with a tag, a tagged attribute map, an
/// ordered child sequence, and an optional reconciliation [`Key`]. Text
/// leaves have no children and no attributes.
#[derive(Debug)]
pub enum TreeDescription {
    /// A text leaf.
    Text(String),
    /// An element node.
    Element {
        /// Tag name, e.g. `"div"`.
        tag: String,
        /// Optional reconciliation key, unique among siblings.
        key: Option<Key>,
        /// Attribute name -> tagged value. Ordered for deterministic diffs.
        attrs: BTreeMap<String, AttrValue>,
        /// Ordered children.
        children: Vec<Desc>,
        /// Optional teardown hook, run when the live node is detached.
        unmount: Option<UnmountHook>,
    },
}

impl TreeDescription {
    /// The reconciliation key, if this is a keyed element.
    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::Text(_) => None,
            Self::Element { key, .. } => key.as_ref(),
        }
    }

    /// The tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Element { tag, .. } => Some(tag),
        }
    }

    /// Whether this is a text leaf.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Children of this node. Empty for text leaves.
    pub fn children(&self) -> &[Desc] {
        match self {
            Self::Text(_) => &[],
            Self::Element { children, .. } => children,
        }
    }

    /// Whether `other` would replace this node rather than update it in
    /// place: differing leaf/element kind, differing tag, or differing key.
    pub fn replaced_by(&self, other: &TreeDescription) -> bool {
        match (self, other) {
            (Self::Text(_), Self::Text(_)) => false,
            (
                Self::Element { tag: t1, key: k1, .. },
                Self::Element { tag: t2, key: k2, .. },
            ) => t1 != t2 || k1 != k2,
            _ => true,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
