//! [`MockHost`]: an in-memory host tree with mutation counters.
//!
//! All nodes live in a single `SlotMap`; parent/child relationships are
//! stored in secondary maps so removal is O(subtree size) and lookup is
//! O(1). Every [`Host`] call that mutates the tree bumps a counter, so
//! tests can assert exactly how much work a render performed.

use std::collections::{BTreeMap, HashMap, VecDeque};

use slotmap::{SecondaryMap, SlotMap};

use crate::host::{Host, NodeRef, PropValue};

// ---------------------------------------------------------------------------
// MockNode
// ---------------------------------------------------------------------------

/// Content of a mock node: an element with a tag, or a text leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum MockContent {
    /// An element node.
    Element(String),
    /// A text node.
    Text(String),
}

/// A single node in the mock tree.
#[derive(Debug, Clone)]
pub struct MockNode {
    /// Element tag or text payload.
    pub content: MockContent,
    /// String attributes.
    pub attributes: BTreeMap<String, String>,
    /// Live object properties.
    pub properties: BTreeMap<String, PropValue>,
}

// ---------------------------------------------------------------------------
// MutationCounts
// ---------------------------------------------------------------------------

/// Counters for every mutating [`Host`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationCounts {
    /// Nodes created (elements + text).
    pub created: usize,
    /// `insert_before` calls (insertions and moves).
    pub inserted: usize,
    /// `remove` calls.
    pub removed: usize,
    /// `set_text` calls.
    pub text_sets: usize,
    /// `set_attribute` calls.
    pub attr_sets: usize,
    /// `remove_attribute` calls that removed something.
    pub attr_removes: usize,
    /// `set_property` calls.
    pub prop_sets: usize,
    /// `remove_property` calls that removed something.
    pub prop_removes: usize,
}

impl MutationCounts {
    /// Sum of all structural counters (create/insert/remove).
    pub fn structural(&self) -> usize {
        self.created + self.inserted + self.removed
    }

    /// Sum of every counter.
    pub fn total(&self) -> usize {
        self.structural()
            + self.text_sets
            + self.attr_sets
            + self.attr_removes
            + self.prop_sets
            + self.prop_removes
    }
}

// ---------------------------------------------------------------------------
// MockHost
// ---------------------------------------------------------------------------

/// In-memory [`Host`] implementation for tests.
pub struct MockHost {
    nodes: SlotMap<NodeRef, MockNode>,
    children: SecondaryMap<NodeRef, Vec<NodeRef>>,
    parent: SecondaryMap<NodeRef, NodeRef>,
    listeners: HashMap<String, usize>,
    counts: MutationCounts,
}

impl MockHost {
    /// Create an empty mock host.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            listeners: HashMap::new(),
            counts: MutationCounts::default(),
        }
    }

    /// Create a detached element to serve as a mount point.
    ///
    /// Convenience over [`Host::create_element`] that does not bump the
    /// creation counter, so tests measuring a render start from zero.
    pub fn mount_point(&mut self) -> NodeRef {
        let id = self.alloc(MockContent::Element("#mount".to_owned()));
        self.counts.created -= 1;
        id
    }

    fn alloc(&mut self, content: MockContent) -> NodeRef {
        let id = self.nodes.insert(MockNode {
            content,
            attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
        });
        self.children.insert(id, Vec::new());
        self.counts.created += 1;
        id
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Whether a node with this handle exists.
    pub fn contains(&self, node: NodeRef) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node's data, if it exists.
    pub fn get(&self, node: NodeRef) -> Option<&MockNode> {
        self.nodes.get(node)
    }

    /// The element tag, if this is an element.
    pub fn tag(&self, node: NodeRef) -> Option<&str> {
        match &self.nodes.get(node)?.content {
            MockContent::Element(tag) => Some(tag),
            MockContent::Text(_) => None,
        }
    }

    /// The text payload, if this is a text node.
    pub fn text_of(&self, node: NodeRef) -> Option<&str> {
        match &self.nodes.get(node)?.content {
            MockContent::Text(payload) => Some(payload),
            MockContent::Element(_) => None,
        }
    }

    /// A string attribute's current value.
    pub fn attribute(&self, node: NodeRef, name: &str) -> Option<&str> {
        self.nodes
            .get(node)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    /// A live property's current value.
    pub fn property(&self, node: NodeRef, name: &str) -> Option<&PropValue> {
        self.nodes.get(node)?.properties.get(name)
    }

    /// How many physical listeners are installed for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).copied().unwrap_or(0)
    }

    /// The mutation counters accumulated so far.
    pub fn counts(&self) -> MutationCounts {
        self.counts
    }

    /// Reset all mutation counters to zero.
    pub fn reset_counts(&mut self) {
        self.counts = MutationCounts::default();
    }

    fn detach(&mut self, node: NodeRef) {
        if let Some(parent_id) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != node);
            }
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MockHost {
    fn create_element(&mut self, tag: &str) -> NodeRef {
        self.alloc(MockContent::Element(tag.to_owned()))
    }

    fn create_text(&mut self, text: &str) -> NodeRef {
        self.alloc(MockContent::Text(text.to_owned()))
    }

    fn set_text(&mut self, node: NodeRef, text: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            debug_assert!(
                matches!(data.content, MockContent::Text(_)),
                "set_text on an element node"
            );
            data.content = MockContent::Text(text.to_owned());
            self.counts.text_sets += 1;
        }
    }

    fn insert_before(&mut self, parent: NodeRef, node: NodeRef, anchor: Option<NodeRef>) {
        debug_assert!(self.nodes.contains_key(parent), "parent does not exist");
        debug_assert!(self.nodes.contains_key(node), "node does not exist");
        self.detach(node);
        self.parent.insert(node, parent);
        let siblings = self
            .children
            .get_mut(parent)
            .expect("parent must have a children vec");
        match anchor.and_then(|a| siblings.iter().position(|&c| c == a)) {
            Some(index) => siblings.insert(index, node),
            None => siblings.push(node),
        }
        self.counts.inserted += 1;
    }

    fn remove(&mut self, node: NodeRef) {
        if !self.nodes.contains_key(node) {
            return;
        }
        self.detach(node);

        // Drop the whole subtree, BFS.
        let mut queue = VecDeque::new();
        queue.push_back(node);
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parent.remove(current);
            self.nodes.remove(current);
        }
        self.counts.removed += 1;
    }

    fn set_attribute(&mut self, node: NodeRef, name: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.attributes.insert(name.to_owned(), value.to_owned());
            self.counts.attr_sets += 1;
        }
    }

    fn remove_attribute(&mut self, node: NodeRef, name: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            if data.attributes.remove(name).is_some() {
                self.counts.attr_removes += 1;
            }
        }
    }

    fn set_property(&mut self, node: NodeRef, name: &str, value: PropValue) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.properties.insert(name.to_owned(), value);
            self.counts.prop_sets += 1;
        }
    }

    fn remove_property(&mut self, node: NodeRef, name: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            if data.properties.remove(name).is_some() {
                self.counts.prop_removes += 1;
            }
        }
    }

    fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.parent.get(node).copied()
    }

    fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        self.children.get(node).cloned().unwrap_or_default()
    }

    fn listen(&mut self, event_type: &str) {
        *self.listeners.entry(event_type.to_owned()).or_insert(0) += 1;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
