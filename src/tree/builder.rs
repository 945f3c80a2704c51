//! Description builders: [`text`], [`element`], [`ElementBuilder`], [`Child`].
//!
//! Pure construction, no side effects. Children accept nested sequences
//! (flattened level by level), `None` and `false` (dropped), and strings
//! and numbers (coerced to text leaves), so conditional and list-shaped
//! render code needs no special syntax.

use std::collections::BTreeMap;
use std::rc::Rc;

use super::attrs::{classify, AttrValue, EventHandler, StyleMap};
use super::desc::{Desc, Key, TreeDescription, UnmountHook};
use crate::events::EventContext;

/// Build a text leaf.
pub fn text(payload: impl Into<String>) -> Desc {
    Rc::new(TreeDescription::Text(payload.into()))
}

/// Start building an element with the given tag.
pub fn element(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder {
        tag: tag.into(),
        key: None,
        attrs: BTreeMap::new(),
        children: Vec::new(),
        unmount: None,
    }
}

// ---------------------------------------------------------------------------
// Child
// ---------------------------------------------------------------------------

/// Anything accepted as a child argument.
///
/// `Nothing` renders nothing; `Many` is flattened one level at a time until
/// a flat sequence of descriptions remains.
pub enum Child {
    /// An already-built description.
    Node(Desc),
    /// Coerced to a text leaf.
    Text(String),
    /// A nested sequence, flattened recursively.
    Many(Vec<Child>),
    /// Dropped (conditional inclusion).
    Nothing,
}

impl Child {
    fn flatten_into(self, out: &mut Vec<Desc>) {
        match self {
            Self::Node(d) => out.push(d),
            Self::Text(s) => out.push(text(s)),
            Self::Many(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            Self::Nothing => {}
        }
    }
}

impl From<Desc> for Child {
    fn from(d: Desc) -> Self {
        Self::Node(d)
    }
}

impl From<ElementBuilder> for Child {
    fn from(b: ElementBuilder) -> Self {
        Self::Node(b.build())
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Child {
    fn from(v: i64) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<i32> for Child {
    fn from(v: i32) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<f64> for Child {
    fn from(v: f64) -> Self {
        Self::Text(v.to_string())
    }
}

/// `false` renders nothing; `true` is coerced like other primitives.
impl From<bool> for Child {
    fn from(v: bool) -> Self {
        if v {
            Self::Text("true".to_owned())
        } else {
            Self::Nothing
        }
    }
}

/// `None` renders nothing.
impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Self::Nothing,
        }
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// ElementBuilder
// ---------------------------------------------------------------------------

/// Builder for element descriptions.
pub struct ElementBuilder {
    tag: String,
    key: Option<Key>,
    attrs: BTreeMap<String, AttrValue>,
    children: Vec<Desc>,
    unmount: Option<UnmountHook>,
}

impl ElementBuilder {
    /// Set the reconciliation key (builder).
    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set an attribute, routed through the fixed classification table
    /// (builder). Replaces any previous value under the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let name = name.into();
        let value = classify(&name, value.into());
        self.attrs.insert(name, value);
        self
    }

    /// Set the class list (builder).
    pub fn class(mut self, classes: impl Into<String>) -> Self {
        self.attrs
            .insert("class".to_owned(), AttrValue::ClassName(classes.into()));
        self
    }

    /// Add one inline style declaration (builder).
    pub fn style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match self
            .attrs
            .entry("style".to_owned())
            .or_insert_with(|| AttrValue::Style(StyleMap::new()))
        {
            AttrValue::Style(map) => {
                map.insert(name.into(), value.into());
            }
            other => {
                let mut map = StyleMap::new();
                map.insert(name.into(), value.into());
                *other = AttrValue::Style(map);
            }
        }
        self
    }

    /// Register an event handler for `event_type` (builder).
    pub fn on(
        mut self,
        event_type: impl Into<String>,
        handler: impl Fn(&mut EventContext) + 'static,
    ) -> Self {
        self.attrs.insert(
            event_type.into(),
            AttrValue::Handler(EventHandler::new(handler)),
        );
        self
    }

    /// Register a teardown hook, run when the live node is permanently
    /// detached (builder).
    pub fn on_unmount(mut self, hook: impl Fn(crate::host::NodeRef) + 'static) -> Self {
        self.unmount = Some(UnmountHook::new(hook));
        self
    }

    /// Append a single child (builder). `None`, `false`, and nested
    /// sequences behave as documented on [`Child`].
    pub fn child(mut self, child: impl Into<Child>) -> Self {
        child.into().flatten_into(&mut self.children);
        self
    }

    /// Append a sequence of children (builder).
    pub fn children(mut self, items: impl IntoIterator<Item = impl Into<Child>>) -> Self {
        for item in items {
            item.into().flatten_into(&mut self.children);
        }
        self
    }

    /// Finish, producing a shared description.
    pub fn build(self) -> Desc {
        Rc::new(self.build_raw())
    }

    /// Finish, producing an owned description (mostly for tests).
    pub fn build_raw(self) -> TreeDescription {
        TreeDescription::Element {
            tag: self.tag,
            key: self.key,
            attrs: self.attrs,
            children: self.children,
            unmount: self.unmount,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PropValue;

    #[test]
    fn text_builds_leaf() {
        let t = text("hello");
        assert!(t.is_text());
        match &*t {
            TreeDescription::Text(s) => assert_eq!(s, "hello"),
            _ => panic!("expected text leaf"),
        }
    }

    #[test]
    fn element_with_tag_and_key() {
        let e = element("li").key(4).build();
        assert_eq!(e.tag(), Some("li"));
        assert_eq!(e.key(), Some(&Key::Int(4)));
    }

    #[test]
    fn string_children_coerce_to_text() {
        let e = element("p").child("hi").build();
        assert_eq!(e.children().len(), 1);
        assert!(e.children()[0].is_text());
    }

    #[test]
    fn numeric_children_coerce_to_text() {
        let e = element("p").child(42i64).child(1.5f64).build();
        match &*e.children()[0] {
            TreeDescription::Text(s) => assert_eq!(s, "42"),
            _ => panic!("expected text"),
        }
        match &*e.children()[1] {
            TreeDescription::Text(s) => assert_eq!(s, "1.5"),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn none_and_false_children_are_dropped() {
        let e = element("div")
            .child(Option::<&str>::None)
            .child(false)
            .child("kept")
            .build();
        assert_eq!(e.children().len(), 1);
    }

    #[test]
    fn true_child_coerces_to_text() {
        let e = element("div").child(true).build();
        match &*e.children()[0] {
            TreeDescription::Text(s) => assert_eq!(s, "true"),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn nested_sequences_are_flattened() {
        let inner: Vec<Child> = vec!["a".into(), vec!["b", "c"].into()];
        let e = element("ul").child(Child::Many(inner)).child("d").build();
        assert_eq!(e.children().len(), 4);
    }

    #[test]
    fn vec_of_builders_flattens() {
        let rows: Vec<ElementBuilder> = vec![element("li"), element("li")];
        let e = element("ul").child(rows).build();
        assert_eq!(e.children().len(), 2);
    }

    #[test]
    fn children_iterator() {
        let e = element("ul")
            .children((0..3).map(|i| element("li").key(i).build()))
            .build();
        assert_eq!(e.children().len(), 3);
    }

    #[test]
    fn attr_routes_through_classification() {
        let e = element("input").attr("checked", true).build();
        match &*e {
            TreeDescription::Element { attrs, .. } => {
                assert_eq!(
                    attrs.get("checked"),
                    Some(&AttrValue::Property(PropValue::Bool(true)))
                );
            }
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn attr_generic_stays_attribute() {
        let e = element("a").attr("href", "/home").build();
        match &*e {
            TreeDescription::Element { attrs, .. } => {
                assert_eq!(
                    attrs.get("href"),
                    Some(&AttrValue::Attribute("/home".into()))
                );
            }
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn class_and_style_builders() {
        let e = element("div").class("done big").style("color", "red").build();
        match &*e {
            TreeDescription::Element { attrs, .. } => {
                assert_eq!(
                    attrs.get("class"),
                    Some(&AttrValue::ClassName("done big".into()))
                );
                match attrs.get("style") {
                    Some(AttrValue::Style(map)) => {
                        assert_eq!(map.get("color").map(String::as_str), Some("red"));
                    }
                    other => panic!("expected style map, got {other:?}"),
                }
            }
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn style_accumulates_declarations() {
        let e = element("div")
            .style("color", "red")
            .style("width", "10px")
            .build();
        match &*e {
            TreeDescription::Element { attrs, .. } => match attrs.get("style") {
                Some(AttrValue::Style(map)) => assert_eq!(map.len(), 2),
                other => panic!("expected style map, got {other:?}"),
            },
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn on_registers_handler_attr() {
        let e = element("button").on("click", |_| {}).build();
        match &*e {
            TreeDescription::Element { attrs, .. } => {
                assert!(matches!(attrs.get("click"), Some(AttrValue::Handler(_))));
            }
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn attr_replaces_previous_value() {
        let e = element("a").attr("href", "/a").attr("href", "/b").build();
        match &*e {
            TreeDescription::Element { attrs, .. } => {
                assert_eq!(attrs.get("href"), Some(&AttrValue::Attribute("/b".into())));
            }
            _ => panic!("expected element"),
        }
    }
}
