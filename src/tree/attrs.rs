//! Tagged attribute model: [`AttrValue`], [`EventHandler`], [`StyleMap`].
//!
//! Every attribute carries its kind as data, decided when the description
//! is built. The patch logic is then a total match over a closed enum
//! instead of a chain of name-sniffing heuristics.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::events::EventContext;
use crate::host::PropValue;

/// Names that always route to a live object property, never a string
/// attribute. Form-control state rendered by real hosts diverges from the
/// attribute namespace for exactly these.
pub const LIVE_PROPERTY_NAMES: &[&str] = &["checked", "value", "selected"];

/// Inline style declarations. Ordered so equality and iteration are
/// deterministic.
pub type StyleMap = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// EventHandler
// ---------------------------------------------------------------------------

/// A shared event callback. Two handlers are equal only if they are the
/// same allocation; the attribute diff uses this to decide whether to
/// rebind.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&mut EventContext)>);

impl EventHandler {
    /// Wrap a callback.
    pub fn new(f: impl Fn(&mut EventContext) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, ctx: &mut EventContext) {
        (self.0)(ctx)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventHandler(<fn>)")
    }
}

// ---------------------------------------------------------------------------
// AttrValue
// ---------------------------------------------------------------------------

/// The closed set of attribute kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// The element's class list, applied as the `class` attribute.
    ClassName(String),
    /// Inline style declarations, applied as the `style` attribute.
    Style(StyleMap),
    /// An event callback; the attribute name is the event type.
    Handler(EventHandler),
    /// A boolean attribute, expressed by presence/absence.
    Flag(bool),
    /// A live object property, set on the node object itself.
    Property(PropValue),
    /// A plain string attribute.
    Attribute(String),
}

/// Classify a loosely-typed attribute into its tagged kind.
///
/// This is the fixed classification table behind the builder's generic
/// `attr()`: the names in [`LIVE_PROPERTY_NAMES`] always become
/// [`AttrValue::Property`]; everything else keeps the kind it arrived
/// with. The table is consulted once, at construction time.
pub fn classify(name: &str, value: AttrValue) -> AttrValue {
    if LIVE_PROPERTY_NAMES.contains(&name) {
        match value {
            AttrValue::Attribute(s) => AttrValue::Property(PropValue::Text(s)),
            AttrValue::Flag(b) => AttrValue::Property(PropValue::Bool(b)),
            AttrValue::Property(p) => AttrValue::Property(p),
            other => other,
        }
    } else {
        value
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Attribute(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Attribute(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<PropValue> for AttrValue {
    fn from(v: PropValue) -> Self {
        Self::Property(v)
    }
}

impl From<EventHandler> for AttrValue {
    fn from(v: EventHandler) -> Self {
        Self::Handler(v)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_equality_is_by_pointer() {
        let h1 = EventHandler::new(|_| {});
        let h2 = h1.clone();
        let h3 = EventHandler::new(|_| {});
        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }

    #[test]
    fn handler_debug_format() {
        let h = EventHandler::new(|_| {});
        assert_eq!(format!("{h:?}"), "EventHandler(<fn>)");
    }

    #[test]
    fn classify_checked_string_becomes_property() {
        let v = classify("checked", AttrValue::Attribute("yes".into()));
        assert_eq!(v, AttrValue::Property(PropValue::Text("yes".into())));
    }

    #[test]
    fn classify_checked_flag_becomes_bool_property() {
        let v = classify("checked", AttrValue::Flag(true));
        assert_eq!(v, AttrValue::Property(PropValue::Bool(true)));
    }

    #[test]
    fn classify_value_and_selected() {
        assert!(matches!(
            classify("value", AttrValue::Attribute("abc".into())),
            AttrValue::Property(_)
        ));
        assert!(matches!(
            classify("selected", AttrValue::Flag(false)),
            AttrValue::Property(PropValue::Bool(false))
        ));
    }

    #[test]
    fn classify_other_names_pass_through() {
        let v = classify("href", AttrValue::Attribute("/x".into()));
        assert_eq!(v, AttrValue::Attribute("/x".into()));
        let v = classify("disabled", AttrValue::Flag(true));
        assert_eq!(v, AttrValue::Flag(true));
    }

    #[test]
    fn attr_value_from_conversions() {
        assert_eq!(AttrValue::from("a"), AttrValue::Attribute("a".into()));
        assert_eq!(AttrValue::from(true), AttrValue::Flag(true));
        assert_eq!(
            AttrValue::from(PropValue::Bool(false)),
            AttrValue::Property(PropValue::Bool(false))
        );
    }
}
