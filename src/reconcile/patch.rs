//! Single-node patching: materialization and the attribute diff.
//!
//! Attribute application is one code path shared by first materialization
//! and update, so a live node can never diverge between the two. The apply
//! and remove arms are a total match over [`AttrValue`].

use std::collections::BTreeMap;
use std::rc::Rc;

use super::context::RenderContext;
use super::RenderError;
use crate::host::{Host, NodeRef};
use crate::tree::{AttrValue, Desc, StyleMap, TreeDescription};

/// Serialize a style map as `name: value; ...` declarations.
fn style_string(map: &StyleMap) -> String {
    let mut out = String::new();
    for (name, value) in map {
        if !out.is_empty() {
            out.push_str("; ");
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
    }
    out
}

impl RenderContext {
    /// Build live nodes for `desc`, fully recursively. The returned node
    /// is detached; the caller inserts it.
    pub(super) fn materialize(&mut self, host: &mut dyn Host, desc: &Desc) -> NodeRef {
        match &**desc {
            TreeDescription::Text(payload) => host.create_text(payload),
            TreeDescription::Element {
                tag,
                attrs,
                children,
                unmount,
                ..
            } => {
                let node = host.create_element(tag);
                for (name, value) in attrs {
                    self.apply_attr(host, node, name, value);
                }
                if let Some(hook) = unmount {
                    self.hooks.insert(node, hook.clone());
                }
                for child in children {
                    let live = self.materialize(host, child);
                    host.insert_before(node, live, None);
                }
                node
            }
        }
    }

    /// Apply one attribute's effect to a live node.
    fn apply_attr(&mut self, host: &mut dyn Host, node: NodeRef, name: &str, value: &AttrValue) {
        match value {
            AttrValue::ClassName(classes) => host.set_attribute(node, name, classes),
            AttrValue::Style(map) => host.set_attribute(node, name, &style_string(map)),
            AttrValue::Handler(handler) => {
                self.events.rebind(host, node, name, handler.clone());
            }
            // Boolean attributes are presence/absence, never "true"/"false".
            AttrValue::Flag(true) => host.set_attribute(node, name, ""),
            AttrValue::Flag(false) => host.remove_attribute(node, name),
            AttrValue::Property(value) => host.set_property(node, name, value.clone()),
            AttrValue::Attribute(value) => host.set_attribute(node, name, value),
        }
    }

    /// Remove one attribute's effect from a live node.
    fn remove_attr(&mut self, host: &mut dyn Host, node: NodeRef, name: &str, old: &AttrValue) {
        match old {
            AttrValue::ClassName(_)
            | AttrValue::Style(_)
            | AttrValue::Flag(_)
            | AttrValue::Attribute(_) => host.remove_attribute(node, name),
            AttrValue::Handler(_) => self.events.unbind(node, name),
            AttrValue::Property(_) => host.remove_property(node, name),
        }
    }

    /// Attribute-level diff: clear what vanished, re-apply what changed.
    /// Handlers compare by pointer, so an unchanged shared handler is not
    /// rebound.
    pub(super) fn diff_attrs(
        &mut self,
        host: &mut dyn Host,
        node: NodeRef,
        old: &BTreeMap<String, AttrValue>,
        new: &BTreeMap<String, AttrValue>,
    ) {
        for (name, old_value) in old {
            if !new.contains_key(name) {
                self.remove_attr(host, node, name, old_value);
            }
        }
        for (name, new_value) in new {
            if old.get(name) != Some(new_value) {
                self.apply_attr(host, node, name, new_value);
            }
        }
    }

    /// Reconcile one live node against its old and new descriptions.
    ///
    /// Returns the live node afterwards: the same handle when updated in
    /// place, or a fresh one when the node was replaced (kind, tag, or key
    /// changed).
    pub(super) fn patch_node(
        &mut self,
        host: &mut dyn Host,
        parent: NodeRef,
        node: NodeRef,
        old: &Desc,
        new: &Desc,
    ) -> Result<NodeRef, RenderError> {
        // Same render output, nothing to do.
        if Rc::ptr_eq(old, new) {
            return Ok(node);
        }

        if old.replaced_by(new) {
            let fresh = self.materialize(host, new);
            host.insert_before(parent, fresh, Some(node));
            self.detach(host, node);
            return Ok(fresh);
        }

        match (&**old, &**new) {
            (TreeDescription::Text(before), TreeDescription::Text(after)) => {
                if before != after {
                    host.set_text(node, after);
                }
            }
            (
                TreeDescription::Element {
                    attrs: old_attrs,
                    children: old_children,
                    ..
                },
                TreeDescription::Element {
                    attrs: new_attrs,
                    children: new_children,
                    unmount,
                    ..
                },
            ) => {
                self.diff_attrs(host, node, old_attrs, new_attrs);
                match unmount {
                    Some(hook) => {
                        self.hooks.insert(node, hook.clone());
                    }
                    None => {
                        self.hooks.remove(&node);
                    }
                }
                self.reconcile_children(host, node, old_children, new_children)?;
            }
            // Kind changes are handled by replacement above.
            _ => unreachable!("kind change must take the replacement path"),
        }
        Ok(node)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::host::PropValue;
    use crate::testing::MockHost;
    use crate::tree::{element, text};

    fn render_pair(first: Desc, second: Desc) -> (MockHost, RenderContext, NodeRef) {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();
        ctx.render(&mut host, first, mount).unwrap();
        ctx.render(&mut host, second, mount).unwrap();
        (host, ctx, mount)
    }

    // ── Text and replacement ─────────────────────────────────────────

    #[test]
    fn text_update_preserves_node_identity() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        let first = element("p").child("a").build();
        ctx.render(&mut host, first, mount).unwrap();
        let p = host.children(mount)[0];
        let leaf = host.children(p)[0];

        let second = element("p").child("b").build();
        ctx.render(&mut host, second, mount).unwrap();

        assert_eq!(host.children(mount)[0], p);
        assert_eq!(host.children(p)[0], leaf);
        assert_eq!(host.text_of(leaf), Some("b"));
    }

    #[test]
    fn tag_change_replaces_node() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        ctx.render(&mut host, element("p").build(), mount).unwrap();
        let p = host.children(mount)[0];
        ctx.render(&mut host, element("div").build(), mount).unwrap();

        let now = host.children(mount)[0];
        assert_ne!(now, p);
        assert!(!host.contains(p));
        assert_eq!(host.tag(now), Some("div"));
    }

    #[test]
    fn kind_change_replaces_node() {
        let (host, _, mount) = render_pair(element("p").build(), text("gone flat"));
        let children = host.children(mount);
        assert_eq!(children.len(), 1);
        assert_eq!(host.text_of(children[0]), Some("gone flat"));
    }

    #[test]
    fn replacement_runs_cleanup_hooks() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let first = element("p")
            .on_unmount(move |_| counter.set(counter.get() + 1))
            .build();
        ctx.render(&mut host, first, mount).unwrap();
        ctx.render(&mut host, element("div").build(), mount).unwrap();
        assert_eq!(hits.get(), 1);
    }

    // ── Attribute diff ───────────────────────────────────────────────

    #[test]
    fn vanished_attribute_is_removed() {
        let (host, _, mount) = render_pair(
            element("a").attr("href", "/x").build(),
            element("a").build(),
        );
        let a = host.children(mount)[0];
        assert_eq!(host.attribute(a, "href"), None);
    }

    #[test]
    fn changed_attribute_is_rewritten() {
        let (host, _, mount) = render_pair(
            element("a").attr("href", "/x").build(),
            element("a").attr("href", "/y").build(),
        );
        let a = host.children(mount)[0];
        assert_eq!(host.attribute(a, "href"), Some("/y"));
    }

    #[test]
    fn unchanged_attribute_is_untouched() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        ctx.render(&mut host, element("a").attr("href", "/x").build(), mount)
            .unwrap();
        host.reset_counts();
        ctx.render(&mut host, element("a").attr("href", "/x").build(), mount)
            .unwrap();
        assert_eq!(host.counts().attr_sets, 0);
    }

    #[test]
    fn boolean_flag_is_presence_absence() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        ctx.render(&mut host, element("button").attr("disabled", true).build(), mount)
            .unwrap();
        let b = host.children(mount)[0];
        assert_eq!(host.attribute(b, "disabled"), Some(""));

        ctx.render(&mut host, element("button").attr("disabled", false).build(), mount)
            .unwrap();
        assert_eq!(host.attribute(b, "disabled"), None);
    }

    #[test]
    fn property_routed_attributes_never_hit_attribute_namespace() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        ctx.render(&mut host, element("input").attr("checked", true).build(), mount)
            .unwrap();
        let input = host.children(mount)[0];
        assert_eq!(host.property(input, "checked"), Some(&PropValue::Bool(true)));
        assert_eq!(host.attribute(input, "checked"), None);

        ctx.render(&mut host, element("input").attr("checked", false).build(), mount)
            .unwrap();
        assert_eq!(host.property(input, "checked"), Some(&PropValue::Bool(false)));
        assert_eq!(host.attribute(input, "checked"), None);
    }

    #[test]
    fn vanished_property_is_removed() {
        let (host, _, mount) = render_pair(
            element("input").attr("value", "abc").build(),
            element("input").build(),
        );
        let input = host.children(mount)[0];
        assert_eq!(host.property(input, "value"), None);
    }

    #[test]
    fn style_serialization() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        let desc = element("div")
            .style("color", "red")
            .style("width", "10px")
            .build();
        ctx.render(&mut host, desc, mount).unwrap();
        let div = host.children(mount)[0];
        assert_eq!(host.attribute(div, "style"), Some("color: red; width: 10px"));
    }

    #[test]
    fn class_overwrite() {
        let (host, _, mount) = render_pair(
            element("li").class("item").build(),
            element("li").class("item done").build(),
        );
        let li = host.children(mount)[0];
        assert_eq!(host.attribute(li, "class"), Some("item done"));
    }

    // ── Handlers through the diff ────────────────────────────────────

    #[test]
    fn handler_replacement_leaves_one_registration() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        let h1_hits = Rc::new(Cell::new(0));
        let h2_hits = Rc::new(Cell::new(0));

        let c1 = h1_hits.clone();
        ctx.render(
            &mut host,
            element("button")
                .on("click", move |_| c1.set(c1.get() + 1))
                .build(),
            mount,
        )
        .unwrap();
        let button = host.children(mount)[0];

        let c2 = h2_hits.clone();
        ctx.render(
            &mut host,
            element("button")
                .on("click", move |_| c2.set(c2.get() + 1))
                .build(),
            mount,
        )
        .unwrap();

        assert_eq!(ctx.events().registry().active_count(button, "click"), 1);
        ctx.events().dispatch(&host, button, "click");
        assert_eq!(h1_hits.get(), 0);
        assert_eq!(h2_hits.get(), 1);
    }

    #[test]
    fn vanished_handler_is_unbound() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        ctx.render(&mut host, element("button").on("click", |_| {}).build(), mount)
            .unwrap();
        let button = host.children(mount)[0];
        ctx.render(&mut host, element("button").build(), mount).unwrap();
        assert_eq!(ctx.events().registry().active_count(button, "click"), 0);
    }

    #[test]
    fn shared_handler_is_not_rebound() {
        let mut host = MockHost::new();
        let mut ctx = RenderContext::new();
        let mount = host.mount_point();

        let shared = crate::tree::EventHandler::new(|_| {});
        let build = |h: crate::tree::EventHandler| {
            element("button").attr("click", AttrValue::Handler(h)).build()
        };

        ctx.render(&mut host, build(shared.clone()), mount).unwrap();
        let button = host.children(mount)[0];
        ctx.render(&mut host, build(shared), mount).unwrap();
        assert_eq!(ctx.events().registry().active_count(button, "click"), 1);
    }
}
