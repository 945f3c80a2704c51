//! Text snapshots of a [`MockHost`] subtree.
//!
//! One node per line, two-space indentation per depth. Elements print
//! their tag, attributes (sorted), and live properties (sorted, prefixed
//! with `.`); text nodes print their quoted payload.

use std::fmt::Write;

use super::host::{MockContent, MockHost};
use crate::host::{Host, NodeRef, PropValue};

/// Render the subtree rooted at `node` to an indented string.
pub fn subtree_to_string(host: &MockHost, node: NodeRef) -> String {
    let mut out = String::new();
    write_node(host, node, 0, &mut out);
    out
}

/// Render the children of `mount` (a mount point's live content).
pub fn mount_to_string(host: &MockHost, mount: NodeRef) -> String {
    let mut out = String::new();
    for child in host.children(mount) {
        write_node(host, child, 0, &mut out);
    }
    out
}

fn write_node(host: &MockHost, node: NodeRef, depth: usize, out: &mut String) {
    let Some(data) = host.get(node) else {
        return;
    };
    let indent = "  ".repeat(depth);
    match &data.content {
        MockContent::Text(payload) => {
            let _ = writeln!(out, "{indent}{payload:?}");
        }
        MockContent::Element(tag) => {
            let mut line = format!("{indent}<{tag}");
            for (name, value) in &data.attributes {
                let _ = write!(line, " {name}={value:?}");
            }
            for (name, value) in &data.properties {
                match value {
                    PropValue::Bool(v) => {
                        let _ = write!(line, " .{name}={v}");
                    }
                    PropValue::Text(v) => {
                        let _ = write!(line, " .{name}={v:?}");
                    }
                    PropValue::Number(v) => {
                        let _ = write!(line, " .{name}={v}");
                    }
                }
            }
            let _ = writeln!(out, "{line}>");
            for child in host.children(node) {
                write_node(host, child, depth + 1, out);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
