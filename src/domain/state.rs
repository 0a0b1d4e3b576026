//! View-state operations on a normalized tree
//!
//! The expand/collapse flag lives on structural nodes, but every mutation
//! of it goes through this module, so an alternative store (say, a side map
//! keyed by pid) could replace it without touching the normalizer.

use crate::domain::model::{Attribute, Item};

/// A located node: structural or attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Item(&'a Item),
    Attribute(&'a Attribute),
}

impl NodeRef<'_> {
    pub fn pid(&self) -> &str {
        match self {
            NodeRef::Item(item) => &item.pid,
            NodeRef::Attribute(attr) => &attr.pid,
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self, NodeRef::Item(_))
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Structural node matched and is now open
    Expanded,
    /// Structural node matched and is now closed
    Collapsed,
    /// Pid matched an attribute node; there is nothing to toggle
    Unchanged,
    /// Pid is absent from the tree
    NotFound,
}

/// Depth-first search for a node by pid.
///
/// A node is tested before its descendants; within one item the order is
/// the item itself, its attribute entries, then its children. First match
/// wins.
pub fn locate<'a>(root: &'a Item, pid: &str) -> Option<NodeRef<'a>> {
    if root.pid == pid {
        return Some(NodeRef::Item(root));
    }
    for attr in &root.attributes {
        if attr.pid == pid {
            return Some(NodeRef::Attribute(attr));
        }
    }
    for child in &root.children {
        if let Some(found) = locate(child, pid) {
            return Some(found);
        }
    }
    None
}

/// Flip the expand/collapse flag of the structural node with the given pid.
///
/// Visits nodes in the same order as [`locate`]. An attribute match is an
/// explicit no-op ([`ToggleOutcome::Unchanged`]); a missing pid is
/// [`ToggleOutcome::NotFound`], never an error.
pub fn toggle(root: &mut Item, pid: &str) -> ToggleOutcome {
    if root.pid == pid {
        root.expanded = !root.expanded;
        return if root.expanded {
            ToggleOutcome::Expanded
        } else {
            ToggleOutcome::Collapsed
        };
    }
    if root.attributes.iter().any(|a| a.pid == pid) {
        return ToggleOutcome::Unchanged;
    }
    for child in &mut root.children {
        match toggle(child, pid) {
            ToggleOutcome::NotFound => continue,
            outcome => return outcome,
        }
    }
    ToggleOutcome::NotFound
}

/// Close every structural node reachable from `root`, including `root`.
pub fn collapse_all(root: &mut Item) {
    root.expanded = false;
    for child in &mut root.children {
        collapse_all(child);
    }
}
