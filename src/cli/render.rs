//! Terminal rendering of a normalized collection tree

use termtree::Tree;

use crate::domain::{Attribute, Item};

/// Render an item tree as indented terminal output.
///
/// Attributes of a visited item are always shown; children are only
/// descended into when the item is open (or `show_all` is set). Closed
/// items with hidden children get a count marker instead.
pub fn render(root: &Item, show_all: bool) -> String {
    build_tree(root, show_all).to_string()
}

fn build_tree(item: &Item, show_all: bool) -> Tree<String> {
    let open = show_all || item.expanded;
    let mut tree = Tree::new(item_label(item, open));

    for attr in &item.attributes {
        tree.push(attribute_tree(attr));
    }
    if open {
        for child in &item.children {
            tree.push(build_tree(child, show_all));
        }
    }
    tree
}

fn item_label(item: &Item, open: bool) -> String {
    let mut label = format!("{} [{}]", item.node_type.name, item.pid);
    if !open && !item.children.is_empty() {
        label.push_str(&format!(" (+{} hidden)", item.children.len()));
    }
    label
}

fn attribute_tree(attr: &Attribute) -> Tree<String> {
    match attr.values.as_slice() {
        [single] => Tree::new(format!("{}: {}", attr.node_type.name, value_label(single))),
        values => {
            let mut tree = Tree::new(attr.node_type.name.clone());
            for value in values {
                tree.push(Tree::new(value_label(value)));
            }
            tree
        }
    }
}

fn value_label(value: &crate::domain::Value) -> String {
    match &value.value_uri {
        Some(uri) => format!("{} <{}>", value.value, uri),
        None => value.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{normalize, RawNode};
    use serde_json::json;

    fn sample() -> Item {
        let raw: RawNode = serde_json::from_value(json!({
            "pid": "c1",
            "type": {"name": "collection", "container": true},
            "sequence": 1,
            "children": [
                {"pid": "a1", "type": {"name": "title", "container": false},
                 "sequence": 1, "value": "Letters"},
                {"pid": "b1", "type": {"name": "box", "container": true},
                 "sequence": 2, "children": [
                    {"pid": "a2", "type": {"name": "title", "container": false},
                     "sequence": 1, "value": "Box 1"}
                 ]}
            ]
        }))
        .unwrap();
        normalize(&raw).unwrap()
    }

    #[test]
    fn given_collapsed_tree_when_rendering_then_children_hidden_with_count() {
        let out = render(&sample(), false);
        assert!(out.contains("collection [c1] (+1 hidden)"));
        assert!(out.contains("title: Letters"));
        assert!(!out.contains("box [b1]"));
    }

    #[test]
    fn given_show_all_when_rendering_then_every_level_visible() {
        let out = render(&sample(), true);
        assert!(out.contains("box [b1]"));
        assert!(out.contains("title: Box 1"));
    }

    #[test]
    fn given_multi_valued_attribute_when_rendering_then_values_nested() {
        let raw: RawNode = serde_json::from_value(json!({
            "pid": "c1",
            "type": {"name": "collection", "container": true},
            "sequence": 1,
            "children": [
                {"pid": "a1", "type": {"name": "subject", "container": false},
                 "sequence": 1, "value": "Weather"},
                {"pid": "a2", "type": {"name": "subject", "container": false},
                 "sequence": 2, "value": "Storms", "valueURI": "http://id.loc.gov/sh1"}
            ]
        }))
        .unwrap();
        let out = render(&normalize(&raw).unwrap(), false);
        assert!(out.contains("subject"));
        assert!(out.contains("Weather"));
        assert!(out.contains("Storms <http://id.loc.gov/sh1>"));
    }
}
