//! Collection document normalizer
//!
//! Converts the raw node hierarchy delivered by the backend into the
//! presentation model: structural items owning grouped multi-valued
//! attributes and container children.

use crate::domain::error::DomainError;
use crate::domain::model::{Attribute, Item, RawNode, Value};

/// Normalize one raw collection document into an [`Item`] tree.
///
/// Container children fold into `children` in document order. Non-container
/// children fold into `attributes`, grouped by type name: the first
/// encounter of a name creates the entry (common fields copied from that
/// child), every further encounter appends to its `values`.
///
/// The input is never mutated; two calls with the same document produce
/// structurally identical trees. Malformed nodes abort the whole
/// normalization, so the caller never observes a partial tree.
pub fn normalize(raw: &RawNode) -> Result<Item, DomainError> {
    if !raw.node_type.container {
        return Err(DomainError::RootNotContainer(raw.pid.clone()));
    }
    normalize_container(raw)
}

fn normalize_container(raw: &RawNode) -> Result<Item, DomainError> {
    if raw.pid.is_empty() {
        return Err(DomainError::MissingPid(raw.node_type.name.clone()));
    }

    let mut item = Item {
        pid: raw.pid.clone(),
        node_type: raw.node_type.clone(),
        sequence: raw.sequence,
        published_at: raw.published_at,
        expanded: false,
        attributes: Vec::new(),
        children: Vec::new(),
    };

    // The backend omits `children` entirely for empty containers.
    if let Some(children) = &raw.children {
        for child in children {
            if child.node_type.container {
                item.children.push(normalize_container(child)?);
            } else {
                fold_attribute(&mut item.attributes, child)?;
            }
        }
    }

    Ok(item)
}

/// Fold one non-container child into the attribute list, creating the entry
/// for its type name on first encounter.
fn fold_attribute(attributes: &mut Vec<Attribute>, child: &RawNode) -> Result<(), DomainError> {
    if child.pid.is_empty() {
        return Err(DomainError::MissingPid(child.node_type.name.clone()));
    }
    if child.children.as_ref().is_some_and(|c| !c.is_empty()) {
        return Err(DomainError::LeafWithChildren(child.pid.clone()));
    }

    let pos = match attributes
        .iter()
        .position(|a| a.node_type.name == child.node_type.name)
    {
        Some(pos) => pos,
        None => {
            attributes.push(Attribute {
                pid: child.pid.clone(),
                node_type: child.node_type.clone(),
                sequence: child.sequence,
                published_at: child.published_at,
                values: Vec::new(),
            });
            attributes.len() - 1
        }
    };

    attributes[pos].values.push(Value {
        value: child.value.clone().unwrap_or_default(),
        value_uri: child.value_uri.clone(),
    });

    Ok(())
}
