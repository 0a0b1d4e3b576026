//! Domain entities: raw wire model and normalized collection tree

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Controlled-vocabulary descriptor attached to every node.
///
/// `container` decides whether a node groups other nodes or is a plain
/// descriptive attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub controlled_vocab: bool,
    pub container: bool,
}

/// One element of the raw collection document, field names exactly as the
/// backend serializes them. Untrusted: shape is validated during
/// normalization.
///
/// The backend omits empty fields (`value`, `valueURI`, `children`,
/// `publishedAt`), so all of them deserialize as optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawNode {
    pub pid: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub sequence: i64,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "valueURI")]
    pub value_uri: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<RawNode>>,
}

/// A single attribute value; `value_uri` points at the authority record
/// when the value comes from a controlled vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Value {
    pub value: String,
    #[serde(rename = "valueURI", skip_serializing_if = "Option::is_none")]
    pub value_uri: Option<String>,
}

/// One distinct attribute type under a structural node, holding every value
/// encountered for that type in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub pid: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub sequence: i64,
    #[serde(rename = "publishedAt", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub values: Vec<Value>,
}

/// A structural node of the normalized tree: a collection, box, folder,
/// year or similar container. Owns its grouped attributes, its container
/// children and the expand/collapse view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub pid: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub sequence: i64,
    #[serde(rename = "publishedAt", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub expanded: bool,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Item>,
}

impl Item {
    /// Find an attribute entry by type name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.node_type.name == name)
    }

    /// First value of a named attribute, if any.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.attribute(name)
            .and_then(|a| a.values.first())
            .map(|v| v.value.as_str())
    }

    /// Title attribute shortcut; nearly every container carries one.
    pub fn title(&self) -> Option<&str> {
        self.first_value("title")
    }

    /// Number of structural nodes in this subtree, including self.
    pub fn item_count(&self) -> usize {
        1 + self.children.iter().map(Item::item_count).sum::<usize>()
    }

    /// Depth of the structural tree; a childless item has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Item::depth)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.node_type.name, self.pid)
    }
}
