//! Domain layer: collection tree model and operations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod model;
pub mod normalize;
pub mod state;

pub use error::DomainError;
pub use model::{Attribute, Item, NodeType, RawNode, Value};
pub use normalize::normalize;
pub use state::{collapse_all, locate, toggle, NodeRef, ToggleOutcome};
