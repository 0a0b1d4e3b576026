//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the collection document shape.
/// These are independent of transport concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("node of type '{0}' has no pid")]
    MissingPid(String),

    #[error("attribute node {0} unexpectedly carries children")]
    LeafWithChildren(String),

    #[error("document root {0} is not a container")]
    RootNotContainer(String),
}
