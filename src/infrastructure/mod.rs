//! Infrastructure layer: backend API boundary and HTTP implementation

pub mod api;
pub mod error;

pub use api::{CollectionApi, CollectionSummary, HttpCollectionApi, SearchResults};
pub use error::{ApiError, InfraError, InfraResult};
