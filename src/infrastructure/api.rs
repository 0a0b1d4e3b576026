//! Backend API boundary
//!
//! `CollectionApi` abstracts the collection service so sessions can be
//! tested with mock implementations; `HttpCollectionApi` is the real
//! client. The backend owns transport details beyond this boundary; no
//! retries happen here.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::Settings;
use crate::domain::RawNode;
use crate::infrastructure::error::ApiError;

/// Summary record from the collection index endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionSummary {
    pub pid: String,
    #[serde(default)]
    pub title: String,
}

/// One match found in a search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    pub pid: String,
    #[serde(default)]
    pub title: Option<String>,
    pub match_type: String,
    #[serde(rename = "match")]
    pub matched: String,
    #[serde(default)]
    pub item_url: String,
}

/// Search hits grouped by owning collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionHits {
    pub collection_pid: String,
    #[serde(default)]
    pub collection_title: String,
    #[serde(default)]
    pub collection_url: String,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Response of the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResults {
    pub hits: u64,
    #[serde(default)]
    pub response_time_ms: i64,
    #[serde(default)]
    pub results: Vec<CollectionHits>,
}

/// Backend abstraction for testability.
pub trait CollectionApi: Send + Sync {
    /// Fetch the collection index.
    fn list(&self) -> Result<Vec<CollectionSummary>, ApiError>;

    /// Fetch one raw collection document by pid.
    fn collection(&self, pid: &str) -> Result<RawNode, ApiError>;

    /// Full-text search across all collections.
    fn search(&self, query: &str) -> Result<SearchResults, ApiError>;
}

/// HTTP implementation of [`CollectionApi`].
pub struct HttpCollectionApi {
    client: Client,
    base_url: String,
}

impl HttpCollectionApi {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        response
            .json()
            .map_err(|e| ApiError::Decode { url, source: e })
    }
}

impl CollectionApi for HttpCollectionApi {
    #[instrument(level = "debug", skip(self))]
    fn list(&self) -> Result<Vec<CollectionSummary>, ApiError> {
        self.get_json(self.url("/api/collections"), &[])
    }

    #[instrument(level = "debug", skip(self))]
    fn collection(&self, pid: &str) -> Result<RawNode, ApiError> {
        self.get_json(self.url(&format!("/api/collections/{pid}")), &[])
    }

    #[instrument(level = "debug", skip(self))]
    fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        self.get_json(self.url("/api/search"), &[("q", query)])
    }
}
