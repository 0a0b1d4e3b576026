//! Tests for BrowseSession using a mock backend

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use carrel::application::{ApplicationError, BrowseSession};
use carrel::domain::{RawNode, ToggleOutcome};
use carrel::infrastructure::api::{CollectionApi, CollectionSummary, SearchResults};
use carrel::infrastructure::error::ApiError;

/// In-memory backend serving canned documents.
struct MockApi {
    collections: Vec<CollectionSummary>,
    documents: HashMap<String, serde_json::Value>,
}

impl MockApi {
    fn new() -> Self {
        let mut documents = HashMap::new();
        documents.insert(
            "uva-lib:1".to_string(),
            json!({
                "pid": "uva-lib:1",
                "type": {"name": "collection", "container": true},
                "sequence": 1,
                "children": [
                    {"pid": "t1", "type": {"name": "title", "container": false},
                     "sequence": 1, "value": "Daily Progress"},
                    {"pid": "y1", "type": {"name": "year", "container": true},
                     "sequence": 2, "children": [
                        {"pid": "i1", "type": {"name": "issue", "container": true},
                         "sequence": 1}
                     ]}
                ]
            }),
        );
        documents.insert(
            "uva-lib:bad".to_string(),
            json!({
                "pid": "uva-lib:bad",
                "type": {"name": "title", "container": false},
                "sequence": 1,
                "value": "not a tree"
            }),
        );
        Self {
            collections: vec![
                CollectionSummary {
                    pid: "uva-lib:1".to_string(),
                    title: "Daily Progress".to_string(),
                },
                CollectionSummary {
                    pid: "uva-lib:2".to_string(),
                    title: "WSLS-TV".to_string(),
                },
            ],
            documents,
        }
    }
}

impl CollectionApi for MockApi {
    fn list(&self) -> Result<Vec<CollectionSummary>, ApiError> {
        Ok(self.collections.clone())
    }

    fn collection(&self, pid: &str) -> Result<RawNode, ApiError> {
        match self.documents.get(pid) {
            Some(doc) => Ok(serde_json::from_value(doc.clone()).expect("mock document decodes")),
            None => Err(ApiError::Status {
                url: format!("/api/collections/{pid}"),
                status: 404,
                body: format!("{pid} not found"),
            }),
        }
    }

    fn search(&self, _query: &str) -> Result<SearchResults, ApiError> {
        Ok(SearchResults {
            hits: 0,
            response_time_ms: 1,
            results: vec![],
        })
    }
}

fn session() -> BrowseSession {
    BrowseSession::new(Arc::new(MockApi::new()))
}

// ============================================================
// Load Lifecycle Tests
// ============================================================

#[test]
fn given_known_pid_when_loading_then_tree_normalized_and_held() {
    let mut session = session();

    session.load("uva-lib:1").expect("load succeeds");

    assert_eq!(session.current_pid(), Some("uva-lib:1"));
    let tree = session.current().expect("tree held");
    assert_eq!(tree.item_count(), 3);
    assert_eq!(tree.title(), Some("Daily Progress"));
}

#[test]
fn given_loaded_tree_when_reloading_then_view_state_reset() {
    let mut session = session();
    session.load("uva-lib:1").expect("load succeeds");
    assert_eq!(session.toggle("y1"), ToggleOutcome::Expanded);

    session.load("uva-lib:1").expect("reload succeeds");

    let tree = session.current().expect("tree held");
    let year = &tree.children[0];
    assert_eq!(year.pid, "y1");
    assert!(!year.expanded, "expanded flags do not survive a reload");
}

#[test]
fn given_unknown_pid_when_loading_then_error_and_previous_tree_discarded() {
    let mut session = session();
    session.load("uva-lib:1").expect("first load succeeds");

    let result = session.load("uva-lib:404");

    assert!(matches!(result, Err(ApplicationError::Backend { .. })));
    assert!(session.current().is_none());
    assert!(session.current_pid().is_none());
}

#[test]
fn given_malformed_document_when_loading_then_domain_error_and_no_tree() {
    let mut session = session();

    let result = session.load("uva-lib:bad");

    assert!(matches!(result, Err(ApplicationError::Domain(_))));
    assert!(session.current().is_none());
}

#[test]
fn given_backend_error_when_loading_then_message_is_single_readable_string() {
    let mut session = session();

    let err = session.load("uva-lib:404").unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("uva-lib:404"));
    assert!(msg.contains("404"));
}

// ============================================================
// State Delegation Tests
// ============================================================

#[test]
fn given_empty_session_when_toggling_then_not_found() {
    let mut session = session();
    assert_eq!(session.toggle("uva-lib:1"), ToggleOutcome::NotFound);
}

#[test]
fn given_loaded_session_when_toggling_attribute_then_unchanged() {
    let mut session = session();
    session.load("uva-lib:1").expect("load succeeds");

    assert_eq!(session.toggle("t1"), ToggleOutcome::Unchanged);
}

#[test]
fn given_expanded_nodes_when_collapsing_all_then_tree_fully_closed() {
    let mut session = session();
    session.load("uva-lib:1").expect("load succeeds");
    session.toggle("uva-lib:1");
    session.toggle("y1");

    session.collapse_all();

    let tree = session.current().expect("tree held");
    assert!(!tree.expanded);
    assert!(!tree.children[0].expanded);
    assert!(!tree.children[0].children[0].expanded);
}

#[test]
fn given_loaded_session_when_finding_then_node_ref_returned() {
    let mut session = session();
    session.load("uva-lib:1").expect("load succeeds");

    assert!(session.find("i1").is_some());
    assert!(session.find("zzz").is_none());
}

// ============================================================
// Pass-through Tests
// ============================================================

#[test]
fn given_session_when_listing_collections_then_index_returned() {
    let session = session();
    let collections = session.collections().expect("list succeeds");
    assert_eq!(collections.len(), 2);
    assert_eq!(collections[0].pid, "uva-lib:1");
}

#[test]
fn given_session_when_searching_then_results_passed_through() {
    let session = session();
    let results = session.search("snow").expect("search succeeds");
    assert_eq!(results.hits, 0);
    assert!(results.results.is_empty());
}
