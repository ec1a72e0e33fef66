//! JSON response bodies

use crate::comment::{
    build_comment_tree, find_unattached, CommentForest, CommentRecord, ThreadSummary, Unattached,
};
use crate::error::Result;
use crate::types::PostId;
use serde::{Deserialize, Serialize};

/// A post's thread as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadResponse {
    /// Root comments with their replies
    pub comments: CommentForest,
    /// Counts for the thread
    pub summary: ThreadSummary,
}

impl ThreadResponse {
    /// Build the forest and summary for a fetched thread
    pub fn from_records(records: &[CommentRecord]) -> Self {
        Self::with_unattached(records).0
    }

    /// Like [`ThreadResponse::from_records`], also returning the records
    /// left out of the forest
    pub fn with_unattached(records: &[CommentRecord]) -> (Self, Vec<Unattached>) {
        let comments = build_comment_tree(records);
        let unattached = find_unattached(records);
        let summary = ThreadSummary::compute(&comments, unattached.len());
        (Self { comments, summary }, unattached)
    }

    /// Serialize, pretty or compact
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Error body: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A post and the counts of its thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostOverview {
    pub post_id: PostId,
    pub summary: ThreadSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thread_response_shape() {
        let records = vec![CommentRecord::root(1), CommentRecord::reply(2, 1)];
        let response = ThreadResponse::from_records(&records);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["comments"][0]["id"], json!(1));
        assert_eq!(value["comments"][0]["replies"][0]["id"], json!(2));
        assert_eq!(value["summary"]["total"], json!(2));
    }

    #[test]
    fn test_empty_thread_response() {
        let response = ThreadResponse::from_records(&[]);
        let json = response.to_json(false).unwrap();
        assert!(json.contains("\"comments\":[]"));
        assert_eq!(response.summary.total, 0);
    }

    #[test]
    fn test_error_response() {
        let body = serde_json::to_string(&ErrorResponse::new("boom")).unwrap();
        assert_eq!(body, r#"{"error":"boom"}"#);
    }
}
