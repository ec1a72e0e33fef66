//! Comment data models

use crate::types::{CommentId, Payload};
use serde::{Deserialize, Deserializer, Serialize};

/// A comment row as fetched from storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Comment identifier
    pub id: CommentId,
    /// Parent comment, `None` for a root comment
    ///
    /// `null`, a missing key and `""` all read as `None`.
    #[serde(default, deserialize_with = "deserialize_parent_id")]
    pub parent_id: Option<CommentId>,
    /// Opaque fields passed through unchanged
    #[serde(flatten)]
    pub payload: Payload,
}

impl CommentRecord {
    /// Create a root record with an empty payload
    pub fn root(id: impl Into<CommentId>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            payload: Payload::new(),
        }
    }

    /// Create a reply record with an empty payload
    pub fn reply(id: impl Into<CommentId>, parent_id: impl Into<CommentId>) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent_id.into()),
            payload: Payload::new(),
        }
    }

    /// Attach a payload
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Check if this record has no parent
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

fn deserialize_parent_id<'de, D>(deserializer: D) -> Result<Option<CommentId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<CommentId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_blank()))
}

/// A root comment with its direct replies
///
/// The built reply list owns the `replies` key: a payload entry of the
/// same name is dropped from the root when the node is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub record: CommentRecord,
    /// Direct replies in input order; one level only
    #[serde(default)]
    pub replies: Vec<CommentRecord>,
}

impl CommentNode {
    /// Key the reply list serializes under
    pub const REPLIES: &'static str = "replies";

    /// Create a node with no replies
    pub fn new(mut record: CommentRecord) -> Self {
        record.payload.remove(Self::REPLIES);
        Self {
            record,
            replies: Vec::new(),
        }
    }

    /// Attach the direct replies
    pub fn with_replies(mut self, replies: Vec<CommentRecord>) -> Self {
        self.replies = replies;
        self
    }

    /// Root comment id
    pub fn id(&self) -> &CommentId {
        &self.record.id
    }

    /// This root plus its replies
    pub fn comment_count(&self) -> usize {
        1 + self.replies.len()
    }
}

/// Ordered root nodes of a thread
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentForest(Vec<CommentNode>);

impl CommentForest {
    /// Create an empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of root nodes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the forest has no roots
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Root nodes in order
    pub fn nodes(&self) -> &[CommentNode] {
        &self.0
    }

    /// Iterate over root nodes
    pub fn iter(&self) -> std::slice::Iter<'_, CommentNode> {
        self.0.iter()
    }

    /// Consume into the node list
    pub fn into_inner(self) -> Vec<CommentNode> {
        self.0
    }
}

impl From<Vec<CommentNode>> for CommentForest {
    fn from(nodes: Vec<CommentNode>) -> Self {
        Self(nodes)
    }
}

impl FromIterator<CommentNode> for CommentForest {
    fn from_iter<I: IntoIterator<Item = CommentNode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CommentForest {
    type Item = CommentNode;
    type IntoIter = std::vec::IntoIter<CommentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommentForest {
    type Item = &'a CommentNode;
    type IntoIter = std::slice::Iter<'a, CommentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
