//! Core type definitions for comment-thread

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Identifier of a comment
///
/// Ids are opaque: rows coming from storage may carry integer or string
/// keys. The form is preserved, so integer `1` and string `"1"` are
/// different ids. Integers that fit in `i64` are always `Int`; `UInt`
/// only holds unsigned keys above `i64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentId {
    /// Integer key (e.g. an auto-increment column)
    Int(i64),
    /// Unsigned integer key too large for `i64`
    UInt(u64),
    /// String key (e.g. a UUID)
    Text(String),
}

impl CommentId {
    /// Generate a new random string id
    pub fn generate() -> Self {
        CommentId::Text(Uuid::new_v4().to_string())
    }

    /// Create a string id
    pub fn from_string(s: impl Into<String>) -> Self {
        CommentId::Text(s.into())
    }

    /// Parse a command-line style id: digits become an integer id,
    /// anything else a string id
    pub fn parse(s: &str) -> Self {
        if let Ok(n) = s.parse::<i64>() {
            return CommentId::Int(n);
        }
        match s.parse::<u64>() {
            Ok(n) => CommentId::from(n),
            Err(_) => CommentId::Text(s.to_string()),
        }
    }

    /// True for the empty string id, which is read as "no parent"
    pub fn is_blank(&self) -> bool {
        matches!(self, CommentId::Text(s) if s.is_empty())
    }
}

impl From<i64> for CommentId {
    fn from(n: i64) -> Self {
        CommentId::Int(n)
    }
}

impl From<u64> for CommentId {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => CommentId::Int(n),
            Err(_) => CommentId::UInt(n),
        }
    }
}

impl From<i32> for CommentId {
    fn from(n: i32) -> Self {
        CommentId::Int(i64::from(n))
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> Self {
        CommentId::Text(s.to_string())
    }
}

impl From<String> for CommentId {
    fn from(s: String) -> Self {
        CommentId::Text(s)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentId::Int(n) => write!(f, "{}", n),
            CommentId::UInt(n) => write!(f, "{}", n),
            CommentId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Identifier of the post a thread is attached to
///
/// Doubles as a file name in the file-system store, so only ASCII
/// alphanumerics, `-` and `_` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostId(String);

impl PostId {
    /// Maximum accepted length
    pub const MAX_LEN: usize = 128;

    /// Create from a string with validation
    pub fn from_string(s: impl Into<String>) -> crate::Result<Self> {
        let s = s.into();
        if Self::validate(&s) {
            Ok(PostId(s))
        } else {
            Err(crate::ThreadError::InvalidPostId(s))
        }
    }

    fn validate(s: &str) -> bool {
        !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostId {
    type Error = crate::ThreadError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PostId::from_string(s)
    }
}

impl From<PostId> for String {
    fn from(id: PostId) -> Self {
        id.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque payload carried by a comment (author, text, timestamps, ...)
///
/// Stored as a sorted JSON map so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Payload {
    pub const AUTHOR: &'static str = "author";
    pub const TEXT: &'static str = "text";
    pub const CREATED_AT: &'static str = "created_at";

    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Get a string value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key)?.as_str()
    }

    /// Set a value by key
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.data.insert(key.into(), v);
        }
    }

    /// Remove a value by key
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn author(&self) -> Option<&str> {
        self.get_str(Self::AUTHOR)
    }

    pub fn text(&self) -> Option<&str> {
        self.get_str(Self::TEXT)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.get_str(Self::CREATED_AT)
    }
}
