//! Comment record builder for fluent API

use super::model::CommentRecord;
use crate::error::{Result, ThreadError};
use crate::types::{CommentId, Payload};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Builder for new comment records
pub struct CommentRecordBuilder {
    id: Option<CommentId>,
    parent_id: Option<CommentId>,
    author: Option<String>,
    text: Option<String>,
    created_at: Option<DateTime<Utc>>,
    extra: Payload,
}

impl CommentRecordBuilder {
    /// Create a builder for a root comment
    pub fn new() -> Self {
        Self {
            id: None,
            parent_id: None,
            author: None,
            text: None,
            created_at: None,
            extra: Payload::new(),
        }
    }

    /// Use a fixed id instead of a generated one
    pub fn id(mut self, id: impl Into<CommentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Make this a reply to `parent_id`
    pub fn reply_to(mut self, parent_id: impl Into<CommentId>) -> Self {
        let parent = parent_id.into();
        self.parent_id = (!parent.is_blank()).then_some(parent);
        self
    }

    /// Set the parent, `None` for a root
    pub fn parent(mut self, parent_id: Option<CommentId>) -> Self {
        self.parent_id = parent_id.filter(|id| !id.is_blank());
        self
    }

    /// Set the comment text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the creation time (defaults to now)
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Add an extra payload field
    pub fn field<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Self {
        self.extra.set(key, value);
        self
    }

    /// Build the record
    pub fn build(self) -> Result<CommentRecord> {
        let text = self
            .text
            .ok_or_else(|| ThreadError::Validation("Comment text is required".to_string()))?;

        if text.trim().is_empty() {
            return Err(ThreadError::Validation(
                "Comment text cannot be empty".to_string(),
            ));
        }

        let created_at = self.created_at.unwrap_or_else(Utc::now);

        let mut payload = self.extra;
        payload.set(Payload::TEXT, text);
        if let Some(author) = self.author {
            payload.set(Payload::AUTHOR, author);
        }
        payload.set(
            Payload::CREATED_AT,
            created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        );

        Ok(CommentRecord {
            id: self.id.unwrap_or_else(CommentId::generate),
            parent_id: self.parent_id,
            payload,
        })
    }
}

impl Default for CommentRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_basic_builder() {
        let record = CommentRecordBuilder::new().text("Nice post").build().unwrap();

        assert!(record.is_root());
        assert_eq!(record.payload.text(), Some("Nice post"));
        assert!(record.payload.created_at().is_some());
        assert!(matches!(record.id, CommentId::Text(_)));
    }

    #[test]
    fn test_builder_reply() {
        let record = CommentRecordBuilder::new()
            .id(5)
            .reply_to(1)
            .author("ann")
            .text("Agreed")
            .build()
            .unwrap();

        assert_eq!(record.id, CommentId::Int(5));
        assert_eq!(record.parent_id, Some(CommentId::Int(1)));
        assert_eq!(record.payload.author(), Some("ann"));
    }

    #[test]
    fn test_builder_blank_parent_is_root() {
        let record = CommentRecordBuilder::new()
            .reply_to("")
            .text("hello")
            .build()
            .unwrap();
        assert!(record.is_root());
    }

    #[test]
    fn test_builder_fixed_timestamp_and_fields() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let record = CommentRecordBuilder::new()
            .text("hi")
            .created_at(at)
            .field("likes", 0)
            .build()
            .unwrap();

        assert_eq!(record.payload.created_at(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(record.payload.get("likes"), Some(&serde_json::json!(0)));
    }

    #[test]
    fn test_builder_without_text_fails() {
        let result = CommentRecordBuilder::new().author("ann").build();
        assert!(matches!(result, Err(ThreadError::Validation(_))));
    }

    #[test]
    fn test_builder_with_empty_text_fails() {
        let result = CommentRecordBuilder::new().text("   ").build();
        assert!(result.is_err());
    }
}
