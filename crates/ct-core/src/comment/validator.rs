//! Comment validation

use super::model::CommentRecord;
use crate::config::ThreadConfig;
use crate::error::{Result, ThreadError};
use crate::types::CommentId;
use std::collections::HashSet;

/// Maximum comment length (default)
pub const MAX_COMMENT_LENGTH: usize = 10000;

/// Maximum author length (default)
pub const MAX_AUTHOR_LENGTH: usize = 100;

/// Validator for new comments
pub struct CommentValidator {
    max_length: usize,
    max_author_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_COMMENT_LENGTH,
            max_author_length: MAX_AUTHOR_LENGTH,
        }
    }

    /// Create a validator from thread configuration
    pub fn from_config(config: &ThreadConfig) -> Self {
        Self {
            max_length: config.max_comment_length,
            max_author_length: config.max_author_length,
        }
    }

    /// Validate comment text
    pub fn validate_text(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(ThreadError::Validation(
                "Comment text cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_length {
            return Err(ThreadError::Validation(format!(
                "Comment text exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }

    /// Validate an optional author name
    pub fn validate_author(&self, author: Option<&str>) -> Result<()> {
        let Some(author) = author else {
            return Ok(());
        };

        if author.trim().is_empty() {
            return Err(ThreadError::Validation(
                "Author cannot be blank".to_string(),
            ));
        }

        if author.chars().count() > self.max_author_length {
            return Err(ThreadError::Validation(format!(
                "Author exceeds maximum length of {} characters",
                self.max_author_length
            )));
        }

        Ok(())
    }

    /// Validate a record about to be added to `thread`
    pub fn validate_new(&self, record: &CommentRecord, thread: &[CommentRecord]) -> Result<()> {
        self.validate_text(record.payload.text().unwrap_or_default())?;
        self.validate_author(record.payload.author())?;

        if thread.iter().any(|existing| existing.id == record.id) {
            return Err(ThreadError::Validation(format!(
                "Comment with ID {} already exists",
                record.id
            )));
        }

        if let Some(parent) = &record.parent_id {
            Self::validate_parent(parent, thread)?;
        }

        Ok(())
    }

    /// A new reply must point at a root comment of the thread
    ///
    /// Replies to replies or to unknown ids would never be displayed.
    pub fn validate_parent(parent: &CommentId, thread: &[CommentRecord]) -> Result<()> {
        match thread.iter().find(|r| &r.id == parent) {
            None => Err(ThreadError::Validation(format!(
                "Parent comment {} not found",
                parent
            ))),
            Some(found) if !found.is_root() => Err(ThreadError::Validation(format!(
                "Parent comment {} is a reply; only root comments accept replies",
                parent
            ))),
            Some(_) => Ok(()),
        }
    }

    /// Reject threads with repeated ids
    pub fn validate_unique_ids(thread: &[CommentRecord]) -> Result<()> {
        let mut seen = HashSet::with_capacity(thread.len());
        for record in thread {
            if !seen.insert(&record.id) {
                return Err(ThreadError::Validation(format!(
                    "Duplicate comment ID {}",
                    record.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentRecordBuilder;

    fn thread() -> Vec<CommentRecord> {
        vec![CommentRecord::root(1), CommentRecord::reply(2, 1)]
    }

    #[test]
    fn test_validate_text() {
        let validator = CommentValidator::new();

        assert!(validator.validate_text("Valid comment").is_ok());
        assert!(validator.validate_text("").is_err());
        assert!(validator.validate_text("   ").is_err());
    }

    #[test]
    fn test_validate_text_max_length() {
        let validator = CommentValidator::from_config(&ThreadConfig {
            max_comment_length: 10,
            max_author_length: 5,
        });

        assert!(validator.validate_text("0123456789").is_ok());
        assert!(validator.validate_text("01234567890").is_err());
        assert!(validator.validate_author(Some("ann")).is_ok());
        assert!(validator.validate_author(Some("annabel")).is_err());
    }

    #[test]
    fn test_validate_author() {
        let validator = CommentValidator::new();

        assert!(validator.validate_author(None).is_ok());
        assert!(validator.validate_author(Some("  ")).is_err());
    }

    #[test]
    fn test_validate_parent() {
        let thread = thread();

        assert!(CommentValidator::validate_parent(&CommentId::Int(1), &thread).is_ok());
        assert!(CommentValidator::validate_parent(&CommentId::Int(2), &thread).is_err());
        assert!(CommentValidator::validate_parent(&CommentId::Int(9), &thread).is_err());
    }

    #[test]
    fn test_validate_new() {
        let validator = CommentValidator::new();
        let thread = thread();

        let reply = CommentRecordBuilder::new().id(3).reply_to(1).text("ok").build().unwrap();
        assert!(validator.validate_new(&reply, &thread).is_ok());

        let duplicate = CommentRecordBuilder::new().id(1).text("again").build().unwrap();
        assert!(validator.validate_new(&duplicate, &thread).is_err());

        let nested = CommentRecordBuilder::new().id(4).reply_to(2).text("deep").build().unwrap();
        assert!(validator.validate_new(&nested, &thread).is_err());

        let no_text = CommentRecord::root(5);
        assert!(validator.validate_new(&no_text, &thread).is_err());
    }

    #[test]
    fn test_validate_unique_ids() {
        assert!(CommentValidator::validate_unique_ids(&thread()).is_ok());

        let dup = vec![CommentRecord::root(1), CommentRecord::root(1)];
        assert!(CommentValidator::validate_unique_ids(&dup).is_err());

        let mixed = vec![CommentRecord::root(1), CommentRecord::root("1")];
        assert!(CommentValidator::validate_unique_ids(&mixed).is_ok());
    }
}
