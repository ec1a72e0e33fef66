//! Comment storage trait and abstractions

use crate::comment::CommentRecord;
use crate::error::{Result, ThreadError};
use crate::types::PostId;
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for comment storage implementations
pub trait CommentStore: Send + Sync {
    /// Fetch every comment of a post in stored order
    ///
    /// A post with no comments yields an empty list.
    fn fetch_thread(&self, post: &PostId) -> Result<Vec<CommentRecord>>;

    /// Append a comment to a post's thread
    fn append(&self, post: &PostId, record: CommentRecord) -> Result<()>;

    /// List all posts that have a thread, sorted
    fn list_posts(&self) -> Result<Vec<PostId>>;
}

/// In-memory comment store
#[derive(Debug, Default)]
pub struct MemoryStore {
    threads: RwLock<HashMap<PostId, Vec<CommentRecord>>>,
}

impl MemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with one thread
    pub fn with_thread(post: PostId, records: Vec<CommentRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut threads) = store.threads.write() {
            threads.insert(post, records);
        }
        store
    }
}

fn poisoned() -> ThreadError {
    ThreadError::Storage("memory store lock poisoned".to_string())
}

impl CommentStore for MemoryStore {
    fn fetch_thread(&self, post: &PostId) -> Result<Vec<CommentRecord>> {
        let threads = self.threads.read().map_err(|_| poisoned())?;
        Ok(threads.get(post).cloned().unwrap_or_default())
    }

    fn append(&self, post: &PostId, record: CommentRecord) -> Result<()> {
        let mut threads = self.threads.write().map_err(|_| poisoned())?;
        let thread = threads.entry(post.clone()).or_default();
        if thread.iter().any(|r| r.id == record.id) {
            return Err(ThreadError::Validation(format!(
                "Comment with ID {} already exists",
                record.id
            )));
        }
        thread.push(record);
        Ok(())
    }

    fn list_posts(&self) -> Result<Vec<PostId>> {
        let threads = self.threads.read().map_err(|_| poisoned())?;
        let mut posts: Vec<PostId> = threads.keys().cloned().collect();
        posts.sort();
        Ok(posts)
    }
}
