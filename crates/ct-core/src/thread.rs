//! Thread service: fetch, build and extend comment threads

use crate::comment::{CommentRecord, CommentValidator, Unattached};
use crate::error::Result;
use crate::response::{PostOverview, ThreadResponse};
use crate::store::CommentStore;
use crate::types::PostId;
use std::sync::Arc;
use tracing::debug;

/// Service tying a comment store to the tree builder
#[derive(Clone)]
pub struct ThreadService {
    /// Storage backend
    store: Arc<dyn CommentStore>,
    /// Validator applied to new comments
    validator: Arc<CommentValidator>,
}

impl ThreadService {
    /// Create a service over the given store
    pub fn new(store: impl CommentStore + 'static) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Create a service over a shared store
    pub fn with_store(store: Arc<dyn CommentStore>) -> Self {
        Self {
            store,
            validator: Arc::new(CommentValidator::new()),
        }
    }

    /// Replace the validator
    pub fn with_validator(mut self, validator: CommentValidator) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Fetch a thread and build its forest
    pub fn load_forest(&self, post: &PostId) -> Result<ThreadResponse> {
        Ok(self.load_forest_with_unattached(post)?.0)
    }

    /// Fetch a thread once, returning its forest and the records left out
    pub fn load_forest_with_unattached(
        &self,
        post: &PostId,
    ) -> Result<(ThreadResponse, Vec<Unattached>)> {
        let records = self.fetch(post)?;
        let (response, unattached) = ThreadResponse::with_unattached(&records);

        for dropped in &unattached {
            debug!(
                "Post {}: comment {} not shown ({:?} of {})",
                post, dropped.id, dropped.reason, dropped.parent_id
            );
        }

        Ok((response, unattached))
    }

    /// Validate and append a new comment
    pub fn add_comment(&self, post: &PostId, record: CommentRecord) -> Result<CommentRecord> {
        let thread = self.fetch(post)?;
        self.validator.validate_new(&record, &thread)?;

        self.store
            .append(post, record.clone())
            .map_err(|e| e.with_context(format!("Failed to store comment for post {}", post)))?;

        debug!("Post {}: added comment {}", post, record.id);
        Ok(record)
    }

    /// All posts with the counts of their threads
    pub fn overview(&self) -> Result<Vec<PostOverview>> {
        self.store
            .list_posts()?
            .into_iter()
            .map(|post_id| {
                let summary = self.load_forest(&post_id)?.summary;
                Ok(PostOverview { post_id, summary })
            })
            .collect()
    }

    fn fetch(&self, post: &PostId) -> Result<Vec<CommentRecord>> {
        self.store
            .fetch_thread(post)
            .map_err(|e| e.with_context(format!("Failed to fetch comments for post {}", post)))
    }
}
