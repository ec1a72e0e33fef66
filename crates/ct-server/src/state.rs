use std::sync::Arc;

use ct_core::comment::CommentValidator;
use ct_core::config::Config;
use ct_core::store::CommentStore;
use ct_core::thread::ThreadService;

#[derive(Clone)]
pub struct AppState {
    pub service: ThreadService,
}

impl AppState {
    pub fn new(store: Arc<dyn CommentStore>, config: &Config) -> Self {
        let service = ThreadService::with_store(store)
            .with_validator(CommentValidator::from_config(&config.thread));

        Self { service }
    }
}
