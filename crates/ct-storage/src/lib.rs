//! ct-storage - Storage library for comment-thread
//!
//! This crate provides the file system implementation of the comment store.

mod thread_store;

pub use thread_store::{FileSystemStore, ThreadFile, CURRENT_SCHEMA_VERSION};
