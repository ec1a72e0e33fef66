//! ct-core - Core library for comment-thread
//!
//! This crate provides the core logic of the comment-thread service:
//! comment records, the root/reply tree builder, validation, the
//! storage trait, and the JSON response shapes.

pub mod comment;
pub mod config;
pub mod error;
pub mod response;
pub mod store;
pub mod thread;
pub mod types;

pub use comment::{build_comment_tree, count_all_comments};
pub use error::{Result, ThreadError};
pub use types::*;
