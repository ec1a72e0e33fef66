//! Comment system module
//!
//! Handles comment records, thread tree construction, indexing, and validation.

pub mod builder;
pub mod index;
pub mod model;
pub mod tree;
pub mod validator;

pub use builder::CommentRecordBuilder;
pub use index::ChildIndex;
pub use model::*;
pub use tree::{
    build_comment_tree, count_all_comments, find_unattached, DropReason, ThreadSummary,
    Unattached,
};
pub use validator::CommentValidator;
