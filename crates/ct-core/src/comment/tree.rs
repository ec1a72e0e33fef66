//! Flat-to-nested thread construction
//!
//! A thread arrives as a flat, ordered list of rows. [`build_comment_tree`]
//! turns it into a two-level forest: every root comment with its direct
//! replies attached. Only one nesting level is materialized; a reply to a
//! reply, or a reply to an id that is not in the thread, is left out of
//! the forest. [`find_unattached`] reports those records for diagnostics.

use super::index::ChildIndex;
use super::model::{CommentForest, CommentNode, CommentRecord};
use crate::types::CommentId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Build the root/reply forest of a thread
///
/// Roots keep their input order, and so do the replies under each root.
/// Duplicate root ids each produce their own node, and every such node
/// receives all replies that point at that id.
pub fn build_comment_tree(flat_comments: &[CommentRecord]) -> CommentForest {
    let index = ChildIndex::build(flat_comments);

    index
        .roots()
        .iter()
        .map(|&pos| {
            let root = &flat_comments[pos];
            let replies = index
                .children_of(&root.id)
                .iter()
                .map(|&child| flat_comments[child].clone())
                .collect();

            CommentNode::new(root.clone()).with_replies(replies)
        })
        .collect()
}

/// Total number of comments in a forest: roots plus their replies
pub fn count_all_comments(forest: &CommentForest) -> usize {
    forest.iter().map(CommentNode::comment_count).sum()
}

/// Why a record did not make it into the forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Parent id matches no record in the thread
    Orphan,
    /// Parent is itself a reply
    NestedReply,
}

/// A record left out of the forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unattached {
    pub id: CommentId,
    pub parent_id: CommentId,
    pub reason: DropReason,
}

/// Records that [`build_comment_tree`] leaves out, in input order
pub fn find_unattached(flat_comments: &[CommentRecord]) -> Vec<Unattached> {
    let index = ChildIndex::build(flat_comments);
    let root_ids = index.root_ids(flat_comments);
    let known_ids: HashSet<&CommentId> = flat_comments.iter().map(|r| &r.id).collect();

    flat_comments
        .iter()
        .filter_map(|record| {
            let parent = record.parent_id.as_ref()?;
            if root_ids.contains(parent) {
                return None;
            }
            let reason = if known_ids.contains(parent) {
                DropReason::NestedReply
            } else {
                DropReason::Orphan
            };
            Some(Unattached {
                id: record.id.clone(),
                parent_id: parent.clone(),
                reason,
            })
        })
        .collect()
}

/// Counts describing a built thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    /// Root comments
    pub roots: usize,
    /// Replies attached under roots
    pub replies: usize,
    /// Records left out of the forest
    pub dropped: usize,
    /// Roots plus replies
    pub total: usize,
}

impl ThreadSummary {
    /// Summarize a forest, given how many records were left out of it
    pub fn compute(forest: &CommentForest, dropped: usize) -> Self {
        let replies = forest.iter().map(|node| node.replies.len()).sum();
        Self {
            roots: forest.len(),
            replies,
            dropped,
            total: count_all_comments(forest),
        }
    }
}
