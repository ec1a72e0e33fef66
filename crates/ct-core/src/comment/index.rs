//! Parent-to-children index for fast reply lookup

use super::model::CommentRecord;
use crate::types::CommentId;
use std::collections::{HashMap, HashSet};

/// Children of every parent id, in input order
///
/// Built in a single pass over a thread. Positions refer back into the
/// slice the index was built from.
#[derive(Debug, Clone, Default)]
pub struct ChildIndex {
    /// Child positions by parent ID
    by_parent: HashMap<CommentId, Vec<usize>>,
    /// Positions of records without a parent
    roots: Vec<usize>,
}

impl ChildIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a thread
    pub fn build(records: &[CommentRecord]) -> Self {
        let mut index = Self::new();
        for (pos, record) in records.iter().enumerate() {
            index.add(pos, record);
        }
        index
    }

    /// Add the record found at `pos`
    pub fn add(&mut self, pos: usize, record: &CommentRecord) {
        match &record.parent_id {
            Some(parent) => self.by_parent.entry(parent.clone()).or_default().push(pos),
            None => self.roots.push(pos),
        }
    }

    /// Positions of records without a parent
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Positions of the direct children of `parent`
    pub fn children_of(&self, parent: &CommentId) -> &[usize] {
        self.by_parent
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of all roots
    pub fn root_ids<'a>(&self, records: &'a [CommentRecord]) -> HashSet<&'a CommentId> {
        self.roots.iter().map(|&pos| &records[pos].id).collect()
    }
}
