//! Derived hierarchy projections for the tree and table views.

use crate::model::note::NoteId;
use serde::Serialize;

/// Read-only tree view entity, rebuilt from notes on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: NoteId,
    pub title: String,
    pub description: String,
    pub color: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Returns whether this node has children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total node count of this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }
}

/// One table row produced by flattening a forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatRow {
    pub id: NoteId,
    pub title: String,
    pub description: String,
    /// Title of the immediate ancestor, empty for roots.
    pub parent_title: String,
    /// Depth from the row's root; roots are level 0.
    pub level: usize,
    pub color: String,
}
