//! Expanded/collapsed state for the tree view.

use crate::model::note::NoteId;
use crate::model::tree::{FlatRow, TreeNode};
use crate::tree::forest::flatten_filtered;
use std::collections::HashSet;

/// Set of expanded tree node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeExpansion {
    expanded: HashSet<NoteId>,
}

impl TreeExpansion {
    /// Starts with every root expanded and everything below collapsed.
    pub fn for_forest(forest: &[TreeNode]) -> Self {
        Self {
            expanded: forest.iter().map(|node| node.id.clone()).collect(),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flips one node and returns its new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn expand_all(&mut self, forest: &[TreeNode]) {
        let mut stack: Vec<&TreeNode> = forest.iter().collect();
        while let Some(node) = stack.pop() {
            self.expanded.insert(node.id.clone());
            stack.extend(node.children.iter());
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Drops ids that no longer exist in `forest`.
    pub fn retain_present(&mut self, forest: &[TreeNode]) {
        let mut present = HashSet::new();
        let mut stack: Vec<&TreeNode> = forest.iter().collect();
        while let Some(node) = stack.pop() {
            present.insert(node.id.as_str());
            stack.extend(node.children.iter());
        }
        self.expanded.retain(|id| present.contains(id.as_str()));
    }

    /// Rows currently visible: a node's children show only when it is expanded.
    pub fn visible_rows(&self, forest: &[TreeNode]) -> Vec<FlatRow> {
        let mut rows = Vec::new();
        flatten_filtered(forest, &|node| self.is_expanded(node.id.as_str()), &mut rows);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::TreeExpansion;
    use crate::model::tree::TreeNode;

    fn node(id: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            color: "#ffcc80".to_string(),
            children,
        }
    }

    fn sample() -> Vec<TreeNode> {
        vec![node("a", vec![node("b", vec![node("c", vec![])])])]
    }

    #[test]
    fn roots_start_expanded() {
        let forest = sample();
        let expansion = TreeExpansion::for_forest(&forest);
        let ids: Vec<_> = expansion
            .visible_rows(&forest)
            .into_iter()
            .map(|row| row.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn toggle_and_bulk_operations() {
        let forest = sample();
        let mut expansion = TreeExpansion::for_forest(&forest);

        assert!(!expansion.toggle("a"));
        assert_eq!(expansion.visible_rows(&forest).len(), 1);

        expansion.expand_all(&forest);
        assert_eq!(expansion.visible_rows(&forest).len(), 3);

        expansion.collapse_all();
        assert!(!expansion.is_expanded("a"));
    }

    #[test]
    fn retain_present_forgets_deleted_nodes() {
        let forest = sample();
        let mut expansion = TreeExpansion::default();
        expansion.toggle("gone");
        expansion.toggle("b");
        expansion.retain_present(&forest);
        assert!(!expansion.is_expanded("gone"));
        assert!(expansion.is_expanded("b"));
    }
}
