//! Forest building and flattening.

use crate::model::note::{Connection, Note};
use crate::model::tree::{FlatRow, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which signal decides parent/child placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hierarchy<'a> {
    /// `Note::parent_id` links.
    ParentLinks,
    /// Explicit connections; a connection source is the parent of its target.
    Connections(&'a [Connection]),
}

/// Hierarchy signal selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyMode {
    #[default]
    Connections,
    ParentLinks,
}

impl HierarchyMode {
    /// Binds this mode to the connection list it would read.
    pub fn with_connections(self, connections: &[Connection]) -> Hierarchy<'_> {
        match self {
            Self::Connections => Hierarchy::Connections(connections),
            Self::ParentLinks => Hierarchy::ParentLinks,
        }
    }
}

/// Builds a forest of tree nodes from the flat note list.
///
/// # Contract
/// - Roots keep the relative order of `notes`; so do siblings.
/// - Dangling parent links and connections to missing notes are ignored,
///   which makes the affected note a root.
/// - A note expands its children only where it is first placed; any later
///   occurrence (a cycle revisit or a second parent) is a leaf, so the
///   forest holds at most `notes + child links` nodes.
/// - Notes reachable from no root (pure cycles) are promoted to extra roots
///   in collection order, so every note appears at least once.
pub fn build_forest(notes: &[Note], hierarchy: Hierarchy<'_>) -> Vec<TreeNode> {
    let index = ChildIndex::new(notes, hierarchy);
    let mut placed = HashSet::new();
    let mut forest = Vec::with_capacity(index.roots.len());

    for &root in &index.roots {
        forest.push(index.build_node(root, &mut placed));
    }
    for (position, note) in notes.iter().enumerate() {
        if !placed.contains(note.id.as_str()) {
            forest.push(index.build_node(position, &mut placed));
        }
    }
    forest
}

/// Flattens a forest depth-first, pre-order, into table rows.
pub fn flatten(forest: &[TreeNode]) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    flatten_filtered(forest, &|_| true, &mut rows);
    rows
}

/// Flattens a forest but only descends into nodes accepted by `descend`.
pub(crate) fn flatten_filtered(
    forest: &[TreeNode],
    descend: &dyn Fn(&TreeNode) -> bool,
    rows: &mut Vec<FlatRow>,
) {
    for node in forest {
        push_rows(node, "", 0, descend, rows);
    }
}

fn push_rows(
    node: &TreeNode,
    parent_title: &str,
    level: usize,
    descend: &dyn Fn(&TreeNode) -> bool,
    rows: &mut Vec<FlatRow>,
) {
    rows.push(FlatRow {
        id: node.id.clone(),
        title: node.title.clone(),
        description: node.description.clone(),
        parent_title: parent_title.to_string(),
        level,
        color: node.color.clone(),
    });
    if !descend(node) {
        return;
    }
    for child in &node.children {
        push_rows(child, node.title.as_str(), level + 1, descend, rows);
    }
}

struct ChildIndex<'a> {
    notes: &'a [Note],
    roots: Vec<usize>,
    children: HashMap<&'a str, Vec<usize>>,
}

impl<'a> ChildIndex<'a> {
    fn new(notes: &'a [Note], hierarchy: Hierarchy<'a>) -> Self {
        let mut positions: HashMap<&'a str, usize> = HashMap::with_capacity(notes.len());
        for (position, note) in notes.iter().enumerate() {
            positions.entry(note.id.as_str()).or_insert(position);
        }

        let mut roots = Vec::new();
        let mut children: HashMap<&'a str, Vec<usize>> = HashMap::new();
        match hierarchy {
            Hierarchy::ParentLinks => {
                for (position, note) in notes.iter().enumerate() {
                    match note.parent_id.as_deref() {
                        Some(parent) if positions.contains_key(parent) => {
                            children.entry(parent).or_default().push(position);
                        }
                        _ => roots.push(position),
                    }
                }
            }
            Hierarchy::Connections(connections) => {
                let mut targets = HashSet::new();
                for edge in connections {
                    let (Some(&from), Some(&to)) = (
                        positions.get(edge.from.as_str()),
                        positions.get(edge.to.as_str()),
                    ) else {
                        continue;
                    };
                    targets.insert(notes[to].id.as_str());
                    children
                        .entry(notes[from].id.as_str())
                        .or_default()
                        .push(to);
                }
                for (position, note) in notes.iter().enumerate() {
                    if !targets.contains(note.id.as_str()) {
                        roots.push(position);
                    }
                }
                for kids in children.values_mut() {
                    kids.sort_unstable();
                    kids.dedup();
                }
            }
        }

        Self {
            notes,
            roots,
            children,
        }
    }

    fn build_node(&self, position: usize, placed: &mut HashSet<&'a str>) -> TreeNode {
        let note = &self.notes[position];
        let id = note.id.as_str();

        let mut children = Vec::new();
        if placed.insert(id) {
            if let Some(kids) = self.children.get(id) {
                for &kid in kids {
                    children.push(self.build_node(kid, placed));
                }
            }
        }

        TreeNode {
            id: note.id.clone(),
            title: note.title.clone(),
            description: note.description.clone(),
            color: note.color.clone(),
            children,
        }
    }
}
