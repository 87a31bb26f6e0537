use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::record::Record;

/// Arena index of a node in a [`Forest`].
pub type NodeId = Index;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct Node {
    /// Typed record this node was built from
    pub record: Record,
    /// Index of parent node in the arena, None for top-level nodes
    pub parent: Option<NodeId>,
    /// Indices of child nodes in the arena
    pub children: Vec<NodeId>,
}

/// Arena-based forest of record trees.
///
/// Uses generational arena for memory-safe node references and O(1)
/// lookups. Top-level nodes are kept in insertion order.
#[derive(Debug)]
pub struct Forest {
    /// Arena storage for all nodes
    arena: Arena<Node>,
    /// Indices of top-level nodes, in input row order
    roots: Vec<NodeId>,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a detached node. Wiring happens through [`Forest::attach`]
    /// and [`Forest::push_root`].
    #[instrument(level = "trace", skip(self, record))]
    pub fn insert(&mut self, record: Record) -> NodeId {
        self.arena.insert(Node {
            record,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Append `child` to `parent`'s children. A child already owned by
    /// another parent is moved, keeping it in exactly one children
    /// sequence.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        let previous = self.arena.get(child).and_then(|node| node.parent);
        if let Some(old_parent) = previous {
            if let Some(node) = self.arena.get_mut(old_parent) {
                node.children.retain(|&c| c != child);
            }
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Register a top-level node. Order of calls is preserved.
    #[instrument(level = "trace", skip(self))]
    pub fn push_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[instrument(level = "trace", skip(self))]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> ForestIterator {
        ForestIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    /// Maximum number of levels across all trees. Empty forests have
    /// depth 0.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, id: NodeId) -> usize {
        if let Some(node) = self.get_node(id) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf nodes (nodes with no children) in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        for &root in &self.roots {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, id: NodeId, leaves: &mut Vec<NodeId>) {
        if let Some(node) = self.get_node(id) {
            if node.children.is_empty() {
                leaves.push(id);
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

pub struct ForestIterator<'a> {
    forest: &'a Forest,
    stack: Vec<NodeId>,
}

impl<'a> ForestIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    forest: &'a Forest,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().map(|&r| (r, false)).collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current) {
                if !visited {
                    self.stack.push((current, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current, node));
                }
            }
        }
        None
    }
}
