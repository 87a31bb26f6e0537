//! The frozen result of a pipeline run: resolved schema plus forest.

use crate::arena::{Forest, ForestIterator, Node, NodeId, PostOrderIterator};
use crate::record::Record;
use crate::schema::{Schema, Value};

/// Read-only view over the assembled hierarchy.
///
/// A presentation layer gets typed cell access by column name or
/// position, the ordered top-level nodes, and traversal helpers. All
/// interaction state (selection, expansion, sorting) belongs to the
/// caller, not to this structure.
#[derive(Debug)]
pub struct TreeTable {
    schema: Schema,
    forest: Forest,
}

impl TreeTable {
    pub fn new(schema: Schema, forest: Forest) -> Self {
        Self { schema, forest }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Top-level nodes, in input row order.
    pub fn roots(&self) -> &[NodeId] {
        self.forest.roots()
    }

    /// Child nodes of `id`, in wiring order. Unknown ids have no
    /// children.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.forest
            .get_node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.forest.get_node(id)
    }

    pub fn record(&self, id: NodeId) -> Option<&Record> {
        self.forest.get_node(id).map(|node| &node.record)
    }

    /// Typed cell of a node by column name.
    pub fn value(&self, id: NodeId, column: &str) -> Option<&Value> {
        let index = self.schema.index_of(column)?;
        self.value_at(id, index)
    }

    /// Typed cell of a node by column position.
    pub fn value_at(&self, id: NodeId, index: usize) -> Option<&Value> {
        self.record(id).and_then(|record| record.value(index))
    }

    pub fn node_count(&self) -> usize {
        self.forest.node_count()
    }

    pub fn depth(&self) -> usize {
        self.forest.depth()
    }

    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.forest.leaf_nodes()
    }

    /// Preorder traversal over all trees, row order among roots.
    pub fn iter(&self) -> ForestIterator {
        self.forest.iter()
    }

    pub fn iter_postorder(&self) -> PostOrderIterator {
        self.forest.iter_postorder()
    }
}
