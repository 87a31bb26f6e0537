//! Plain-text rendering of an assembled table.

use termtree::Tree;

use crate::arena::NodeId;
use crate::errors::{ConfigError, TableResult};
use crate::table::TreeTable;

/// Render one text tree per top-level node, labelled by the string
/// form of `label_column`.
pub fn to_tree_strings(table: &TreeTable, label_column: &str) -> TableResult<Vec<Tree<String>>> {
    let index = table
        .schema()
        .index_of(label_column)
        .ok_or_else(|| ConfigError::UnknownColumn(label_column.to_string()))?;

    Ok(table
        .roots()
        .iter()
        .map(|&root| build_tree(table, root, index))
        .collect())
}

fn build_tree(table: &TreeTable, node: NodeId, label_col: usize) -> Tree<String> {
    let label = table
        .value_at(node, label_col)
        .map(|v| v.to_string())
        .unwrap_or_default();

    let leaves: Vec<_> = table
        .children(node)
        .iter()
        .map(|&child| build_tree(table, child, label_col))
        .collect();

    Tree::new(label).with_leaves(leaves)
}
