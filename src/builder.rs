//! Links flat typed records into a forest of nodes.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, warn};

use crate::arena::{Forest, NodeId};
use crate::config::LinkMode;
use crate::errors::{TableError, TableResult};
use crate::record::Record;

/// Assembles records into trees using one of the two linkage modes.
///
/// Holds only configuration; every [`TreeBuilder::build`] call works on
/// fresh lookup state and a fresh forest, so independent runs never
/// share anything.
pub struct TreeBuilder {
    mode: LinkMode,
    id_col: usize,
    link_col: usize,
}

impl TreeBuilder {
    pub fn new(mode: LinkMode, id_col: usize, link_col: usize) -> Self {
        Self {
            mode,
            id_col,
            link_col,
        }
    }

    /// Build the forest.
    ///
    /// The id lookup is completed over every record before any
    /// relationship is wired, so a reference always binds to the last
    /// record claiming an id, wherever the referencing row sits. Ids
    /// are compared by the string form of the id cell. Dangling
    /// references degrade: the referencing row stays top-level in
    /// parent mode, the listed id is skipped in child mode.
    #[instrument(level = "debug", skip(self, records))]
    pub fn build(&self, records: Vec<Record>) -> TableResult<Forest> {
        let mut forest = Forest::new();
        let mut order = Vec::with_capacity(records.len());
        let mut lookup: HashMap<String, NodeId> = HashMap::new();

        // Pass 1: create every node and complete the id lookup.
        for record in records {
            let id = cell_text(&record, self.id_col);
            let node = forest.insert(record);
            order.push(node);
            if let Some(shadowed) = lookup.insert(id.clone(), node) {
                warn!(
                    "build: duplicate id {:?}, later row replaces {:?} as lookup target",
                    id, shadowed
                );
            }
        }

        // Pass 2: wire relationships in row order.
        match self.mode {
            LinkMode::Parent => self.wire_parents(&mut forest, &order, &lookup),
            LinkMode::Child => self.wire_children(&mut forest, &order, &lookup),
        }

        // Pass 3: parentless nodes become top-level, in row order.
        for &node in &order {
            let is_top_level = forest
                .get_node(node)
                .map(|n| n.parent.is_none())
                .unwrap_or(false);
            if is_top_level {
                forest.push_root(node);
            }
        }

        self.ensure_acyclic(&forest, &order)?;

        debug!(
            "build: {} nodes, {} top-level",
            forest.node_count(),
            forest.roots().len()
        );
        Ok(forest)
    }

    fn wire_parents(
        &self,
        forest: &mut Forest,
        order: &[NodeId],
        lookup: &HashMap<String, NodeId>,
    ) {
        for &node in order {
            let reference = node_cell_text(forest, node, self.link_col);
            if reference.is_empty() {
                continue;
            }
            match lookup.get(&reference) {
                Some(&parent) => forest.attach(parent, node),
                None => debug!(
                    "wire_parents: dangling parent id {:?}, row stays top-level",
                    reference
                ),
            }
        }
    }

    fn wire_children(
        &self,
        forest: &mut Forest,
        order: &[NodeId],
        lookup: &HashMap<String, NodeId>,
    ) {
        for &node in order {
            let list = node_cell_text(forest, node, self.link_col);
            if list.is_empty() {
                continue;
            }
            for candidate in list.split(',') {
                let id = candidate.trim();
                match lookup.get(id) {
                    // A child listed by two rows ends up under the later
                    // lister; attach moves it.
                    Some(&child) => forest.attach(node, child),
                    None => debug!("wire_children: unknown child id {:?} skipped", id),
                }
            }
        }
    }

    /// A group of nodes whose parent chain never reaches a top-level
    /// node is unreachable from the roots; the input described a cycle.
    fn ensure_acyclic(&self, forest: &Forest, order: &[NodeId]) -> TableResult<()> {
        let mut reachable: HashSet<NodeId> = HashSet::with_capacity(order.len());
        for (node, _) in forest.iter() {
            reachable.insert(node);
        }
        if reachable.len() == forest.node_count() {
            return Ok(());
        }
        for &node in order {
            if !reachable.contains(&node) {
                let id = node_cell_text(forest, node, self.id_col);
                return Err(TableError::CycleDetected(id));
            }
        }
        Ok(())
    }
}

fn cell_text(record: &Record, col: usize) -> String {
    record
        .value(col)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

fn node_cell_text(forest: &Forest, node: NodeId, col: usize) -> String {
    forest
        .get_node(node)
        .map(|n| cell_text(&n.record, col))
        .unwrap_or_default()
}
