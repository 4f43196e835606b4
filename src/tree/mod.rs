pub mod aggregate;
pub mod arena;

use std::collections::HashMap;

use compact_str::CompactString;

use self::arena::{EntityTree, NodeId, ID_DELIMITER};
use crate::loader::types::RawRecord;

/// Build an EntityTree from the flat list of records (from the loader).
///
/// Siblings keep the order in which their ids were first seen. A repeated
/// `(id, revision)` pair overwrites the earlier weight.
pub fn build_tree(records: &[RawRecord], revisions: usize) -> EntityTree {
    let mut tree = EntityTree::new(revisions);
    if records.is_empty() {
        tracing::warn!("Building tree from zero records");
        return tree;
    }

    tracing::info!(
        "Building tree from {} records across {} revision(s)",
        records.len(),
        revisions
    );

    // Map from full id → NodeId for parent lookups
    let mut path_map: HashMap<CompactString, NodeId> = HashMap::new();
    path_map.insert(CompactString::new(""), tree.root);

    for record in records {
        let id = ensure_node(&mut tree, &mut path_map, &record.id);
        tree.get_mut(id).set_weight(record.weight, record.revision);
    }

    let replaced = aggregate::aggregate_weights(&mut tree);

    tracing::info!(
        "Tree built: {} total nodes, {} direct children of root, {} internal weight(s) replaced",
        tree.len(),
        tree.children(tree.root).len(),
        replaced
    );

    tree
}

/// Ensure a node exists for `id`, creating intermediate ancestors as needed.
/// Iterative, so deep ids cannot overflow the stack.
fn ensure_node(
    tree: &mut EntityTree,
    path_map: &mut HashMap<CompactString, NodeId>,
    id: &str,
) -> NodeId {
    // Fast path: already exists
    if let Some(&node) = path_map.get(id) {
        return node;
    }

    let mut parent = tree.root;
    let mut end = 0;
    for segment in id.split(ID_DELIMITER) {
        end += segment.len();
        let prefix = &id[..end];
        parent = match path_map.get(prefix) {
            Some(&node) => node,
            None => {
                let node = tree.add_child(parent, prefix);
                path_map.insert(CompactString::new(prefix), node);
                node
            }
        };
        end += ID_DELIMITER.len_utf8();
    }

    parent
}
