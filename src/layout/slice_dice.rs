//! Slice-and-dice: strips in list order, orientation alternating per level.

use crate::geometry::{Cut, Rect};
use crate::tree::arena::{EntityTree, NodeId};

/// The root's children are sliced with vertical cuts, their children with
/// horizontal ones, and so on down the tree.
pub fn layout(tree: &mut EntityTree, bounds: Rect, revision: usize) {
    let root = tree.root;
    tree.get_mut(root).set_rectangle(Some(bounds), revision);
    if tree.get(root).weight(revision) <= 0.0 {
        tracing::debug!("Slice-and-dice: root has no weight at revision {}", revision);
        return;
    }
    layout_children(tree, root, bounds, revision, Cut::Vertical);
}

fn layout_children(tree: &mut EntityTree, parent: NodeId, bounds: Rect, revision: usize, cut: Cut) {
    let children: Vec<NodeId> = tree
        .children(parent)
        .iter()
        .copied()
        .filter(|&id| tree.get(id).weight(revision) > 0.0)
        .collect();
    let total: f64 = children.iter().map(|&id| tree.get(id).weight(revision)).sum();
    if total <= 0.0 {
        return;
    }

    let extent = bounds.extent(cut);
    let mut remaining = bounds;
    for (i, &id) in children.iter().enumerate() {
        // The last strip takes whatever is left so rounding never opens a gap.
        let rect = if i + 1 == children.len() {
            remaining
        } else {
            let (strip, rest) = remaining.split(cut, tree.get(id).weight(revision) / total * extent);
            remaining = rest;
            strip
        };
        tree.get_mut(id).set_rectangle(Some(rect), revision);
    }

    for &id in &children {
        if !tree.get(id).is_leaf() {
            if let Some(rect) = tree.get(id).rectangle() {
                layout_children(tree, id, rect, revision, cut.flipped());
            }
        }
    }
}
