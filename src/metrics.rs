//! Layout quality measures read from each entity's rectangle history.

use crate::tree::arena::EntityTree;

/// Mean aspect ratio of the leaves laid out for `revision`. 1 is all
/// squares; `None` when no leaf is visible in that revision.
pub fn average_aspect_ratio(tree: &EntityTree, revision: usize) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for entity in tree.nodes.iter().filter(|e| e.is_leaf() && e.weight(revision) > 0.0) {
        if let Some(rect) = entity.rectangle_at(revision) {
            sum += rect.aspect_ratio();
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// Mean distance the top-left corner of a leaf moved between two revisions,
/// over the leaves visible in both. `None` when there are none.
pub fn average_displacement(tree: &EntityTree, from: usize, to: usize) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for entity in tree.nodes.iter().filter(|e| e.is_leaf()) {
        if entity.weight(from) <= 0.0 || entity.weight(to) <= 0.0 {
            continue;
        }
        if let (Some(a), Some(b)) = (entity.rectangle_at(from), entity.rectangle_at(to)) {
            sum += a.corner().distance(b.corner());
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// Both measures for one revision transition, as printed by the tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevisionMetrics {
    pub revision: usize,
    pub aspect_ratio: Option<f64>,
    /// Displacement from the previous revision; `None` for the first one.
    pub displacement: Option<f64>,
}

pub fn revision_metrics(tree: &EntityTree, revision: usize) -> RevisionMetrics {
    RevisionMetrics {
        revision,
        aspect_ratio: average_aspect_ratio(tree, revision),
        displacement: revision
            .checked_sub(1)
            .and_then(|previous| average_displacement(tree, previous, revision)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn tree() -> EntityTree {
        let mut tree = EntityTree::new(2);
        let a = tree.add_child(tree.root, "a");
        let b = tree.add_child(tree.root, "b");
        tree.get_mut(a).weights = vec![1.0, 1.0];
        tree.get_mut(b).weights = vec![1.0, 0.0];
        tree.get_mut(a).set_rectangle(Some(Rect::new(0.0, 0.0, 10.0, 10.0)), 0);
        tree.get_mut(b).set_rectangle(Some(Rect::new(10.0, 0.0, 10.0, 40.0)), 0);
        tree.get_mut(a).set_rectangle(Some(Rect::new(3.0, 4.0, 20.0, 10.0)), 1);
        tree
    }

    #[test]
    fn aspect_ratio_averages_visible_leaves() {
        let tree = tree();
        assert_eq!(average_aspect_ratio(&tree, 0), Some((1.0 + 0.25) / 2.0));
        assert_eq!(average_aspect_ratio(&tree, 1), Some(0.5));
    }

    #[test]
    fn displacement_only_counts_leaves_present_in_both() {
        let tree = tree();
        assert_eq!(average_displacement(&tree, 0, 1), Some(5.0));
        let m = revision_metrics(&tree, 0);
        assert_eq!(m.displacement, None);
    }

    #[test]
    fn empty_tree_has_no_metrics() {
        let tree = EntityTree::new(1);
        assert_eq!(average_aspect_ratio(&tree, 0), None);
    }
}
