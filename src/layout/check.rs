//! Partition checks used by the integration tests and `debug-layout`.

use std::fmt;

use crate::geometry::Rect;
use crate::tree::arena::{EntityTree, NodeId};

/// Relative tolerance for area comparisons.
pub const AREA_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A visible child of a laid-out parent got no rectangle.
    Missing { id: NodeId },
    NonFinite { id: NodeId, rect: Rect },
    /// Visible children do not add up to their parent's area.
    AreaMismatch { parent: NodeId, expected: f64, actual: f64 },
    /// A child sticks out of its parent.
    Escapes { id: NodeId, parent: NodeId },
    Overlap { a: NodeId, b: NodeId, area: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing { id } => write!(f, "node {} has weight but no rectangle", id.0),
            Violation::NonFinite { id, rect } => write!(f, "node {} has non-finite rectangle {:?}", id.0, rect),
            Violation::AreaMismatch {
                parent,
                expected,
                actual,
            } => write!(
                f,
                "children of node {} cover {:.6} instead of {:.6}",
                parent.0, actual, expected
            ),
            Violation::Escapes { id, parent } => write!(f, "node {} escapes its parent {}", id.0, parent.0),
            Violation::Overlap { a, b, area } => write!(f, "nodes {} and {} overlap by {:.6}", a.0, b.0, area),
        }
    }
}

/// Walk every laid-out parent and verify its visible children tile it.
pub fn check_partition(tree: &EntityTree, revision: usize) -> Vec<Violation> {
    let mut violations = Vec::new();

    for parent in tree.flatten() {
        let entity = tree.get(parent);
        if entity.is_leaf() || entity.weight(revision) <= 0.0 {
            continue;
        }
        let Some(bounds) = entity.rectangle_at(revision) else {
            continue;
        };

        let mut placed: Vec<(NodeId, Rect)> = Vec::new();
        for &child in tree.children(parent) {
            if tree.get(child).weight(revision) <= 0.0 {
                continue;
            }
            match tree.get(child).rectangle_at(revision) {
                None => violations.push(Violation::Missing { id: child }),
                Some(rect) if !rect.is_finite() => violations.push(Violation::NonFinite { id: child, rect }),
                Some(rect) => placed.push((child, rect)),
            }
        }
        if placed.is_empty() {
            continue;
        }

        let tolerance = AREA_TOLERANCE * bounds.area().max(1.0);
        let actual: f64 = placed.iter().map(|(_, r)| r.area()).sum();
        if (actual - bounds.area()).abs() > tolerance {
            violations.push(Violation::AreaMismatch {
                parent,
                expected: bounds.area(),
                actual,
            });
        }

        let slack = AREA_TOLERANCE * bounds.width.max(bounds.height).max(1.0);
        for &(id, r) in &placed {
            if r.x < bounds.x - slack
                || r.y < bounds.y - slack
                || r.right() > bounds.right() + slack
                || r.bottom() > bounds.bottom() + slack
            {
                violations.push(Violation::Escapes { id, parent });
            }
        }

        for (i, &(a, ra)) in placed.iter().enumerate() {
            for &(b, rb) in &placed[i + 1..] {
                let area = ra.overlap_area(&rb);
                if area > tolerance {
                    violations.push(Violation::Overlap { a, b, area });
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(left: Rect, right: Rect) -> (EntityTree, NodeId, NodeId) {
        let mut tree = EntityTree::new(1);
        let a = tree.add_child(tree.root, "a");
        let b = tree.add_child(tree.root, "b");
        tree.get_mut(a).weights = vec![1.0];
        tree.get_mut(b).weights = vec![1.0];
        tree.get_mut(tree.root).weights = vec![2.0];
        let root = tree.root;
        tree.get_mut(root).set_rectangle(Some(Rect::new(0.0, 0.0, 10.0, 10.0)), 0);
        tree.get_mut(a).set_rectangle(Some(left), 0);
        tree.get_mut(b).set_rectangle(Some(right), 0);
        (tree, a, b)
    }

    #[test]
    fn clean_tiling_passes() {
        let (tree, _, _) = pair(Rect::new(0.0, 0.0, 5.0, 10.0), Rect::new(5.0, 0.0, 5.0, 10.0));
        assert!(check_partition(&tree, 0).is_empty());
    }

    #[test]
    fn overlap_and_escape_are_reported() {
        let (tree, a, b) = pair(Rect::new(0.0, 0.0, 6.0, 10.0), Rect::new(5.0, 0.0, 6.0, 10.0));
        let violations = check_partition(&tree, 0);
        assert!(violations.contains(&Violation::Escapes { id: b, parent: tree.root }));
        assert!(violations.iter().any(|v| matches!(v, Violation::Overlap { a: x, b: y, .. } if *x == a && *y == b)));
        assert!(violations.iter().any(|v| matches!(v, Violation::AreaMismatch { .. })));
    }

    #[test]
    fn missing_rectangle_is_reported() {
        let mut tree = EntityTree::new(1);
        let a = tree.add_child(tree.root, "a");
        tree.get_mut(a).weights = vec![1.0];
        tree.get_mut(tree.root).weights = vec![1.0];
        let root = tree.root;
        tree.get_mut(root).set_rectangle(Some(Rect::new(0.0, 0.0, 1.0, 1.0)), 0);
        assert_eq!(check_partition(&tree, 0), vec![Violation::Missing { id: a }]);
    }
}
