//! Ordered treemap (Shneiderman & Wattenberg): pivot-based, keeps sibling order.

use crate::geometry::{Cut, Rect};
use crate::tree::arena::{EntityTree, NodeId};

/// How the pivot of a group of four or more siblings is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotPolicy {
    /// The element at index `n / 2`.
    Middle,
    /// The first element of maximum weight.
    Size,
}

impl PivotPolicy {
    fn pivot_index(self, items: &[(NodeId, f64)]) -> usize {
        match self {
            PivotPolicy::Middle => items.len() / 2,
            PivotPolicy::Size => {
                let mut best = 0;
                for (i, &(_, w)) in items.iter().enumerate() {
                    if w > items[best].1 {
                        best = i;
                    }
                }
                best
            }
        }
    }
}

pub fn layout(tree: &mut EntityTree, bounds: Rect, revision: usize, policy: PivotPolicy) {
    let root = tree.root;
    tree.get_mut(root).set_rectangle(Some(bounds), revision);
    layout_children(tree, root, bounds, revision, policy);
}

fn layout_children(tree: &mut EntityTree, parent: NodeId, bounds: Rect, revision: usize, policy: PivotPolicy) {
    let children = tree.children(parent).to_vec();
    let items: Vec<(NodeId, f64)> = children
        .iter()
        .map(|&id| (id, tree.get(id).weight(revision)))
        .filter(|&(_, w)| w > 0.0)
        .collect();

    let mut placed = Vec::with_capacity(items.len());
    partition(&items, bounds, policy, &mut placed);
    for (id, rect) in placed {
        tree.get_mut(id).set_rectangle(Some(rect), revision);
    }

    for &id in &children {
        let child = tree.get(id);
        if !child.is_leaf() && child.weight(revision) > 0.0 {
            if let Some(rect) = child.rectangle() {
                layout_children(tree, id, rect, revision, policy);
            }
        }
    }
}

/// Lay out one group of positive-weight siblings inside `bounds`.
fn partition(items: &[(NodeId, f64)], bounds: Rect, policy: PivotPolicy, out: &mut Vec<(NodeId, Rect)>) {
    let total: f64 = items.iter().map(|&(_, w)| w).sum();
    if items.is_empty() || total <= 0.0 {
        return;
    }
    // Splits run along the longer side.
    let cut = Cut::for_rect(&bounds);

    match items {
        [(only, _)] => out.push((*only, bounds)),
        [(a, wa), (b, _)] => {
            let (ra, rb) = bounds.split(cut, wa / total * bounds.extent(cut));
            out.push((*a, ra));
            out.push((*b, rb));
        }
        [(a, wa), rest @ ..] if rest.len() == 2 => {
            let (ra, remainder) = bounds.split(cut, wa / total * bounds.extent(cut));
            out.push((*a, ra));
            partition(rest, remainder, policy, out);
        }
        _ => partition_around_pivot(items, total, bounds, cut, policy, out),
    }
}

fn partition_around_pivot(
    items: &[(NodeId, f64)],
    total: f64,
    bounds: Rect,
    cut: Cut,
    policy: PivotPolicy,
    out: &mut Vec<(NodeId, Rect)>,
) {
    let normalizer = bounds.area() / total;
    let p = policy.pivot_index(items);
    let (pivot, pivot_weight) = items[p];
    let pivot_area = pivot_weight * normalizer;

    let l1 = &items[..p];
    let after = &items[p + 1..];

    // R1 takes L1's share of the long side; the pivot starts out spanning the
    // full cross extent of what is left.
    let l1_weight: f64 = l1.iter().map(|&(_, w)| w).sum();
    let (r1, rest) = bounds.split(cut, l1_weight / total * bounds.extent(cut));
    let cross = rest.extent(cut.flipped());
    let mut r = rest.split(cut, pivot_area / cross).0;
    let mut best_ratio = r.aspect_ratio();

    // Grow L2 from the front of L3 while the pivot gets squarer.
    let mut l2_len = 0;
    while after.len() - l2_len > 2 {
        let l2_area: f64 = after[..=l2_len].iter().map(|&(_, w)| w * normalizer).sum();
        let band = (pivot_area + l2_area) / cross;
        let pivot_cross = pivot_area / (pivot_area + l2_area) * cross;
        let candidate = match cut {
            Cut::Vertical => Rect::new(rest.x, rest.y, band, pivot_cross),
            Cut::Horizontal => Rect::new(rest.x, rest.y, pivot_cross, band),
        };
        let ratio = candidate.aspect_ratio();
        if ratio < best_ratio {
            break;
        }
        r = candidate;
        best_ratio = ratio;
        l2_len += 1;
    }

    let (l2, l3) = after.split_at(l2_len);
    out.push((pivot, r));

    partition(l1, r1, policy, out);
    let band_extent = r.extent(cut);
    if !l2.is_empty() {
        let r2 = match cut {
            Cut::Vertical => Rect::new(rest.x, rest.y + r.height, r.width, rest.height - r.height),
            Cut::Horizontal => Rect::new(rest.x + r.width, rest.y, rest.width - r.width, r.height),
        };
        partition(l2, r2, policy, out);
    }
    let r3 = rest.split(cut, band_extent).1;
    partition(l3, r3, policy, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn ids(n: usize) -> Vec<NodeId> {
        (0..n as u32).map(NodeId).collect()
    }

    fn run(weights: &[f64], bounds: Rect, policy: PivotPolicy) -> Vec<(NodeId, Rect)> {
        let items: Vec<(NodeId, f64)> = ids(weights.len()).into_iter().zip(weights.iter().copied()).collect();
        let mut out = Vec::new();
        partition(&items, bounds, policy, &mut out);
        out.sort_by_key(|(id, _)| *id);
        out
    }

    #[test]
    fn two_elements_split_the_long_side() {
        let out = run(&[4.0, 6.0], Rect::new(0.0, 0.0, 100.0, 50.0), PivotPolicy::Middle);
        assert_eq!(out[0].1, Rect::new(0.0, 0.0, 40.0, 50.0));
        assert_eq!(out[1].1, Rect::new(40.0, 0.0, 60.0, 50.0));
    }

    #[test]
    fn three_elements_peel_the_first_then_split() {
        let out = run(&[2.0, 1.0, 1.0], Rect::new(0.0, 0.0, 40.0, 10.0), PivotPolicy::Middle);
        assert_eq!(out[0].1, Rect::new(0.0, 0.0, 20.0, 10.0));
        // Remainder is 20x10, still wide: split side by side.
        assert_eq!(out[1].1, Rect::new(20.0, 0.0, 10.0, 10.0));
        assert_eq!(out[2].1, Rect::new(30.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn pivot_policies_pick_expected_element() {
        let items: Vec<(NodeId, f64)> = ids(5).into_iter().zip([1.0, 9.0, 2.0, 9.0, 3.0]).collect();
        assert_eq!(PivotPolicy::Middle.pivot_index(&items), 2);
        assert_eq!(PivotPolicy::Size.pivot_index(&items), 1);
    }

    #[test]
    fn larger_groups_conserve_area_without_overlap() {
        let weights = [5.0, 1.0, 3.0, 8.0, 2.0, 2.0, 6.0, 1.0, 4.0];
        let bounds = Rect::new(10.0, 20.0, 300.0, 180.0);
        for policy in [PivotPolicy::Middle, PivotPolicy::Size] {
            let out = run(&weights, bounds, policy);
            assert_eq!(out.len(), weights.len());
            let total: f64 = weights.iter().sum();
            for ((_, r), w) in out.iter().zip(weights) {
                assert!(close(r.area(), w / total * bounds.area()), "{policy:?} {r:?}");
                assert!(r.x >= bounds.x - 1e-9 && r.right() <= bounds.right() + 1e-9);
                assert!(r.y >= bounds.y - 1e-9 && r.bottom() <= bounds.bottom() + 1e-9);
            }
            for i in 0..out.len() {
                for j in i + 1..out.len() {
                    assert!(out[i].1.overlap_area(&out[j].1) < 1e-6, "{policy:?}");
                }
            }
        }
    }

    #[test]
    fn tree_layout_skips_zero_weights() {
        let mut tree = EntityTree::new(1);
        let a = tree.add_child(tree.root, "a");
        let b = tree.add_child(tree.root, "b");
        let c = tree.add_child(tree.root, "c");
        tree.get_mut(a).weights = vec![4.0];
        tree.get_mut(b).weights = vec![0.0];
        tree.get_mut(c).weights = vec![6.0];
        tree.get_mut(tree.root).weights = vec![10.0];

        layout(&mut tree, Rect::new(0.0, 0.0, 100.0, 50.0), 0, PivotPolicy::Middle);
        assert_eq!(tree.get(a).rectangle(), Some(Rect::new(0.0, 0.0, 40.0, 50.0)));
        assert_eq!(tree.get(b).rectangle(), None);
        assert_eq!(tree.get(c).rectangle(), Some(Rect::new(40.0, 0.0, 60.0, 50.0)));
    }
}
