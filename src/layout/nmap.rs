//! Nmap (Duarte et al.): recursive bisection driven by anchor points, so each
//! entity stays near where the first revision put it.
//!
//! Anchors come from a squarified pass over every entity's largest weight.
//! Each sibling group is split in two along its anchor order, both halves are
//! rescaled to their weight share with an affine map, and each entity's
//! moving point is its anchor seen through the maps accumulated on the way
//! down the recursion.

use super::squarify;
use crate::geometry::{Affine, Cut, Point, Rect};
use crate::tree::arena::{EntityTree, NodeId};

/// How a group is divided at each level of the bisection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NmapPolicy {
    /// Split the list in half, alternating cut orientation per level.
    AlternateCut,
    /// Split where the two halves' weights are closest, cutting across the
    /// longer side of the current container.
    EqualWeight,
}

/// Working copy of one entity while its sibling group is being bisected.
#[derive(Debug, Clone, Copy)]
struct Site {
    id: NodeId,
    anchor: Point,
    moving: Point,
    /// Accumulated map from the anchor frame into the current container.
    frame: Affine,
    weight: f64,
}

pub fn layout(tree: &mut EntityTree, bounds: Rect, revision: usize, policy: NmapPolicy) {
    let root = tree.root;
    if revision == 0 || tree.get(root).anchor_point.is_none() {
        tracing::debug!("Nmap: seeding anchors at revision {}", revision);
        squarify::seed_anchors(tree, bounds);
    }
    tree.get_mut(root).set_rectangle(Some(bounds), revision);
    layout_children(tree, root, bounds, revision, policy);
}

fn layout_children(tree: &mut EntityTree, parent: NodeId, bounds: Rect, revision: usize, policy: NmapPolicy) {
    let mut sites: Vec<Site> = tree
        .children(parent)
        .iter()
        .filter_map(|&id| {
            let entity = tree.get(id);
            let weight = entity.weight(revision);
            if weight <= 0.0 {
                return None;
            }
            let anchor = entity.anchor_point.unwrap_or_else(|| {
                tracing::warn!("Nmap: '{}' has no anchor, using container center", entity.id);
                bounds.center()
            });
            Some(Site {
                id,
                anchor,
                moving: anchor,
                frame: Affine::IDENTITY,
                weight,
            })
        })
        .collect();
    if sites.is_empty() {
        return;
    }

    let mut placed = Vec::with_capacity(sites.len());
    let first_cut = Cut::for_rect(&bounds);
    bisect(&mut sites, bounds, first_cut, policy, &mut placed);

    for &(id, rect, moving) in &placed {
        let entity = tree.get_mut(id);
        entity.set_rectangle(Some(rect), revision);
        entity.moving_point = Some(moving);
    }

    for (id, rect, _) in placed {
        if !tree.get(id).is_leaf() {
            layout_children(tree, id, rect, revision, policy);
        }
    }
}

fn bisect(sites: &mut [Site], bounds: Rect, cut: Cut, policy: NmapPolicy, out: &mut Vec<(NodeId, Rect, Point)>) {
    if let [only] = sites {
        out.push((only.id, bounds, only.moving));
        return;
    }
    if sites.is_empty() {
        return;
    }

    let cut = match policy {
        NmapPolicy::AlternateCut => cut,
        NmapPolicy::EqualWeight => Cut::for_rect(&bounds),
    };

    // Ordered by anchor x whichever way the cut runs.
    sites.sort_by(|a, b| a.anchor.x.total_cmp(&b.anchor.x));

    let split_at = match policy {
        NmapPolicy::AlternateCut => sites.len() / 2,
        NmapPolicy::EqualWeight => balanced_split(sites),
    };
    let (a, b) = sites.split_at_mut(split_at);

    let sum_a: f64 = a.iter().map(|s| s.weight).sum();
    let sum_b: f64 = b.iter().map(|s| s.weight).sum();
    let extent = bounds.extent(cut);
    let (target_a, target_b) = bounds.split(cut, sum_a / (sum_a + sum_b) * extent);

    // Halfway between the last A and the first B point, in the current frame.
    let origin = bounds.origin(cut);
    let boundary = ((a[a.len() - 1].moving.along(cut) + b[0].moving.along(cut)) / 2.0).clamp(origin, origin + extent);
    let (candidate_a, candidate_b) = bounds.split(cut, boundary - origin);

    let rect_a = remap(a, &candidate_a, &target_a);
    let rect_b = remap(b, &candidate_b, &target_b);

    bisect(a, rect_a, cut.flipped(), policy, out);
    bisect(b, rect_b, cut.flipped(), policy, out);
}

/// Map `candidate` onto `target`, carrying the half's moving points along.
fn remap(half: &mut [Site], candidate: &Rect, target: &Rect) -> Rect {
    let Some(transform) = Affine::fit(candidate, target) else {
        tracing::debug!("Nmap: degenerate candidate {:?}, moving points left as is", candidate);
        return *target;
    };
    for site in half.iter_mut() {
        site.frame = site.frame.then(&transform);
        site.moving = site.frame.apply(site.anchor);
    }

    // The mapped candidate is the target up to rounding; the target itself is
    // returned so a steep map cannot push the half out of its container.
    let mapped = transform.apply_rect(candidate);
    let drift = (mapped.x - target.x).abs().max((mapped.right() - target.right()).abs());
    let drift = drift.max((mapped.y - target.y).abs()).max((mapped.bottom() - target.bottom()).abs());
    if drift > 1e-6 * target.width.max(target.height).max(1.0) {
        tracing::debug!("Nmap: candidate mapped to {:?}, snapping to {:?}", mapped, target);
    }
    *target
}

/// Prefix length whose weight best balances the rest, scanning left to right
/// and stopping at the first step that does not improve. Always in `1..n`.
fn balanced_split(sites: &[Site]) -> usize {
    let mut sum_a = 0.0;
    let mut sum_b: f64 = sites.iter().map(|s| s.weight).sum();
    let mut min_diff = f64::MAX;
    let mut split_at = 1;
    for (i, site) in sites.iter().enumerate() {
        sum_a += site.weight;
        sum_b -= site.weight;
        let diff = (sum_a - sum_b).abs();
        if diff < min_diff {
            min_diff = diff;
            split_at = i + 1;
        } else {
            break;
        }
    }
    split_at.clamp(1, sites.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn site(i: u32, x: f64, weight: f64) -> Site {
        let p = Point::new(x, 0.0);
        Site {
            id: NodeId(i),
            anchor: p,
            moving: p,
            frame: Affine::IDENTITY,
            weight,
        }
    }

    /// Two leaves whose weights go from (3, 7) to (4, 6).
    fn shifting_pair() -> (EntityTree, NodeId, NodeId) {
        let mut tree = EntityTree::new(2);
        let small = tree.add_child(tree.root, "small");
        let large = tree.add_child(tree.root, "large");
        tree.get_mut(small).weights = vec![3.0, 4.0];
        tree.get_mut(large).weights = vec![7.0, 6.0];
        tree.get_mut(tree.root).weights = vec![10.0, 10.0];
        (tree, small, large)
    }

    #[test]
    fn balanced_split_stops_at_first_non_improvement() {
        let sites = [site(0, 0.0, 1.0), site(1, 1.0, 1.0), site(2, 2.0, 5.0), site(3, 3.0, 1.0)];
        // Imbalance after each prefix: 6, 4, 6. Stops after two.
        assert_eq!(balanced_split(&sites), 2);

        let heavy_first = [site(0, 0.0, 10.0), site(1, 1.0, 1.0)];
        assert_eq!(balanced_split(&heavy_first), 1);

        let heavy_last = [site(0, 0.0, 1.0), site(1, 1.0, 1.0), site(2, 2.0, 1.0), site(3, 3.0, 100.0)];
        assert_eq!(balanced_split(&heavy_last), 3);
    }

    #[test]
    fn bisection_conserves_area_without_overlap() {
        let bounds = Rect::new(0.0, 0.0, 120.0, 60.0);
        for policy in [NmapPolicy::AlternateCut, NmapPolicy::EqualWeight] {
            let mut sites = vec![
                site(0, 90.0, 2.0),
                site(1, 10.0, 5.0),
                site(2, 50.0, 1.0),
                site(3, 70.0, 4.0),
                site(4, 30.0, 3.0),
            ];
            let total: f64 = sites.iter().map(|s| s.weight).sum();
            let weights: Vec<f64> = sites.iter().map(|s| s.weight).collect();

            let mut out = Vec::new();
            bisect(&mut sites, bounds, Cut::for_rect(&bounds), policy, &mut out);
            assert_eq!(out.len(), 5);

            for &(id, rect, _) in &out {
                let expected = weights[id.index()] / total * bounds.area();
                assert!(close(rect.area(), expected), "{policy:?} {id:?} {rect:?}");
            }
            for i in 0..out.len() {
                for j in i + 1..out.len() {
                    assert!(out[i].1.overlap_area(&out[j].1) < 1e-6, "{policy:?}");
                }
            }
        }
    }

    #[test]
    fn boundary_shifts_smoothly_between_revisions() {
        let (mut tree, small, large) = shifting_pair();
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);

        layout(&mut tree, bounds, 0, NmapPolicy::AlternateCut);
        let large_0 = tree.get(large).rectangle().unwrap();
        let small_0 = tree.get(small).rectangle().unwrap();
        let anchors = (tree.get(small).anchor_point, tree.get(large).anchor_point);

        layout(&mut tree, bounds, 1, NmapPolicy::AlternateCut);
        let large_1 = tree.get(large).rectangle().unwrap();
        let small_1 = tree.get(small).rectangle().unwrap();

        // Anchors are fixed after the first revision.
        assert_eq!(anchors, (tree.get(small).anchor_point, tree.get(large).anchor_point));

        // Same side of the canvas in both revisions.
        assert!(large_0.x < small_0.x && large_1.x < small_1.x);

        // The shared edge follows the weight share: 70 at (3, 7), 60 at (4, 6).
        let boundary_0 = large_0.right();
        let boundary_1 = large_1.right();
        assert!(close(boundary_0, 70.0), "{boundary_0}");
        assert!(close(boundary_1, 60.0), "{boundary_1}");

        // Interpolation between revisions passes through the middle.
        let halfway = tree.get(large).drawable_rectangle(0.5).unwrap();
        assert!(close(halfway.right(), (boundary_0 + boundary_1) / 2.0));
    }

    #[test]
    fn recompute_is_idempotent() {
        let (mut tree, small, large) = shifting_pair();
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        layout(&mut tree, bounds, 0, NmapPolicy::EqualWeight);
        layout(&mut tree, bounds, 1, NmapPolicy::EqualWeight);
        let first = (tree.get(small).rectangle(), tree.get(large).rectangle());
        layout(&mut tree, bounds, 1, NmapPolicy::EqualWeight);
        assert_eq!(first, (tree.get(small).rectangle(), tree.get(large).rectangle()));
    }

    #[test]
    fn nested_groups_stay_inside_their_parent() {
        let mut tree = EntityTree::new(2);
        let a = tree.add_child(tree.root, "a");
        let b = tree.add_child(tree.root, "b");
        let ax = tree.add_child(a, "a/x");
        let ay = tree.add_child(a, "a/y");
        let az = tree.add_child(a, "a/z");
        for (id, w) in [(ax, [1.0, 2.0]), (ay, [2.0, 2.0]), (az, [3.0, 1.0]), (b, [4.0, 5.0])] {
            tree.get_mut(id).weights = w.to_vec();
        }
        tree.get_mut(a).weights = vec![6.0, 5.0];
        tree.get_mut(tree.root).weights = vec![10.0, 10.0];

        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        for revision in 0..2 {
            layout(&mut tree, bounds, revision, NmapPolicy::AlternateCut);
            let parent = tree.get(a).rectangle().unwrap();
            let mut sum = 0.0;
            for id in [ax, ay, az] {
                let r = tree.get(id).rectangle().unwrap();
                assert!(r.x >= parent.x - 1e-6 && r.right() <= parent.right() + 1e-6);
                assert!(r.y >= parent.y - 1e-6 && r.bottom() <= parent.bottom() + 1e-6);
                sum += r.area();
            }
            assert!(close(sum, parent.area()));
        }
    }
}
