use super::rows::{plan_rows, row_thickness, Row};
use crate::geometry::Rect;
use crate::tree::arena::{Entity, EntityTree, NodeId};

/// Which weight a squarified pass reads, and what it writes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Regular layout: weights at `revision`, rectangles and anchors written.
    Layout { revision: usize },
    /// Anchor seeding for Nmap: every entity sized by its largest weight over
    /// all revisions, only anchor/moving points written.
    Seed,
}

impl Pass {
    fn weight(self, entity: &Entity) -> f64 {
        match self {
            Pass::Layout { revision } => entity.weight(revision),
            Pass::Seed => entity.maximum_weight(),
        }
    }

    fn place(self, entity: &mut Entity, rect: Rect) {
        if let Pass::Layout { revision } = self {
            entity.set_rectangle(Some(rect), revision);
        }
        entity.init_point(rect.center());
    }
}

/// Squarified layout (Bruls, Huizing & van Wijk) of the whole tree for `revision`.
pub fn layout(tree: &mut EntityTree, bounds: Rect, revision: usize) {
    run(tree, bounds, Pass::Layout { revision });
}

/// Seed anchor points for the Nmap layout without touching any rectangle.
pub fn seed_anchors(tree: &mut EntityTree, bounds: Rect) {
    run(tree, bounds, Pass::Seed);
}

fn run(tree: &mut EntityTree, bounds: Rect, pass: Pass) {
    let root = tree.root;
    pass.place(tree.get_mut(root), bounds);

    tracing::debug!(
        "Squarified {:?}: {} nodes in {:.0}x{:.0}",
        pass,
        tree.len(),
        bounds.width,
        bounds.height
    );
    layout_children(tree, root, bounds, pass);
}

/// Recursively layout children, largest revision-0 weight first.
fn layout_children(tree: &mut EntityTree, parent: NodeId, bounds: Rect, pass: Pass) {
    let mut children = tree.children(parent).to_vec();
    if children.is_empty() {
        return;
    }

    // Stable descending sort on the first revision, so the order (and hence
    // the rough position) of siblings is the same for every revision.
    children.sort_by(|&a, &b| tree.get(b).weight(0).total_cmp(&tree.get(a).weight(0)));

    let weights: Vec<f64> = children.iter().map(|&id| pass.weight(tree.get(id))).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || bounds.area() <= 0.0 {
        tracing::debug!(
            "Skipping layout under '{}': total weight {} in area {}",
            tree.get(parent).id,
            total,
            bounds.area()
        );
        return;
    }

    // Bruls' algorithm assumes weights normalized to the container's area.
    let normalizer = bounds.area() / total;
    let (ids, areas): (Vec<NodeId>, Vec<f64>) = children
        .iter()
        .zip(&weights)
        .filter(|(_, w)| **w > 0.0)
        .map(|(&id, &w)| (id, w * normalizer))
        .unzip();

    let positioned = squarify(&areas, bounds);
    for (&id, rect) in ids.iter().zip(positioned) {
        pass.place(tree.get_mut(id), rect);
        if !tree.get(id).is_leaf() {
            layout_children(tree, id, rect, pass);
        }
    }
}

/// Lay normalized `areas` out in `bounds`, one rectangle per area, in order.
pub(crate) fn squarify(areas: &[f64], bounds: Rect) -> Vec<Rect> {
    let rows = plan_rows(
        areas,
        bounds,
        |_, container| container.short_edge(),
        |_, container, area| container.cut_area(area),
    );

    let mut result = Vec::with_capacity(areas.len());
    for row in &rows {
        let last = row.index + 1 == rows.len();
        save_row(&areas[row.range.clone()], row, last, &mut result);
    }
    result
}

/// Place one row along the short edge of its container: a column on the
/// left when the container is wider than tall, otherwise a row on top.
///
/// The last row takes the whole remaining container. Earlier rows are
/// clamped to it, and so is every member along the row.
fn save_row(areas: &[f64], row: &Row, last: bool, out: &mut Vec<Rect>) {
    let container = row.container;
    let sum: f64 = areas.iter().sum();
    if !(container.width > 0.0 && container.height > 0.0) {
        tracing::warn!("Squarify: degenerate row container {:?} for area {}", container, sum);
    }

    if container.width > container.height {
        let thickness = row_thickness(sum, container.height, container.width, last);
        let mut y = container.y;
        for &area in areas {
            let length = (area / thickness).min(container.bottom() - y).max(0.0);
            out.push(Rect::new(container.x, y, thickness, length));
            y += length;
        }
    } else {
        let thickness = row_thickness(sum, container.width, container.height, last);
        let mut x = container.x;
        for &area in areas {
            let length = (area / thickness).min(container.right() - x).max(0.0);
            out.push(Rect::new(x, container.y, length, thickness));
            x += length;
        }
    }
}
