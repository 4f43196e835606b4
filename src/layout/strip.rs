//! Strip treemap (Bederson, Shneiderman & Wattenberg): horizontal rows in list order.

use super::rows::{plan_rows, row_thickness, Row};
use crate::geometry::Rect;
use crate::tree::arena::{EntityTree, NodeId};

pub fn layout(tree: &mut EntityTree, bounds: Rect, revision: usize) {
    let root = tree.root;
    let entity = tree.get_mut(root);
    entity.set_rectangle(Some(bounds), revision);
    entity.init_point(bounds.center());
    layout_children(tree, root, bounds, revision);
}

fn layout_children(tree: &mut EntityTree, parent: NodeId, bounds: Rect, revision: usize) {
    let (ids, weights): (Vec<NodeId>, Vec<f64>) = tree
        .children(parent)
        .iter()
        .map(|&id| (id, tree.get(id).weight(revision)))
        .filter(|&(_, w)| w > 0.0)
        .unzip();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || bounds.area() <= 0.0 {
        return;
    }

    let normalizer = bounds.area() / total;
    let areas: Vec<f64> = weights.iter().map(|w| w * normalizer).collect();
    let rects = strips(&areas, bounds);

    for (&id, rect) in ids.iter().zip(rects) {
        let entity = tree.get_mut(id);
        entity.set_rectangle(Some(rect), revision);
        entity.init_point(rect.center());
        if !entity.is_leaf() {
            layout_children(tree, id, rect, revision);
        }
    }
}

/// Every row spans the full width, so rows are only ever measured against it.
fn strip_rows(areas: &[f64], bounds: Rect) -> Vec<Row> {
    plan_rows(
        areas,
        bounds,
        |_, container| container.width,
        |_, container, area| container.subtract_area_from_top(area),
    )
}

fn strips(areas: &[f64], bounds: Rect) -> Vec<Rect> {
    let rows = strip_rows(areas, bounds);

    let count = rows.len();
    let mut out = Vec::with_capacity(areas.len());
    for row in rows {
        let last = row.index + 1 == count;
        let members = &areas[row.range];
        let container = row.container;
        let height = row_thickness(members.iter().sum(), container.width, container.height, last);
        let mut x = container.x;
        for &area in members {
            let width = (area / height).min(container.right() - x).max(0.0);
            out.push(Rect::new(x, container.y, width, height));
            x += width;
        }
    }
    out
}
