//! Spiral treemap (Tu & Shen): rows wound clockwise around the container.

use super::rows::{plan_rows, row_thickness, Row};
use crate::geometry::{CutDirection, Rect};
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
    let rects = spiral(&areas, bounds);

    for (&id, rect) in ids.iter().zip(rects) {
        let entity = tree.get_mut(id);
        entity.set_rectangle(Some(rect), revision);
        entity.init_point(rect.center());
        if !entity.is_leaf() {
            layout_children(tree, id, rect, revision);
        }
    }
}

/// Rows taken from the four sides in turn, each measured along its own side.
fn spiral_rows(areas: &[f64], bounds: Rect) -> Vec<Row> {
    plan_rows(
        areas,
        bounds,
        |row, container| CutDirection::for_row(row).row_length(container),
        |row, container, area| container.subtract_area(CutDirection::for_row(row), area),
    )
}

/// Lay `areas` out in list order. Every sibling group starts on the top edge.
fn spiral(areas: &[f64], bounds: Rect) -> Vec<Rect> {
    let rows = spiral_rows(areas, bounds);

    let count = rows.len();
    let mut out = vec![Rect::default(); areas.len()];
    for row in rows {
        let direction = CutDirection::for_row(row.index);
        let last = row.index + 1 == count;
        let members = &areas[row.range.clone()];
        let placed = place_row(members, &row.container, direction, last);
        for (slot, rect) in out[row.range].iter_mut().zip(placed) {
            *slot = rect;
        }
    }
    out
}

/// Rectangles for one row, returned in the same order as `members`.
/// Members never run past the container's far edge.
fn place_row(members: &[f64], container: &Rect, direction: CutDirection, last: bool) -> Vec<Rect> {
    let sum: f64 = members.iter().sum();
    let length = direction.row_length(container);
    let depth = if direction.is_horizontal() {
        container.height
    } else {
        container.width
    };
    let thickness = row_thickness(sum, length, depth, last);
    let mut out = Vec::with_capacity(members.len());

    match direction {
        CutDirection::WestEast => {
            let mut x = container.x;
            for &area in members {
                let w = (area / thickness).min(container.right() - x).max(0.0);
                out.push(Rect::new(x, container.y, w, thickness));
                x += w;
            }
        }
        CutDirection::EastSouth => {
            let x = container.right() - thickness;
            let mut y = container.y;
            for &area in members {
                let h = (area / thickness).min(container.bottom() - y).max(0.0);
                out.push(Rect::new(x, y, thickness, h));
                y += h;
            }
        }
        CutDirection::SouthWest => {
            // Walks right to left, so the first member ends up rightmost.
            let y = container.bottom() - thickness;
            let mut x = container.right();
            for &area in members {
                let w = (area / thickness).min(x - container.x).max(0.0);
                x -= w;
                out.push(Rect::new(x, y, w, thickness));
            }
        }
        CutDirection::WestNorth => {
            let mut y = container.bottom();
            for &area in members {
                let h = (area / thickness).min(y - container.y).max(0.0);
                y -= h;
                out.push(Rect::new(container.x, y, thickness, h));
            }
        }
    }
    out
}
