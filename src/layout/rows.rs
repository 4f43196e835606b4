//! Greedy row building shared by the squarified, strip and spiral layouts.

use std::ops::Range;

use crate::geometry::Rect;

/// A closed row: which areas it holds and the container it was laid into.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Index range into the area slice handed to [`plan_rows`]
    pub range: Range<usize>,
    /// Remaining container at the time the row was closed
    pub container: Rect,
    /// Position of this row in its sibling group (0-based)
    pub index: usize,
}

/// Worst aspect ratio of a row of `sum` total area laid along `side`,
/// as in Bruls, Huizing & van Wijk: `max(side²·max/sum², sum²/(side²·min))`.
pub(crate) fn worst_aspect_ratio(max: f64, min: f64, sum: f64, side: f64) -> f64 {
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = (side_sq * max) / sum_sq;
    let b = sum_sq / (side_sq * min);
    a.max(b)
}

/// Whether appending `next` to `row` keeps the worst ratio from growing.
/// An empty row always accepts.
pub fn improves_ratio(row: &[f64], next: f64, length: f64) -> bool {
    if row.is_empty() {
        return true;
    }

    let max_current = row.iter().copied().fold(f64::MIN_POSITIVE, f64::max);
    let min_current = row.iter().copied().fold(f64::MAX, f64::min);
    let sum_current: f64 = row.iter().sum();

    let max_new = max_current.max(next);
    let min_new = min_current.min(next);
    let sum_new = sum_current + next;

    let current = worst_aspect_ratio(max_current, min_current, sum_current, length);
    let new = worst_aspect_ratio(max_new, min_new, sum_new, length);
    current >= new
}

/// How deep a row of `sum` area laid along `length` reaches into a container
/// `depth` deep. The last row of a group takes the full depth, so rounding in
/// the cuts before it can never push it past the container.
pub(crate) fn row_thickness(sum: f64, length: f64, depth: f64, last: bool) -> f64 {
    let depth = depth.max(0.0);
    if last {
        depth
    } else {
        (sum / length).min(depth)
    }
}

/// Split `areas` (already normalized to `bounds`) into consecutive rows.
///
/// `length(row_index, container)` gives the side a row is measured against;
/// `cut(row_index, container, row_area)` returns what is left once the row
/// is removed. The last row receives whatever container remains.
pub fn plan_rows<L, C>(areas: &[f64], bounds: Rect, mut length: L, mut cut: C) -> Vec<Row>
where
    L: FnMut(usize, &Rect) -> f64,
    C: FnMut(usize, &Rect, f64) -> Rect,
{
    let mut rows = Vec::new();
    if areas.is_empty() {
        return rows;
    }

    let mut container = bounds;
    let mut start = 0;
    for next in 0..areas.len() {
        let row = &areas[start..next];
        if improves_ratio(row, areas[next], length(rows.len(), &container)) {
            continue;
        }

        let sum: f64 = row.iter().sum();
        let index = rows.len();
        rows.push(Row {
            range: start..next,
            container,
            index,
        });
        container = cut(index, &container, sum);
        start = next;
    }

    let index = rows.len();
    rows.push(Row {
        range: start..areas.len(),
        container,
        index,
    });
    rows
}
