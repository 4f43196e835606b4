//! Axis-aligned geometry shared by every layout technique.

/// Tolerance used when comparing extents and areas.
pub const EPSILON: f64 = 1e-9;

/// A 2-D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Coordinate along the axis that a cut of the given orientation divides.
    pub fn along(self, cut: Cut) -> f64 {
        match cut {
            Cut::Vertical => self.x,
            Cut::Horizontal => self.y,
        }
    }
}

/// Orientation of the line that divides a rectangle in two.
///
/// A vertical cut places the halves side by side (it divides the width),
/// a horizontal cut stacks them (it divides the height).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cut {
    Vertical,
    Horizontal,
}

impl Cut {
    /// Vertical for rectangles wider than tall, horizontal otherwise.
    pub fn for_rect(rect: &Rect) -> Self {
        if rect.width > rect.height {
            Cut::Vertical
        } else {
            Cut::Horizontal
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Cut::Vertical => Cut::Horizontal,
            Cut::Horizontal => Cut::Vertical,
        }
    }
}

/// Side of the container a spiral row is taken from, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutDirection {
    /// Row along the top edge, filled left to right.
    WestEast,
    /// Column along the right edge, filled top to bottom.
    EastSouth,
    /// Row along the bottom edge.
    SouthWest,
    /// Column along the left edge.
    WestNorth,
}

impl CutDirection {
    pub const CYCLE: [CutDirection; 4] = [
        CutDirection::WestEast,
        CutDirection::EastSouth,
        CutDirection::SouthWest,
        CutDirection::WestNorth,
    ];

    /// Direction used for the `row`-th row of a sibling group.
    pub fn for_row(row: usize) -> Self {
        Self::CYCLE[row % Self::CYCLE.len()]
    }

    /// Whether rows in this direction run horizontally (span the width).
    pub fn is_horizontal(self) -> bool {
        matches!(self, CutDirection::WestEast | CutDirection::SouthWest)
    }

    /// Length available to a row taken from this side of `rect`.
    pub fn row_length(self, rect: &Rect) -> f64 {
        if self.is_horizontal() {
            rect.width
        } else {
            rect.height
        }
    }
}

/// An axis-aligned rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn corner(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn short_edge(&self) -> f64 {
        self.width.min(self.height)
    }

    /// `min(w/h, h/w)`: 1 for a square, towards 0 for slivers, 0 when degenerate.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        (self.width / self.height).min(self.height / self.width)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Extent along the axis a cut of this orientation divides.
    pub fn extent(&self, cut: Cut) -> f64 {
        match cut {
            Cut::Vertical => self.width,
            Cut::Horizontal => self.height,
        }
    }

    /// Start coordinate along the axis a cut of this orientation divides.
    pub fn origin(&self, cut: Cut) -> f64 {
        match cut {
            Cut::Vertical => self.x,
            Cut::Horizontal => self.y,
        }
    }

    /// Linear interpolation of corner, width and height. `t = 0` yields `a`.
    pub fn blend(a: &Rect, b: &Rect, t: f64) -> Rect {
        let mix = |from: f64, to: f64| from * (1.0 - t) + to * t;
        Rect::new(
            mix(a.x, b.x),
            mix(a.y, b.y),
            mix(a.width, b.width),
            mix(a.height, b.height),
        )
    }

    /// Overlapping region. Disjoint inputs give non-positive extents.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Area shared with `other`, zero when they only touch or are disjoint.
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let i = self.intersection(other);
        if i.width <= 0.0 || i.height <= 0.0 {
            0.0
        } else {
            i.area()
        }
    }

    /// Split into two adjacent rectangles, the first `first_extent` long
    /// along the divided axis.
    pub fn split(&self, cut: Cut, first_extent: f64) -> (Rect, Rect) {
        match cut {
            Cut::Vertical => (
                Rect::new(self.x, self.y, first_extent, self.height),
                Rect::new(self.x + first_extent, self.y, self.width - first_extent, self.height),
            ),
            Cut::Horizontal => (
                Rect::new(self.x, self.y, self.width, first_extent),
                Rect::new(self.x, self.y + first_extent, self.width, self.height - first_extent),
            ),
        }
    }

    /// Remove `area` from the side facing the short edge and return the rest:
    /// from the left when wider than tall, otherwise from the top.
    pub fn cut_area(&self, area: f64) -> Rect {
        if self.width > self.height {
            let taken = area / self.height;
            Rect::new(self.x + taken, self.y, self.width - taken, self.height)
        } else {
            let taken = area / self.width;
            Rect::new(self.x, self.y + taken, self.width, self.height - taken)
        }
    }

    pub fn subtract_area_from_top(&self, area: f64) -> Rect {
        self.subtract_area(CutDirection::WestEast, area)
    }

    /// Remove a full-length band of `area` from the side `direction` names.
    pub fn subtract_area(&self, direction: CutDirection, area: f64) -> Rect {
        match direction {
            CutDirection::WestEast => {
                let taken = area / self.width;
                Rect::new(self.x, self.y + taken, self.width, self.height - taken)
            }
            CutDirection::EastSouth => {
                let taken = area / self.height;
                Rect::new(self.x, self.y, self.width - taken, self.height)
            }
            CutDirection::SouthWest => {
                let taken = area / self.width;
                Rect::new(self.x, self.y, self.width, self.height - taken)
            }
            CutDirection::WestNorth => {
                let taken = area / self.height;
                Rect::new(self.x + taken, self.y, self.width - taken, self.height)
            }
        }
    }
}

/// 2-D affine map `(x, y) -> (a*x + c*y + tx, b*x + d*y + ty)`.
///
/// [`Affine::fit`] only builds scale + translate maps, so `b` and `c` stay zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Scale + translate mapping `from` onto `to`. `None` when `from` has no
    /// extent on an axis where `to` does, since no such map exists.
    pub fn fit(from: &Rect, to: &Rect) -> Option<Self> {
        let axis = |from_start: f64, from_len: f64, to_start: f64, to_len: f64| {
            if from_len.abs() < EPSILON {
                if to_len.abs() < EPSILON {
                    return Some((1.0, to_start - from_start));
                }
                return None;
            }
            let s = to_len / from_len;
            Some((s, to_start - from_start * s))
        };
        let (a, tx) = axis(from.x, from.width, to.x, to.width)?;
        let (d, ty) = axis(from.y, from.height, to.y, to.height)?;
        Some(Affine {
            a,
            b: 0.0,
            c: 0.0,
            d,
            tx,
            ty,
        })
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Map both corners and rebuild the rectangle between them.
    pub fn apply_rect(&self, r: &Rect) -> Rect {
        let p0 = self.apply(r.corner());
        let p1 = self.apply(Point::new(r.right(), r.bottom()));
        Rect::new(p0.x, p0.y, p1.x - p0.x, p1.y - p0.y)
    }

    /// The map that applies `self` first, then `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn cut_area_takes_from_short_side() {
        let wide = Rect::new(0.0, 0.0, 100.0, 50.0);
        let rest = wide.cut_area(1000.0);
        assert_eq!(rest, Rect::new(20.0, 0.0, 80.0, 50.0));

        let tall = Rect::new(10.0, 10.0, 50.0, 100.0);
        let rest = tall.cut_area(1000.0);
        assert_eq!(rest, Rect::new(10.0, 30.0, 50.0, 80.0));
    }

    #[test]
    fn subtract_area_visits_all_four_sides() {
        let r = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(r.subtract_area(CutDirection::WestEast, 50.0), Rect::new(0.0, 5.0, 10.0, 15.0));
        assert_eq!(r.subtract_area(CutDirection::EastSouth, 40.0), Rect::new(0.0, 0.0, 8.0, 20.0));
        assert_eq!(r.subtract_area(CutDirection::SouthWest, 50.0), Rect::new(0.0, 0.0, 10.0, 15.0));
        assert_eq!(r.subtract_area(CutDirection::WestNorth, 40.0), Rect::new(2.0, 0.0, 8.0, 20.0));
    }

    #[test]
    fn blend_endpoints_and_midpoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 20.0, 30.0, 50.0);
        assert_eq!(Rect::blend(&a, &b, 0.0), a);
        assert_eq!(Rect::blend(&a, &b, 1.0), b);
        assert_eq!(Rect::blend(&a, &b, 0.5), Rect::new(5.0, 10.0, 20.0, 30.0));
    }

    #[test]
    fn intersection_of_disjoint_rects_is_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let i = a.intersection(&b);
        assert!(i.width <= 0.0);
        assert_eq!(a.overlap_area(&b), 0.0);

        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&c), Rect::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(a.overlap_area(&c), 25.0);
    }

    #[test]
    fn aspect_ratio_is_symmetric_and_bounded() {
        assert_eq!(Rect::new(0.0, 0.0, 4.0, 2.0).aspect_ratio(), 0.5);
        assert_eq!(Rect::new(0.0, 0.0, 2.0, 4.0).aspect_ratio(), 0.5);
        assert_eq!(Rect::new(0.0, 0.0, 0.0, 4.0).aspect_ratio(), 0.0);
    }

    #[test]
    fn fit_maps_rect_onto_rect() {
        let from = Rect::new(0.0, 0.0, 60.0, 10.0);
        let to = Rect::new(0.0, 0.0, 30.0, 10.0);
        let t = Affine::fit(&from, &to).expect("non-degenerate");
        assert_eq!(t.apply_rect(&from), to);
        let q = t.apply(Point::new(20.0, 4.0));
        assert!(close(q.x, 10.0) && close(q.y, 4.0));
        assert!(Affine::fit(&Rect::new(5.0, 0.0, 0.0, 10.0), &to).is_none());
    }

    #[test]
    fn composed_fits_match_stepwise_application() {
        let outer = Affine::fit(&Rect::new(0.0, 0.0, 100.0, 50.0), &Rect::new(0.0, 0.0, 60.0, 50.0)).expect("fit");
        let inner = Affine::fit(&Rect::new(0.0, 0.0, 60.0, 30.0), &Rect::new(0.0, 10.0, 60.0, 40.0)).expect("fit");
        let p = Point::new(40.0, 20.0);
        let composed = outer.then(&inner).apply(p);
        let stepwise = inner.apply(outer.apply(p));
        assert!(close(composed.x, stepwise.x) && close(composed.y, stepwise.y));
        assert!(close(composed.x, 24.0));
        assert_eq!(Affine::IDENTITY.then(&outer), outer);
    }
}
