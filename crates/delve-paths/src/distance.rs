use std::f64::consts::SQRT_2;

use delve_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance: the cost of the cheapest penalty-free 8-way walk
/// between two points, with orthogonal steps costing 1 and diagonal ones √2.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = (dx.min(dy), dx.max(dy));
    f64::from(hi - lo) + f64::from(lo) * SQRT_2
}
