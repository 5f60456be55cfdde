//! Tile coordinates and rectangular extents.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// A tile coordinate. X grows right, Y grows down.
///
/// Points order row-major (by `y`, then `x`), the same order in which a
/// floor is read from ASCII.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Unit steps to the four edge-sharing neighbours.
    pub const ORTHOGONAL: [Point; 4] = [
        Point::new(1, 0),
        Point::new(-1, 0),
        Point::new(0, 1),
        Point::new(0, -1),
    ];

    /// Unit steps to the four corner-sharing neighbours.
    pub const DIAGONAL: [Point; 4] = [
        Point::new(1, 1),
        Point::new(1, -1),
        Point::new(-1, 1),
        Point::new(-1, -1),
    ];

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether `other` differs from `self` on both axes.
    ///
    /// For adjacent tiles this means the step between them is diagonal.
    #[inline]
    pub fn is_diagonal_to(self, other: Point) -> bool {
        self.x != other.x && self.y != other.y
    }

    /// The two orthogonal tiles sharing the corner crossed when stepping
    /// diagonally from `self` to `to`: `(to.x, self.y)` and `(self.x, to.y)`.
    #[inline]
    pub fn corners_toward(self, to: Point) -> [Point; 2] {
        [Self::new(to.x, self.y), Self::new(self.x, to.y)]
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, step: Self) -> Self {
        self.shift(step.x, step.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Half-open rectangle `[min, max)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Rectangle spanned by two corners, given in any order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Smallest range holding every point of `points`, or the default empty
    /// range when there are none.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Self {
        points
            .into_iter()
            .fold(None, |acc: Option<(Point, Point)>, p| {
                Some(match acc {
                    None => (p, p),
                    Some((lo, hi)) => (
                        Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                        Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                    ),
                })
            })
            .map_or_else(Self::default, |(lo, hi)| Self {
                min: lo,
                max: hi.shift(1, 1),
            })
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of tiles covered.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Every tile of the range in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Point> {
        let xs = if self.is_empty() { 0..0 } else { self.min.x..self.max.x };
        (self.min.y..self.max.y).flat_map(move |y| xs.clone().map(move |x| Point::new(x, y)))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_sort_row_major() {
        let mut pts = vec![Point::new(2, 0), Point::new(0, 1), Point::new(1, 0)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(1, 0), Point::new(2, 0), Point::new(0, 1)]);
    }

    #[test]
    fn diagonal_step_corners() {
        let a = Point::new(0, 0);
        assert!(a.is_diagonal_to(Point::new(1, 1)));
        assert!(!a.is_diagonal_to(Point::new(1, 0)));
        assert_eq!(
            a.corners_toward(Point::new(1, -1)),
            [Point::new(1, 0), Point::new(0, -1)]
        );
        for d in Point::DIAGONAL {
            for c in a.corners_toward(a + d) {
                assert!(Point::ORTHOGONAL.contains(&c));
            }
        }
    }

    #[test]
    fn range_contains_half_open() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!(r.min, Point::new(0, 0));
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
    }

    #[test]
    fn range_iterates_row_major() {
        let pts: Vec<_> = Range::new(1, 1, 3, 3).iter().collect();
        assert_eq!(
            pts,
            vec![Point::new(1, 1), Point::new(2, 1), Point::new(1, 2), Point::new(2, 2)]
        );
        assert_eq!(Range::new(0, 0, 0, 4).iter().count(), 0);
    }

    #[test]
    fn bounding_range() {
        let r = Range::bounding([Point::new(2, 5), Point::new(-1, 3), Point::new(4, 4)]);
        assert_eq!(r, Range::new(-1, 3, 5, 6));
        let empty = Range::bounding(std::iter::empty());
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }
}
