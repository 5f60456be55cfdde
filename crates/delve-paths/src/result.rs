use delve_core::Point;

/// A position with an associated cost, returned from distance-map queries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: f64,
}

/// A successful search: the route from start to goal (both included) and
/// its total cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    path: Vec<Point>,
    total_cost: f64,
    visited: Option<usize>,
}

impl PathResult {
    pub(crate) fn new(path: Vec<Point>, total_cost: f64, visited: Option<usize>) -> Self {
        debug_assert!(!path.is_empty());
        Self {
            path,
            total_cost,
            visited,
        }
    }

    /// The route, start first.
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// First position of the route.
    #[inline]
    pub fn start(&self) -> Point {
        self.path[0]
    }

    /// Last position of the route.
    #[inline]
    pub fn goal(&self) -> Point {
        self.path[self.path.len() - 1]
    }

    /// Sum of the movement costs of every step.
    #[inline]
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of nodes expanded by the search, when it tracked them.
    #[inline]
    pub fn visited(&self) -> Option<usize> {
        self.visited
    }

    /// Number of positions on the route (never zero).
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Consume the result, keeping only the route.
    pub fn into_path(self) -> Vec<Point> {
        self.path
    }
}
