use delve_core::Point;

use crate::graph::Graph;
use crate::pathfinder::Pathfinder;
use crate::result::PathResult;
use crate::traits::Octile;

impl Pathfinder {
    /// Compute the cheapest path from `start` to `goal` using A* with the
    /// octile heuristic.
    ///
    /// Returns the full path (including both endpoints) or `None` if an
    /// endpoint is missing, the goal is unreachable, or the path would cost
    /// more than `max_cost`.
    pub fn astar_path(
        &mut self,
        graph: &Graph,
        start: Point,
        goal: Point,
        max_cost: f64,
    ) -> Option<PathResult> {
        self.search(graph, start, goal, max_cost, Octile)
    }
}

/// One-off A* query with a throwaway [`Pathfinder`].
pub fn astar_path(graph: &Graph, start: Point, goal: Point, max_cost: f64) -> Option<PathResult> {
    Pathfinder::with_capacity(graph.len()).astar_path(graph, start, goal, max_cost)
}
