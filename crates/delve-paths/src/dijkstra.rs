use std::collections::BinaryHeap;
use std::time::Instant;

use delve_core::{Point, TileClass};

use crate::error::PathError;
use crate::graph::{Graph, NodeId};
use crate::pathfinder::{NodeRef, Pathfinder};
use crate::result::{PathNode, PathResult};
use crate::traits::Zero;

/// Settled-node interval between progress log lines on huge maps.
const PROGRESS_EVERY: usize = 1_000_000;

impl Pathfinder {
    /// Compute the cheapest path from `start` to `goal` with Dijkstra.
    ///
    /// Same contract as [`astar_path`](Self::astar_path), without a
    /// heuristic: the search stops as soon as the goal is settled.
    pub fn dijkstra_path(
        &mut self,
        graph: &Graph,
        start: Point,
        goal: Point,
        max_cost: f64,
    ) -> Option<PathResult> {
        self.search(graph, start, goal, max_cost, Zero)
    }
}

/// One-off Dijkstra query with a throwaway [`Pathfinder`].
pub fn dijkstra_path(
    graph: &Graph,
    start: Point,
    goal: Point,
    max_cost: f64,
) -> Option<PathResult> {
    Pathfinder::with_capacity(graph.len()).dijkstra_path(graph, start, goal, max_cost)
}

/// Run a full single-source precompute from `source`.
///
/// Shortcut for [`FullDijkstra::new`] followed by
/// [`compute`](FullDijkstra::compute).
pub fn precompute(graph: &Graph, source: Point) -> Result<DistanceMap<'_>, PathError> {
    let id = graph.id(source).ok_or(PathError::UnknownSource(source))?;
    Ok(DistanceMap::build(graph, id))
}

/// A single-source precompute that runs at most once.
///
/// Computing drains the whole reachable graph and keeps the resulting
/// [`DistanceMap`]; asking for a second run is an error rather than a
/// silent no-op.
#[derive(Debug, Clone)]
pub struct FullDijkstra<'g> {
    graph: &'g Graph,
    source: NodeId,
    map: Option<DistanceMap<'g>>,
}

impl<'g> FullDijkstra<'g> {
    /// Prepare a precompute from `source`, which must be in `graph`.
    pub fn new(graph: &'g Graph, source: Point) -> Result<Self, PathError> {
        let source = graph.id(source).ok_or(PathError::UnknownSource(source))?;
        Ok(Self {
            graph,
            source,
            map: None,
        })
    }

    pub fn source(&self) -> Point {
        self.graph.pos(self.source)
    }

    pub fn is_computed(&self) -> bool {
        self.map.is_some()
    }

    /// Run the precompute. Fails with [`PathError::AlreadyComputed`] when
    /// called a second time.
    pub fn compute(&mut self) -> Result<&DistanceMap<'g>, PathError> {
        if self.map.is_some() {
            return Err(PathError::AlreadyComputed(self.source()));
        }
        Ok(&*self.map.insert(DistanceMap::build(self.graph, self.source)))
    }

    /// The computed map, if [`compute`](Self::compute) has run.
    pub fn distance_map(&self) -> Option<&DistanceMap<'g>> {
        self.map.as_ref()
    }

    pub fn into_distance_map(self) -> Option<DistanceMap<'g>> {
        self.map
    }
}

/// Cheapest cost and parent of every node reachable from one source.
///
/// Path queries against the map are parent walks, linear in the path
/// length, with no further graph traversal.
#[derive(Debug, Clone)]
pub struct DistanceMap<'g> {
    graph: &'g Graph,
    source: NodeId,
    dist: Vec<f64>,
    parent: Vec<Option<NodeId>>,
    reached: usize,
}

impl<'g> DistanceMap<'g> {
    fn build(graph: &'g Graph, source: NodeId) -> Self {
        let started = Instant::now();
        let mut dist = vec![f64::INFINITY; graph.len()];
        let mut parent = vec![None; graph.len()];
        let mut reached = 0usize;

        dist[source.index()] = 0.0;
        let mut open = BinaryHeap::new();
        open.push(NodeRef { id: source, f: 0.0 });

        while let Some(current) = open.pop() {
            let ci = current.id.index();
            if current.f > dist[ci] {
                continue;
            }
            reached += 1;
            if reached % PROGRESS_EVERY == 0 {
                log::debug!(
                    "dijkstra: settled {}/{} million nodes",
                    reached / PROGRESS_EVERY,
                    graph.len() / PROGRESS_EVERY
                );
            }

            for edge in graph.node(current.id).edges() {
                let tentative = dist[ci] + edge.cost;
                let ni = edge.to.index();
                if tentative < dist[ni] {
                    dist[ni] = tentative;
                    parent[ni] = Some(current.id);
                    open.push(NodeRef {
                        id: edge.to,
                        f: tentative,
                    });
                }
            }
        }

        log::debug!(
            "dijkstra: full map from {} reached {}/{} nodes in {:?}",
            graph.pos(source),
            reached,
            graph.len(),
            started.elapsed()
        );

        Self {
            graph,
            source,
            dist,
            parent,
            reached,
        }
    }

    /// The graph this map was computed on.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn source(&self) -> Point {
        self.graph.pos(self.source)
    }

    /// Number of nodes reachable from the source (the source included).
    pub fn reached_count(&self) -> usize {
        self.reached
    }

    #[inline]
    pub(crate) fn dist(&self, id: NodeId) -> f64 {
        self.dist[id.index()]
    }

    /// Cheapest cost from the source to `p`, or `None` if `p` is not in the
    /// graph or not reachable.
    pub fn cost_at(&self, p: Point) -> Option<f64> {
        let d = self.dist(self.graph.id(p)?);
        d.is_finite().then_some(d)
    }

    pub fn is_reachable(&self, p: Point) -> bool {
        self.cost_at(p).is_some()
    }

    /// Predecessor of `p` on its cheapest path from the source.
    pub fn parent_of(&self, p: Point) -> Option<Point> {
        let id = self.graph.id(p)?;
        self.parent[id.index()].map(|pid| self.graph.pos(pid))
    }

    /// Cheapest path from the source to `goal`.
    pub fn find_path_to(&self, goal: Point) -> Option<PathResult> {
        let goal_id = self.graph.id(goal)?;
        let total_cost = self.dist(goal_id);
        if !total_cost.is_finite() {
            log::trace!("dijkstra: {goal} unreachable from {}", self.source());
            return None;
        }

        let mut path = Vec::new();
        let mut cursor = Some(goal_id);
        while let Some(id) = cursor {
            path.push(self.graph.pos(id));
            cursor = self.parent[id.index()];
        }
        path.reverse();
        Some(PathResult::new(path, total_cost, None))
    }

    /// Every reachable node with its cost, in node id order.
    pub fn reachable(&self) -> impl Iterator<Item = PathNode> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(|(i, &cost)| PathNode {
                pos: self.graph.nodes()[i].pos(),
                cost,
            })
    }

    /// Reachable positions from farthest to nearest; equal costs are
    /// ordered by position.
    pub fn farthest_first(&self) -> Vec<Point> {
        let mut nodes: Vec<PathNode> = self.reachable().collect();
        nodes.sort_by(|a, b| b.cost.total_cmp(&a.cost).then(a.pos.cmp(&b.pos)));
        nodes.into_iter().map(|n| n.pos).collect()
    }

    /// The `max_count` reachable tiles of `class` closest to the source by
    /// path cost, nearest first. `None` returns all of them.
    pub fn nearest_of_class(&self, class: TileClass, max_count: Option<usize>) -> Vec<PathNode> {
        let mut found: Vec<PathNode> = self
            .reachable()
            .filter(|n| self.graph.class_at(n.pos) == Some(class))
            .collect();
        found.sort_by(|a, b| a.cost.total_cmp(&b.cost).then(a.pos.cmp(&b.pos)));
        if let Some(n) = max_count {
            found.truncate(n);
        }
        found
    }
}
