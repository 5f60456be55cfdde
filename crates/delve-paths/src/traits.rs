use crate::distance::octile;
use crate::graph::{Graph, NodeId};

/// Remaining-cost estimate guiding a best-first search.
///
/// `estimate` must never exceed the true cheapest cost from `from` to `to`
/// (admissible), otherwise the returned path may not be the shortest one.
pub trait Heuristic {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Estimated cost of reaching `to` from `from`.
    fn estimate(&self, graph: &Graph, from: NodeId, to: NodeId) -> f64;
}

/// Octile distance; admissible for every [`CostModel`](crate::CostModel)
/// since penalties only ever add cost.
#[derive(Copy, Clone, Debug, Default)]
pub struct Octile;

impl Heuristic for Octile {
    fn name(&self) -> &'static str {
        "astar"
    }

    #[inline]
    fn estimate(&self, graph: &Graph, from: NodeId, to: NodeId) -> f64 {
        octile(graph.pos(from), graph.pos(to))
    }
}

/// No estimate at all, turning A* into Dijkstra.
#[derive(Copy, Clone, Debug, Default)]
pub struct Zero;

impl Heuristic for Zero {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    #[inline]
    fn estimate(&self, _: &Graph, _: NodeId, _: NodeId) -> f64 {
        0.0
    }
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn estimate(&self, graph: &Graph, from: NodeId, to: NodeId) -> f64 {
        (**self).estimate(graph, from, to)
    }
}
