use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use delve_core::Point;

use crate::graph::{Graph, NodeId};
use crate::result::PathResult;
use crate::traits::Heuristic;

/// `max_cost` value meaning "no cost budget".
pub const NO_BUDGET: f64 = f64::INFINITY;

#[derive(Clone)]
pub(crate) struct SearchNode {
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            f: f64::INFINITY,
            parent: None,
            generation: 0,
            open: false,
        }
    }
}

/// Priority-queue entry, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy)]
pub(crate) struct NodeRef {
    pub(crate) id: NodeId,
    pub(crate) f: f64,
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, then the
        // lowest id on ties.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-query search state for single-pair searches over a [`Graph`].
///
/// A `Pathfinder` owns the g-scores, priorities and parent links of the
/// nodes it visits. Entries are stamped with a generation counter, so
/// starting a new query (or calling [`reset`](Self::reset)) invalidates all
/// previous state without touching it, and repeated queries incur no
/// allocations after the first one on a given graph size.
///
/// Searches take `&mut self`: one `Pathfinder` serves one query at a time.
/// Give each worker its own to search a shared graph concurrently.
#[derive(Clone, Default)]
pub struct Pathfinder {
    pub(crate) nodes: Vec<SearchNode>,
    pub(crate) generation: u32,
}

impl Pathfinder {
    /// Create an empty pathfinder; buffers grow on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pathfinder sized for graphs of up to `len` nodes.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            nodes: vec![SearchNode::default(); len],
            generation: 0,
        }
    }

    /// Forget the state of every previous query.
    pub fn reset(&mut self) {
        self.next_generation();
    }

    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stamps from 2^32 queries ago would look current.
            self.nodes.fill(SearchNode::default());
            self.generation = 1;
        }
        self.generation
    }

    /// Best-first search from `start` to `goal` guided by `heuristic`.
    ///
    /// Returns `None` if either endpoint is not in the graph, if the goal is
    /// unreachable, or if every remaining candidate costs more than
    /// `max_cost` (pass [`NO_BUDGET`] for an unbounded search).
    pub fn search<H: Heuristic>(
        &mut self,
        graph: &Graph,
        start: Point,
        goal: Point,
        max_cost: f64,
        heuristic: H,
    ) -> Option<PathResult> {
        let name = heuristic.name();
        let (Some(start_id), Some(goal_id)) = (graph.id(start), graph.id(goal)) else {
            log::trace!("{name}: endpoint not in graph ({start} -> {goal})");
            return None;
        };

        let started = Instant::now();
        if self.nodes.len() < graph.len() {
            self.nodes.resize(graph.len(), SearchNode::default());
        }
        let cur_gen = self.next_generation();

        // Initialise the start node.
        {
            let node = &mut self.nodes[start_id.index()];
            node.g = 0.0;
            node.f = heuristic.estimate(graph, start_id, goal_id);
            node.parent = None;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            id: start_id,
            f: self.nodes[start_id.index()].f,
        });

        let mut visited = 0usize;
        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.id.index();
            let cn = &self.nodes[ci];

            // Skip stale entries: closed since, or superseded by a cheaper push.
            if cn.generation != cur_gen || !cn.open || current.f > cn.f {
                continue;
            }

            let current_g = cn.g;
            if current_g > max_cost {
                log::debug!(
                    "{name}: budget {max_cost} exhausted ({start} -> {goal}, {visited} nodes visited)"
                );
                return None;
            }

            if current.id == goal_id {
                break 'search true;
            }

            self.nodes[ci].open = false;
            visited += 1;

            for edge in graph.node(current.id).edges() {
                let tentative_g = current_g + edge.cost;

                let n = &mut self.nodes[edge.to.index()];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.f = tentative_g + heuristic.estimate(graph, edge.to, goal_id);
                n.parent = Some(current.id);
                n.open = true;

                open.push(NodeRef {
                    id: edge.to,
                    f: n.f,
                });
            }
        };

        if !found {
            log::debug!("{name}: no path {start} -> {goal} ({visited} nodes visited)");
            return None;
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut cursor = Some(goal_id);
        while let Some(id) = cursor {
            path.push(graph.pos(id));
            cursor = self.nodes[id.index()].parent;
        }
        path.reverse();

        let total_cost = self.nodes[goal_id.index()].g;
        log::debug!(
            "{name}: {start} -> {goal} cost {total_cost:.3}, {} steps, {visited} nodes visited in {:?}",
            path.len() - 1,
            started.elapsed()
        );
        Some(PathResult::new(path, total_cost, Some(visited)))
    }
}
