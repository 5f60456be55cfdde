//! Navigable graph built from a floor plan.

use std::collections::HashMap;
use std::time::Instant;

use delve_core::{FloorPlan, Point, Range, TileClass};
use smallvec::SmallVec;

use crate::cost::{CostModel, DIAGONAL_STEP, ORTHOGONAL_STEP};

/// Dense index of a node inside its [`Graph`].
///
/// Ids are assigned in row-major position order, so two graphs built from
/// the same floor plan number their nodes identically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of this node in the graph's node array.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outgoing step to an adjacent node with its full movement cost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    /// Step geometry plus the destination penalty, plus the corner penalty
    /// for diagonal steps.
    pub cost: f64,
}

/// One walkable tile.
#[derive(Clone, Debug)]
pub struct Node {
    pos: Point,
    class: TileClass,
    penalty: f64,
    edges: SmallVec<[Edge; 8]>,
}

impl Node {
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn class(&self) -> TileClass {
        self.class
    }

    /// Penalty charged for every step landing on this node.
    #[inline]
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Outgoing steps, orthogonal ones first.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Immutable walkable-tile graph with up to 8 neighbours per node.
///
/// Orthogonal neighbours are linked whenever both tiles are walkable.
/// Diagonal neighbours are linked only if the two orthogonal tiles sharing
/// the crossed corner are walkable too, so paths never cut through a wall
/// corner. Adjacency is therefore symmetric.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<Point, NodeId>,
    bounds: Range,
}

impl Graph {
    /// Build a graph from `plan` using the default [`CostModel`].
    pub fn new(plan: &FloorPlan) -> Self {
        Self::with_costs(plan, &CostModel::default())
    }

    /// Build a graph from `plan` with the given penalty table.
    pub fn with_costs(plan: &FloorPlan, costs: &CostModel) -> Self {
        let started = Instant::now();

        let mut positions: Vec<Point> = plan.floor().iter().copied().collect();
        positions.sort_unstable();

        let mut nodes = Vec::with_capacity(positions.len());
        let mut index = HashMap::with_capacity(positions.len());
        for (i, &pos) in positions.iter().enumerate() {
            let class = plan.class_at(pos).unwrap_or_default();
            index.insert(pos, NodeId(i as u32));
            nodes.push(Node {
                pos,
                class,
                penalty: costs.penalty(class).max(0.0),
                edges: SmallVec::new(),
            });
        }

        let mut edge_count = 0;
        for i in 0..nodes.len() {
            let pos = nodes[i].pos;
            let penalty = |id: NodeId| nodes[id.index()].penalty;
            let mut edges: SmallVec<[Edge; 8]> = SmallVec::new();

            for d in Point::ORTHOGONAL {
                if let Some(&to) = index.get(&(pos + d)) {
                    edges.push(Edge {
                        to,
                        cost: ORTHOGONAL_STEP + penalty(to),
                    });
                }
            }

            for d in Point::DIAGONAL {
                let target = pos + d;
                let [a, b] = pos.corners_toward(target);
                let (Some(&ca), Some(&cb)) = (index.get(&a), index.get(&b)) else {
                    continue;
                };
                if let Some(&to) = index.get(&target) {
                    edges.push(Edge {
                        to,
                        cost: DIAGONAL_STEP + penalty(to) + penalty(ca) + penalty(cb),
                    });
                }
            }

            edge_count += edges.len();
            nodes[i].edges = edges;
        }

        let bounds = Range::bounding(positions.iter().copied());
        log::debug!(
            "graph: built {} nodes, {} edges, bounds {} in {:?}",
            nodes.len(),
            edge_count,
            bounds,
            started.elapsed()
        );

        Self {
            nodes,
            index,
            bounds,
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `p` is a walkable tile of this graph.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.index.contains_key(&p)
    }

    /// Id of the node at `p`.
    #[inline]
    pub fn id(&self, p: Point) -> Option<NodeId> {
        self.index.get(&p).copied()
    }

    /// The node with the given id.
    ///
    /// Panics if `id` does not come from this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Position of the node with the given id.
    #[inline]
    pub fn pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()].pos
    }

    /// All nodes, in id order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Bounding rectangle of the walkable tiles.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Classification of the tile at `p`.
    pub fn class_at(&self, p: Point) -> Option<TileClass> {
        self.id(p).map(|id| self.node(id).class)
    }

    /// Movement penalty of the tile at `p`.
    pub fn penalty_at(&self, p: Point) -> Option<f64> {
        self.id(p).map(|id| self.node(id).penalty)
    }

    /// Positions adjacent to `p` (empty if `p` is not in the graph).
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        self.id(p)
            .into_iter()
            .flat_map(move |id| self.node(id).edges.iter().map(move |e| self.pos(e.to)))
    }

    /// Cost of stepping from `from` to `to`, or `None` if they are not
    /// adjacent in the graph.
    pub fn edge_cost(&self, from: Point, to: Point) -> Option<f64> {
        let from = self.id(from)?;
        let to = self.id(to)?;
        self.node(from)
            .edges
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.cost)
    }

    /// Total cost of walking `path` step by step, or `None` if two
    /// consecutive positions are not adjacent.
    pub fn path_cost(&self, path: &[Point]) -> Option<f64> {
        if let Some(&first) = path.first() {
            self.id(first)?;
        }
        path.windows(2)
            .try_fold(0.0, |acc, w| Some(acc + self.edge_cost(w[0], w[1])?))
    }
}
