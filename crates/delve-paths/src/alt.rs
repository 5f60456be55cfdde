//! ALT search: A* guided by landmark distances and the triangle inequality.
//!
//! A handful of landmark tiles get a full [`DistanceMap`] each. For any node
//! `u` and goal `t`, the difference of their distances to a landmark bounds
//! the cost of `u → t` from below, which makes a much tighter heuristic than
//! straight-line distance on maps with walls and expensive tiles.
//!
//! Movement costs charge the penalty of the tile being entered, so
//! `d(t, u) = d(u, t) + penalty(u) − penalty(t)`: distances are not
//! symmetric. The backward bound `d(l, u) − d(l, t)` is corrected by that
//! skew, keeping the estimate admissible on every map.

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use delve_core::{Point, Range};

use crate::dijkstra::{DistanceMap, precompute};
use crate::distance::octile;
use crate::error::PathError;
use crate::graph::{Graph, NodeId};
use crate::pathfinder::Pathfinder;
use crate::result::PathResult;
use crate::traits::Heuristic;

/// Landmark selection settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AltConfig {
    /// Landmarks to place, the start included. Values below 1 count as 1.
    pub landmark_count: usize,
    /// Scale of the exclusion radius `scale · √(area / landmark_count)`
    /// kept between greedily chosen landmarks.
    pub exclusion_scale: f64,
}

impl Default for AltConfig {
    fn default() -> Self {
        Self {
            landmark_count: 4,
            exclusion_scale: 0.5,
        }
    }
}

impl AltConfig {
    /// Chebyshev radius blocked around each chosen landmark on a map with
    /// the given bounds; at least 1.
    pub fn exclusion_radius(&self, bounds: Range) -> i32 {
        let k = self.landmark_count.max(1) as f64;
        let area = bounds.len() as f64;
        ((self.exclusion_scale * (area / k).sqrt()) as i32).max(1)
    }
}

/// A landmark tile and its distances to every reachable node.
#[derive(Debug, Clone)]
pub struct Landmark<'g> {
    map: DistanceMap<'g>,
}

impl<'g> Landmark<'g> {
    pub fn pos(&self) -> Point {
        self.map.source()
    }

    pub fn distances(&self) -> &DistanceMap<'g> {
        &self.map
    }
}

impl fmt::Display for Landmark<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "landmark at {}", self.pos())
    }
}

/// The landmark set of an [`AltSearch`]; also usable on its own as a
/// [`Heuristic`] for searches over the graph it was computed on.
#[derive(Debug, Clone)]
pub struct Landmarks<'g> {
    items: Vec<Landmark<'g>>,
}

impl<'g> Landmarks<'g> {
    /// Precompute a distance map from each position.
    pub fn compute(graph: &'g Graph, positions: &[Point]) -> Result<Self, PathError> {
        let items = positions
            .iter()
            .map(|&p| precompute(graph, p).map(|map| Landmark { map }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    pub fn positions(&self) -> Vec<Point> {
        self.items.iter().map(Landmark::pos).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark<'g>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Landmarks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "landmarks: [")?;
        for (i, lm) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", lm.pos())?;
        }
        write!(f, "]")
    }
}

impl Heuristic for Landmarks<'_> {
    fn name(&self) -> &'static str {
        "alt"
    }

    /// Distances only bound costs on the graph they were computed over; any
    /// other graph, clones included, gets the octile estimate.
    fn estimate(&self, graph: &Graph, from: NodeId, to: NodeId) -> f64 {
        if self.items.iter().any(|lm| !std::ptr::eq(lm.map.graph(), graph)) {
            return octile(graph.pos(from), graph.pos(to));
        }
        let skew = graph.node(from).penalty() - graph.node(to).penalty();
        let mut h = 0.0f64;
        for lm in &self.items {
            let du = lm.map.dist(from);
            let dt = lm.map.dist(to);
            if !du.is_finite() || !dt.is_finite() {
                continue;
            }
            h = h.max(dt - du).max(du - dt - skew);
        }
        if h > 0.0 {
            h
        } else {
            octile(graph.pos(from), graph.pos(to))
        }
    }
}

/// Choose well-spread landmark positions, `start` first.
///
/// Reachable tiles are ranked farthest-first from `start`, then picked
/// greedily while skipping any tile within the
/// [exclusion radius](AltConfig::exclusion_radius) of an earlier pick. If
/// that leaves the set short, the remaining slots are filled from the
/// ranking ignoring the radius. Fewer positions than requested come back
/// only when fewer tiles are reachable.
pub fn select_landmark_positions(
    graph: &Graph,
    start: Point,
    config: &AltConfig,
) -> Result<Vec<Point>, PathError> {
    let wanted = config.landmark_count.max(1);
    let ranked = precompute(graph, start)?.farthest_first();
    let radius = config.exclusion_radius(graph.bounds());

    let mut blocked: HashSet<Point> = HashSet::new();
    let block = |p: Point, blocked: &mut HashSet<Point>| {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let q = p.shift(dx, dy);
                if graph.contains(q) {
                    blocked.insert(q);
                }
            }
        }
    };

    let mut selected = Vec::with_capacity(wanted);
    selected.push(start);
    block(start, &mut blocked);

    for &p in &ranked {
        if selected.len() >= wanted {
            break;
        }
        if blocked.contains(&p) {
            continue;
        }
        selected.push(p);
        block(p, &mut blocked);
    }

    if selected.len() < wanted {
        log::debug!(
            "alt: exclusion radius {radius} left {}/{wanted} landmarks, filling without it",
            selected.len()
        );
        for &p in &ranked {
            if selected.len() >= wanted {
                break;
            }
            if !selected.contains(&p) {
                selected.push(p);
            }
        }
    }

    Ok(selected)
}

/// A* with the ALT heuristic over one graph.
///
/// Building costs one full Dijkstra precompute for ranking plus one per
/// landmark; it pays off over many queries on the same graph.
pub struct AltSearch<'g> {
    graph: &'g Graph,
    landmarks: Landmarks<'g>,
    pathfinder: Pathfinder,
}

impl<'g> AltSearch<'g> {
    /// Place `landmark_count` landmarks starting from `start` with the
    /// default exclusion scale.
    pub fn new(graph: &'g Graph, start: Point, landmark_count: usize) -> Result<Self, PathError> {
        let config = AltConfig {
            landmark_count,
            ..AltConfig::default()
        };
        Self::with_config(graph, start, &config)
    }

    pub fn with_config(
        graph: &'g Graph,
        start: Point,
        config: &AltConfig,
    ) -> Result<Self, PathError> {
        let started = Instant::now();
        let positions = select_landmark_positions(graph, start, config)?;
        let landmarks = Landmarks::compute(graph, &positions)?;
        log::debug!("alt: built {landmarks} in {:?}", started.elapsed());
        Ok(Self {
            graph,
            landmarks,
            pathfinder: Pathfinder::with_capacity(graph.len()),
        })
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn landmarks(&self) -> &Landmarks<'g> {
        &self.landmarks
    }

    pub fn landmark_positions(&self) -> Vec<Point> {
        self.landmarks.positions()
    }

    /// The ALT estimate of the cost from `from` to `to`, or `None` if either
    /// is not in the graph.
    pub fn heuristic(&self, from: Point, to: Point) -> Option<f64> {
        let from = self.graph.id(from)?;
        let to = self.graph.id(to)?;
        Some(self.landmarks.estimate(self.graph, from, to))
    }

    /// Cheapest path from `start` to `goal`; same contract as
    /// [`Pathfinder::astar_path`].
    pub fn find_path(&mut self, start: Point, goal: Point, max_cost: f64) -> Option<PathResult> {
        self.pathfinder
            .search(self.graph, start, goal, max_cost, &self.landmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::astar_path;
    use crate::dijkstra::dijkstra_path;
    use crate::pathfinder::NO_BUDGET;
    use delve_core::{FloorPlan, TileClass};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn graph(s: &str) -> Graph {
        Graph::new(&FloorPlan::parse(s).unwrap())
    }

    fn open_grid(w: i32, h: i32) -> Graph {
        Graph::new(&FloorPlan::from_range(Range::new(0, 0, w, h)))
    }

    fn random_plan(rng: &mut impl Rng, w: i32, h: i32) -> FloorPlan {
        let mut plan = FloorPlan::new();
        for p in Range::new(0, 0, w, h).iter() {
            match rng.random_range(0..20u32) {
                0..=4 => {}
                5 => plan.set_object(p, TileClass::Trap),
                6 => plan.set_object(p, TileClass::Treasure),
                7 => plan.set_object(p, TileClass::Water),
                _ => plan.insert_floor(p),
            }
        }
        plan
    }

    #[test]
    fn exclusion_radius_formula() {
        let cfg = AltConfig::default();
        assert_eq!(cfg.exclusion_radius(Range::new(0, 0, 8, 8)), 2);
        assert_eq!(cfg.exclusion_radius(Range::new(0, 0, 3, 1)), 1);
        let wide = AltConfig {
            landmark_count: 1,
            exclusion_scale: 0.5,
        };
        assert_eq!(wide.exclusion_radius(Range::new(0, 0, 20, 20)), 10);
    }

    #[test]
    fn landmarks_are_distinct_and_start_first() {
        let g = open_grid(8, 8);
        let alt = AltSearch::new(&g, Point::new(0, 0), 4).unwrap();
        let pos = alt.landmark_positions();
        assert_eq!(pos.len(), 4);
        assert_eq!(pos[0], Point::new(0, 0));
        // Farthest tile from the corner is the opposite corner.
        assert_eq!(pos[1], Point::new(7, 7));
        let unique: HashSet<Point> = pos.iter().copied().collect();
        assert_eq!(unique.len(), pos.len());
    }

    #[test]
    fn landmarks_respect_exclusion_when_room_allows() {
        let g = open_grid(16, 16);
        let cfg = AltConfig {
            landmark_count: 4,
            exclusion_scale: 0.5,
        };
        let radius = cfg.exclusion_radius(g.bounds());
        let pos = select_landmark_positions(&g, Point::new(0, 0), &cfg).unwrap();
        assert_eq!(pos.len(), 4);
        for (i, a) in pos.iter().enumerate() {
            for b in &pos[i + 1..] {
                assert!(crate::chebyshev(*a, *b) > radius, "{a} too close to {b}");
            }
        }
    }

    #[test]
    fn small_map_degrades_gracefully() {
        let g = graph("...");
        let pos = select_landmark_positions(
            &g,
            Point::new(0, 0),
            &AltConfig {
                landmark_count: 5,
                exclusion_scale: 0.5,
            },
        )
        .unwrap();
        assert_eq!(pos.len(), 3);
        let unique: HashSet<Point> = pos.iter().copied().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(pos[0], Point::new(0, 0));
    }

    #[test]
    fn zero_landmarks_means_start_only() {
        let g = open_grid(4, 4);
        let alt = AltSearch::new(&g, Point::new(1, 1), 0).unwrap();
        assert_eq!(alt.landmark_positions(), vec![Point::new(1, 1)]);
    }

    #[test]
    fn unknown_start_is_an_error() {
        let g = open_grid(4, 4);
        assert_eq!(
            AltSearch::new(&g, Point::new(9, 9), 3).err(),
            Some(PathError::UnknownSource(Point::new(9, 9)))
        );
    }

    #[test]
    fn matches_astar_on_open_grid() {
        let g = open_grid(6, 6);
        let mut alt = AltSearch::new(&g, Point::new(0, 0), 4).unwrap();
        let start = Point::new(0, 0);
        let goal = Point::new(5, 5);
        let a = astar_path(&g, start, goal, NO_BUDGET).unwrap();
        let l = alt.find_path(start, goal, NO_BUDGET).unwrap();
        assert!((a.total_cost() - l.total_cost()).abs() < 1e-3);
        assert!(l.len() <= a.len());
    }

    #[test]
    fn trivial_missing_and_budget() {
        let g = open_grid(5, 5);
        let mut alt = AltSearch::new(&g, Point::new(0, 0), 3).unwrap();
        let p = Point::new(2, 2);
        let res = alt.find_path(p, p, NO_BUDGET).unwrap();
        assert_eq!(res.path(), &[p]);
        assert_eq!(res.total_cost(), 0.0);
        assert!(alt.find_path(p, Point::new(7, 7), NO_BUDGET).is_none());
        assert!(alt.find_path(Point::new(0, 0), Point::new(4, 4), 1.0).is_none());
    }

    #[test]
    fn disconnected_goal_is_none() {
        let g = graph("..#..\n..#..");
        let mut alt = AltSearch::new(&g, Point::new(0, 0), 2).unwrap();
        assert!(alt.find_path(Point::new(0, 0), Point::new(4, 1), NO_BUDGET).is_none());
        // Inside the other half no landmark applies; octile takes over.
        let res = alt
            .find_path(Point::new(3, 0), Point::new(4, 1), NO_BUDGET)
            .unwrap();
        assert!((res.total_cost() - std::f64::consts::SQRT_2).abs() < 1e-9);
        assert_eq!(
            alt.heuristic(Point::new(3, 0), Point::new(4, 1)),
            Some(octile(Point::new(3, 0), Point::new(4, 1)))
        );
    }

    #[test]
    fn asymmetric_penalties_stay_admissible() {
        // From the landmark at (0, 0) the treasure costs 102 and its
        // neighbour 1, yet stepping off the treasure costs only 1.
        let g = graph("..$");
        let alt = AltSearch::new(&g, Point::new(0, 0), 1).unwrap();
        let h = alt.heuristic(Point::new(2, 0), Point::new(1, 0)).unwrap();
        assert!(h <= 1.0 + 1e-9, "h = {h}");
        let forward = alt.heuristic(Point::new(1, 0), Point::new(2, 0)).unwrap();
        assert!((forward - 101.0).abs() < 1e-9);
    }

    #[test]
    fn heuristic_is_admissible_everywhere() {
        let g = graph(
            "
.......
.^^#.$.
.#...#.
.#.L.#.
...~...
",
        );
        let alt = AltSearch::new(&g, Point::new(0, 0), 3).unwrap();
        for from in g.nodes() {
            let map = precompute(&g, from.pos()).unwrap();
            for to in g.nodes() {
                let Some(truth) = map.cost_at(to.pos()) else {
                    continue;
                };
                let h = alt.heuristic(from.pos(), to.pos()).unwrap();
                assert!(
                    h <= truth + 1e-9,
                    "h({}, {}) = {h} > {truth}",
                    from.pos(),
                    to.pos()
                );
            }
        }
    }

    #[test]
    fn algorithms_agree_on_random_floors() {
        for seed in 0..6u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let g = Graph::new(&random_plan(&mut rng, 14, 10));
            let Some(start) = g.nodes().first().map(|n| n.pos()) else {
                continue;
            };
            let mut alt = AltSearch::new(&g, start, 4).unwrap();
            let mut pf = Pathfinder::new();

            for _ in 0..40 {
                let a = g.nodes()[rng.random_range(0..g.len())].pos();
                let b = g.nodes()[rng.random_range(0..g.len())].pos();
                let d = dijkstra_path(&g, a, b, NO_BUDGET);
                let s = pf.astar_path(&g, a, b, NO_BUDGET);
                let l = alt.find_path(a, b, NO_BUDGET);
                match (d, s, l) {
                    (Some(d), Some(s), Some(l)) => {
                        assert!((d.total_cost() - s.total_cost()).abs() < 1e-3);
                        assert!((d.total_cost() - l.total_cost()).abs() < 1e-3);
                        for res in [&d, &s, &l] {
                            assert_eq!(res.start(), a);
                            assert_eq!(res.goal(), b);
                            let walked = g.path_cost(res.path()).unwrap();
                            assert!((walked - res.total_cost()).abs() < 1e-6);
                        }
                        let h = alt.heuristic(a, b).unwrap();
                        assert!(h <= d.total_cost() + 1e-6);
                    }
                    (None, None, None) => {}
                    other => panic!("seed {seed}: {a} -> {b} disagree: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn display_lists_positions() {
        let g = graph("....");
        let alt = AltSearch::new(&g, Point::new(0, 0), 2).unwrap();
        assert_eq!(alt.landmarks().to_string(), "landmarks: [(0, 0), (3, 0)]");
        assert_eq!(
            alt.landmarks().iter().next().map(ToString::to_string),
            Some("landmark at (0, 0)".to_string())
        );
    }

    #[test]
    fn landmarks_from_another_graph_fall_back_to_octile() {
        let small = open_grid(3, 3);
        let big = open_grid(9, 9);
        let alt = AltSearch::new(&small, Point::new(0, 0), 2).unwrap();
        let (a, b) = (Point::new(0, 0), Point::new(8, 8));

        let mut pf = Pathfinder::new();
        let res = pf.search(&big, a, b, NO_BUDGET, alt.landmarks()).unwrap();
        let expected = astar_path(&big, a, b, NO_BUDGET).unwrap();
        assert!((res.total_cost() - expected.total_cost()).abs() < 1e-9);

        let (from, to) = (big.id(a).unwrap(), big.id(b).unwrap());
        assert_eq!(alt.landmarks().estimate(&big, from, to), octile(a, b));
    }
}
