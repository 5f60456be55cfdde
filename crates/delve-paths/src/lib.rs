//! Pathfinding over dungeon floor graphs.
//!
//! This crate turns a [`FloorPlan`](delve_core::FloorPlan) into a navigable
//! [`Graph`] and provides interchangeable shortest-path searches over it:
//!
//! - **A\*** with the octile heuristic ([`Pathfinder::astar_path`])
//! - **Dijkstra**, single-pair ([`Pathfinder::dijkstra_path`]) or as a full
//!   single-source precompute ([`FullDijkstra`], [`precompute`])
//! - **ALT** (A\*, landmarks, triangle inequality) ([`AltSearch`])
//!
//! Every search returns the same [`PathResult`], so callers can swap
//! algorithms or cross-check them.
//!
//! The [`Graph`] is immutable once built. Per-query state (g-scores,
//! parents) lives in a [`Pathfinder`], which reuses its buffers between
//! queries; use one `Pathfinder` per worker to search a shared graph in
//! parallel.
//!
//! # Movement costs
//!
//! | Step | Cost |
//! |---|---|
//! | orthogonal | `1 + penalty(to)` |
//! | diagonal | `√2 + penalty(to) + penalty(corner a) + penalty(corner b)` |
//!
//! Diagonal steps exist only when both corner tiles are walkable. Penalties
//! come from a [`CostModel`].

mod alt;
mod astar;
mod cost;
mod dijkstra;
mod distance;
mod error;
mod graph;
mod nearest;
mod pathfinder;
mod result;
mod traits;

pub use alt::{AltConfig, AltSearch, Landmark, Landmarks, select_landmark_positions};
pub use astar::astar_path;
pub use cost::{CostModel, DIAGONAL_STEP, ORTHOGONAL_STEP, step_cost};
pub use dijkstra::{DistanceMap, FullDijkstra, dijkstra_path, precompute};
pub use distance::{chebyshev, manhattan, octile};
pub use error::PathError;
pub use graph::{Edge, Graph, Node, NodeId};
pub use nearest::{NearestQuery, nearest_objects};
pub use pathfinder::{NO_BUDGET, Pathfinder};
pub use result::{PathNode, PathResult};
pub use traits::{Heuristic, Octile, Zero};
