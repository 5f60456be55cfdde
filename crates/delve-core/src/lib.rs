//! **delve-core**: Dungeon floor model shared by the *delve* crates.
//!
//! This crate provides the foundational types handed from a map generator to
//! the pathfinding core: geometry primitives, tile classifications and the
//! [`FloorPlan`] container of walkable tiles.

pub mod floor;
pub mod geom;
pub mod tile;

pub use floor::{FloorPlan, ParseError};
pub use geom::{Point, Range};
pub use tile::TileClass;
