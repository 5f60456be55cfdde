use std::f64::consts::SQRT_2;

use delve_core::{Point, TileClass};

/// Base cost of an orthogonal step.
pub const ORTHOGONAL_STEP: f64 = 1.0;

/// Base cost of a diagonal step.
pub const DIAGONAL_STEP: f64 = SQRT_2;

/// Additive penalties charged for stepping onto a tile, by tile class.
///
/// Plain floor is always free. Penalties are clamped to be non-negative when
/// a [`Graph`](crate::Graph) is built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostModel {
    /// Hazards such as traps.
    pub hazard: f64,
    /// High-value or obstructing objects: treasure, landmark markers, props.
    /// Large enough that routes go around them when they can.
    pub obstruction: f64,
    /// Every other classified tile.
    pub other: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            hazard: 3.0,
            obstruction: 100.0,
            other: 10.0,
        }
    }
}

impl CostModel {
    /// Penalty for stepping onto a tile of the given class.
    pub fn penalty(&self, class: TileClass) -> f64 {
        match class {
            TileClass::Floor => 0.0,
            TileClass::Trap => self.hazard,
            TileClass::Treasure | TileClass::Landmark | TileClass::Prop => self.obstruction,
            TileClass::Enemy
            | TileClass::Boss
            | TileClass::Quest
            | TileClass::Start
            | TileClass::End
            | TileClass::Water
            | TileClass::Lava => self.other,
        }
    }
}

/// Geometric cost of a single step between adjacent tiles, without any
/// penalties.
#[inline]
pub fn step_cost(from: Point, to: Point) -> f64 {
    if from.is_diagonal_to(to) {
        DIAGONAL_STEP
    } else {
        ORTHOGONAL_STEP
    }
}
