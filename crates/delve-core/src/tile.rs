//! Tile classification for walkable dungeon tiles.

use std::fmt;

/// What occupies a walkable tile.
///
/// Plain floor carries no extra meaning; every other variant is an object or
/// terrain feature placed by the map generator. Matches on this enum are kept
/// exhaustive so adding a variant forces every cost table to be revisited.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileClass {
    #[default]
    Floor,
    Trap,
    Treasure,
    Landmark,
    Prop,
    Enemy,
    Boss,
    Quest,
    Start,
    End,
    Water,
    Lava,
}

impl TileClass {
    /// Every class, in declaration order.
    pub const ALL: [TileClass; 12] = [
        TileClass::Floor,
        TileClass::Trap,
        TileClass::Treasure,
        TileClass::Landmark,
        TileClass::Prop,
        TileClass::Enemy,
        TileClass::Boss,
        TileClass::Quest,
        TileClass::Start,
        TileClass::End,
        TileClass::Water,
        TileClass::Lava,
    ];

    /// ASCII glyph used by [`FloorPlan::parse`](crate::FloorPlan::parse).
    pub const fn glyph(self) -> char {
        match self {
            TileClass::Floor => '.',
            TileClass::Trap => '^',
            TileClass::Treasure => '$',
            TileClass::Landmark => 'L',
            TileClass::Prop => '&',
            TileClass::Enemy => 'e',
            TileClass::Boss => 'B',
            TileClass::Quest => '?',
            TileClass::Start => 'S',
            TileClass::End => 'E',
            TileClass::Water => '~',
            TileClass::Lava => '%',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub fn from_glyph(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.glyph() == ch)
    }
}

impl fmt::Display for TileClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileClass::Floor => "floor",
            TileClass::Trap => "trap",
            TileClass::Treasure => "treasure",
            TileClass::Landmark => "landmark",
            TileClass::Prop => "prop",
            TileClass::Enemy => "enemy",
            TileClass::Boss => "boss",
            TileClass::Quest => "quest",
            TileClass::Start => "start",
            TileClass::End => "end",
            TileClass::Water => "water",
            TileClass::Lava => "lava",
        };
        f.write_str(name)
    }
}
