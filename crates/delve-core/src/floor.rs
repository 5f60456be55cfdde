//! The finished floor layout handed over by a map generator.
//!
//! A [`FloorPlan`] is a sparse set of walkable tiles plus the classification
//! of the ones that hold an object or terrain feature. It can be built
//! programmatically or parsed from ASCII art, where `#` and space are walls,
//! `.` is plain floor and every other accepted character is a
//! [`TileClass::glyph`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::geom::{Point, Range};
use crate::tile::TileClass;

/// Walkable tiles and their classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorPlan {
    floor: HashSet<Point>,
    objects: HashMap<Point, TileClass>,
}

impl FloorPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plan from raw generator output.
    ///
    /// Only `floor` is walkable: object entries that fall outside it are
    /// dropped.
    pub fn from_parts(floor: HashSet<Point>, mut objects: HashMap<Point, TileClass>) -> Self {
        objects.retain(|p, c| floor.contains(p) && *c != TileClass::Floor);
        Self { floor, objects }
    }

    /// A plan where every tile of `rng` is plain floor.
    pub fn from_range(rng: Range) -> Self {
        Self {
            floor: rng.iter().collect(),
            objects: HashMap::new(),
        }
    }

    /// Parse an ASCII map. Lines are separated by `'\n'` and must all have
    /// the same width; leading and trailing blank lines are ignored.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim_matches(|c| c == '\n' || c == '\r');
        let mut plan = Self::new();
        let mut width: Option<usize> = None;

        for (y, line) in s.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let w = line.chars().count();
            match width {
                None => width = Some(w),
                Some(expected) if expected != w => {
                    return Err(ParseError::InconsistentWidth {
                        line: y,
                        expected,
                        found: w,
                    });
                }
                Some(_) => {}
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    '#' | ' ' => {}
                    '.' => plan.insert_floor(p),
                    _ => match TileClass::from_glyph(ch) {
                        Some(class) => plan.set_object(p, class),
                        None => return Err(ParseError::InvalidRune { ch, pos: p }),
                    },
                }
            }
        }
        Ok(plan)
    }

    /// Mark `p` as walkable plain floor (keeps an existing object).
    pub fn insert_floor(&mut self, p: Point) {
        self.floor.insert(p);
    }

    /// Place an object on `p`, making it walkable if it was not.
    ///
    /// Setting [`TileClass::Floor`] clears any object on the tile.
    pub fn set_object(&mut self, p: Point, class: TileClass) {
        self.floor.insert(p);
        if class == TileClass::Floor {
            self.objects.remove(&p);
        } else {
            self.objects.insert(p, class);
        }
    }

    /// Whether `p` is walkable.
    #[inline]
    pub fn is_floor(&self, p: Point) -> bool {
        self.floor.contains(&p)
    }

    /// Classification of `p`, or `None` if it is not walkable.
    pub fn class_at(&self, p: Point) -> Option<TileClass> {
        if !self.is_floor(p) {
            return None;
        }
        Some(self.objects.get(&p).copied().unwrap_or_default())
    }

    /// The walkable tile set.
    pub fn floor(&self) -> &HashSet<Point> {
        &self.floor
    }

    /// The classified (non-plain) tiles.
    pub fn objects(&self) -> &HashMap<Point, TileClass> {
        &self.objects
    }

    /// Number of walkable tiles.
    pub fn len(&self) -> usize {
        self.floor.len()
    }

    /// Whether there are no walkable tiles.
    pub fn is_empty(&self) -> bool {
        self.floor.is_empty()
    }

    /// Bounding rectangle of the walkable tiles.
    pub fn bounds(&self) -> Range {
        Range::bounding(self.floor.iter().copied())
    }
}

/// Errors that can occur when parsing an ASCII floor plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line's width differs from the first line's.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is neither a wall, floor nor tile glyph.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "floor plan: line {line} is {found} wide, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "floor plan: invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
#####
#.^.#
#.$.#
#####
";

    #[test]
    fn parse_room() {
        let plan = FloorPlan::parse(ROOM).unwrap();
        assert_eq!(plan.len(), 6);
        assert_eq!(plan.class_at(Point::new(1, 1)), Some(TileClass::Floor));
        assert_eq!(plan.class_at(Point::new(2, 1)), Some(TileClass::Trap));
        assert_eq!(plan.class_at(Point::new(2, 2)), Some(TileClass::Treasure));
        assert_eq!(plan.class_at(Point::new(0, 0)), None);
        assert_eq!(plan.objects().len(), 2);
        assert_eq!(plan.bounds(), Range::new(1, 1, 4, 3));
    }

    #[test]
    fn spaces_are_walls() {
        let plan = FloorPlan::parse(". .").unwrap();
        assert!(plan.is_floor(Point::new(0, 0)));
        assert!(!plan.is_floor(Point::new(1, 0)));
        assert!(plan.is_floor(Point::new(2, 0)));
    }

    #[test]
    fn inconsistent_width_error() {
        let err = FloorPlan::parse("..\n...").unwrap_err();
        assert_eq!(
            err,
            ParseError::InconsistentWidth {
                line: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn invalid_rune_error() {
        let err = FloorPlan::parse("..\n.X").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidRune {
                ch: 'X',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn set_object_makes_walkable_and_floor_clears() {
        let mut plan = FloorPlan::new();
        let p = Point::new(3, 3);
        plan.set_object(p, TileClass::Lava);
        assert!(plan.is_floor(p));
        assert_eq!(plan.class_at(p), Some(TileClass::Lava));
        plan.set_object(p, TileClass::Floor);
        assert_eq!(plan.class_at(p), Some(TileClass::Floor));
        assert!(plan.objects().is_empty());
    }

    #[test]
    fn from_parts_drops_objects_off_the_floor() {
        let floor: HashSet<Point> = [Point::new(0, 0)].into_iter().collect();
        let objects: HashMap<Point, TileClass> = [
            (Point::new(0, 0), TileClass::Enemy),
            (Point::new(1, 0), TileClass::Prop),
        ]
        .into_iter()
        .collect();
        let plan = FloorPlan::from_parts(floor, objects);
        assert_eq!(plan.len(), 1);
        assert!(!plan.is_floor(Point::new(1, 0)));
        assert_eq!(plan.class_at(Point::new(1, 0)), None);
        assert_eq!(plan.class_at(Point::new(0, 0)), Some(TileClass::Enemy));
        assert_eq!(plan.objects().len(), 1);
    }

    #[test]
    fn from_range_is_all_floor() {
        let plan = FloorPlan::from_range(Range::new(0, 0, 5, 5));
        assert_eq!(plan.len(), 25);
        assert!(plan.objects().is_empty());
    }
}
