use std::collections::HashMap;

use delve_core::{Point, TileClass};

use crate::distance::manhattan;

/// Filters for [`nearest_objects`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestQuery {
    /// Keep only objects of this class.
    pub class: Option<TileClass>,
    /// Keep only objects at most this Manhattan distance away.
    pub max_distance: Option<i32>,
    /// Return at most this many objects.
    pub max_count: Option<usize>,
}

impl NearestQuery {
    pub fn of_class(class: TileClass) -> Self {
        Self {
            class: Some(class),
            ..Self::default()
        }
    }

    pub fn within(self, max_distance: i32) -> Self {
        Self {
            max_distance: Some(max_distance),
            ..self
        }
    }

    pub fn limit(self, max_count: usize) -> Self {
        Self {
            max_count: Some(max_count),
            ..self
        }
    }
}

/// Object positions ranked by Manhattan distance from `from`, nearest first.
///
/// Equal distances are ordered by position. A zero `max_count` or a
/// non-positive `max_distance` yields nothing.
pub fn nearest_objects(
    from: Point,
    objects: &HashMap<Point, TileClass>,
    query: &NearestQuery,
) -> Vec<Point> {
    if query.max_count == Some(0) || query.max_distance.is_some_and(|d| d <= 0) {
        return Vec::new();
    }

    let mut candidates: Vec<(i32, Point)> = objects
        .iter()
        .filter(|&(_, &class)| query.class.is_none_or(|wanted| wanted == class))
        .map(|(&p, _)| (manhattan(from, p), p))
        .filter(|&(d, _)| query.max_distance.is_none_or(|max| d <= max))
        .collect();

    if query.max_count == Some(1) {
        return candidates.into_iter().min().map(|(_, p)| p).into_iter().collect();
    }

    candidates.sort_unstable();
    if let Some(n) = query.max_count {
        candidates.truncate(n);
    }
    candidates.into_iter().map(|(_, p)| p).collect()
}
