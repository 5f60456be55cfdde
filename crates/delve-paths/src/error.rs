use std::fmt;

use delve_core::Point;

/// Programmer errors raised by precomputing searches.
///
/// Ordinary "no path" outcomes are reported as `None`, never as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The source of a precompute is not a walkable tile of the graph.
    UnknownSource(Point),
    /// A full precompute was asked to run a second time.
    AlreadyComputed(Point),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSource(p) => write!(f, "source {p} is not in the graph"),
            Self::AlreadyComputed(p) => {
                write!(f, "full distance map from {p} has already been computed")
            }
        }
    }
}

impl std::error::Error for PathError {}
