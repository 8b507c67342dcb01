use std::fmt;

use tilegrid_core::Point;

/// Which end of a path query an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Invalid path query.
///
/// A query whose endpoints are valid but unconnected is not an error; it
/// yields `Ok(None)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    /// The endpoint lies outside the grid.
    OutOfBounds { endpoint: Endpoint, pos: Point },
    /// The endpoint is unset or not walkable.
    NotWalkable { endpoint: Endpoint, pos: Point },
}

impl PathError {
    /// The endpoint the error is about.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::OutOfBounds { endpoint, .. } | Self::NotWalkable { endpoint, .. } => *endpoint,
        }
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { endpoint, pos } => {
                write!(f, "path: {endpoint} {pos} is outside the grid")
            }
            Self::NotWalkable { endpoint, pos } => {
                write!(f, "path: {endpoint} {pos} is not walkable")
            }
        }
    }
}

impl std::error::Error for PathError {}
