//! Errors raised when a grid is configured with unusable parameters.

use std::fmt;

/// Errors that can occur when building a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Width or height is zero or negative.
    InvalidDimensions { width: i32, height: i32 },
    /// Cell size is zero, negative, or not finite.
    InvalidCellSize(f32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid: dimensions must be positive, got {width}x{height}")
            }
            Self::InvalidCellSize(size) => {
                write!(f, "grid: cell size must be positive and finite, got {size}")
            }
        }
    }
}

impl std::error::Error for GridError {}
