//! [`GridConfig`]: the parameters a grid is built from.

use glam::Vec3;

use crate::error::GridError;
use crate::layout::{DrawPlane, Layout, Pivot};

/// Configuration for a [`Grid`](crate::Grid).
///
/// All fields are public so hosts can fill it from their own settings (or
/// deserialize it with the `serde` feature); validation happens when the grid
/// is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
    /// Edge length of one cell in world units.
    pub cell_size: f32,
    /// World-space offset added to every computed position.
    pub origin: Vec3,
    pub pivot: Pivot,
    pub draw_plane: DrawPlane,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_size: 1.0,
            origin: Vec3::ZERO,
            pivot: Pivot::LowerLeft,
            draw_plane: DrawPlane::XY,
        }
    }
}

impl GridConfig {
    /// A default configuration with the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_pivot(mut self, pivot: Pivot) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_draw_plane(mut self, draw_plane: DrawPlane) -> Self {
        self.draw_plane = draw_plane;
        self
    }

    /// Validate the configuration and produce its [`Layout`].
    pub fn layout(&self) -> Result<Layout, GridError> {
        Layout::new(
            self.width,
            self.height,
            self.cell_size,
            self.origin,
            self.pivot,
            self.draw_plane,
        )
    }
}
