//! Grid-space ↔ world-space conversion.
//!
//! A [`Layout`] fixes the grid's dimensions, cell size and world placement.
//! Internally every computation happens in a lower-left-corner frame; the
//! [`Pivot`] shifts that frame so that world (0, 0) sits either at the grid's
//! lower-left corner or at its centre, and the [`DrawPlane`] picks which two
//! world axes the grid's X and Y run along.

use glam::Vec3;

use crate::error::GridError;
use crate::geom::Point;

/// Where grid-space `(0, 0)` sits relative to the world origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pivot {
    /// The grid is centred on the origin.
    Center,
    /// The grid's lower-left corner is at the origin.
    #[default]
    LowerLeft,
}

/// Which pair of world axes the grid lies on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawPlane {
    /// Grid X → world X, grid Y → world Y, world Z held at zero.
    #[default]
    XY,
    /// Grid X → world X, grid Y → world Z, world Y held at zero.
    XZ,
}

/// Validated grid geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    width: i32,
    height: i32,
    cell_size: f32,
    origin: Vec3,
    pivot: Pivot,
    draw_plane: DrawPlane,
}

impl Layout {
    /// Create a layout, rejecting non-positive dimensions or cell size.
    pub fn new(
        width: i32,
        height: i32,
        cell_size: f32,
        origin: Vec3,
        pivot: Pivot,
        draw_plane: DrawPlane,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            width,
            height,
            cell_size,
            origin,
            pivot,
            draw_plane,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    #[inline]
    pub fn draw_plane(&self) -> DrawPlane {
        self.draw_plane
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always `false`: a validated layout has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `(x, y)` lies inside the grid. Negative coordinates are
    /// always outside.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Flat row-major index of `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn point(&self, index: usize) -> Point {
        let w = self.width as usize;
        Point::new((index % w) as i32, (index / w) as i32)
    }

    /// Half the grid's world-space extent along grid X and Y.
    #[inline]
    fn half_extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_size * 0.5,
            self.height as f32 * self.cell_size * 0.5,
        )
    }

    /// The grid cell containing `world`.
    ///
    /// The result is floored, not clamped: points outside the grid produce
    /// out-of-bounds (possibly negative) coordinates. A non-finite component
    /// maps to `i32::MIN`, which no grid contains.
    pub fn world_to_grid(&self, world: Vec3) -> Point {
        let local = world - self.origin;
        let mut wx = local.x;
        let mut wy = match self.draw_plane {
            DrawPlane::XY => local.y,
            DrawPlane::XZ => local.z,
        };

        if self.pivot == Pivot::Center {
            let (hx, hy) = self.half_extent();
            wx += hx;
            wy += hy;
        }

        Point::new(cell_coord(wx / self.cell_size), cell_coord(wy / self.cell_size))
    }

    /// World position of cell `(x, y)`: its centre when `centered`, otherwise
    /// its lower-left corner.
    ///
    /// Coordinates are not bounds-checked; `(width, height)` is a valid input
    /// and yields the grid's far corner.
    pub fn grid_to_world(&self, x: i32, y: i32, centered: bool) -> Vec3 {
        let mut px = x as f32 * self.cell_size;
        let mut py = y as f32 * self.cell_size;

        if self.pivot == Pivot::Center {
            let (hx, hy) = self.half_extent();
            px -= hx;
            py -= hy;
        }

        if centered {
            px += self.cell_size * 0.5;
            py += self.cell_size * 0.5;
        }

        let planar = match self.draw_plane {
            DrawPlane::XY => Vec3::new(px, py, 0.0),
            DrawPlane::XZ => Vec3::new(px, 0.0, py),
        };
        planar + self.origin
    }

    /// Line segments outlining every cell, for debug drawing by the host.
    ///
    /// Each cell contributes its lower and left edges; the grid's top and
    /// right borders close the outline.
    pub fn outline_segments(&self) -> Vec<(Vec3, Vec3)> {
        let mut segments = Vec::with_capacity(self.len() * 2 + 2);
        for x in 0..self.width {
            for y in 0..self.height {
                let start = self.grid_to_world(x, y, false);
                segments.push((start, self.grid_to_world(x, y + 1, false)));
                segments.push((start, self.grid_to_world(x + 1, y, false)));
            }
        }

        let upper_left = self.grid_to_world(0, self.height, false);
        let upper_right = self.grid_to_world(self.width, self.height, false);
        let lower_right = self.grid_to_world(self.width, 0, false);
        segments.push((upper_left, upper_right));
        segments.push((upper_right, lower_right));
        segments
    }
}

/// Floor to a cell coordinate; NaN and infinities land outside every grid.
#[inline]
fn cell_coord(v: f32) -> i32 {
    if v.is_finite() { v.floor() as i32 } else { i32::MIN }
}
