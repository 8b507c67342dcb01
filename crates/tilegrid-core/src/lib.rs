//! **tilegrid-core**: a generic 2D grid container placed in world space.
//!
//! This crate provides the grid that the rest of the *tilegrid* workspace
//! builds on: integer geometry, grid ↔ world coordinate conversion under
//! configurable pivot and draw-plane conventions, per-instance cell-changed
//! notification, index-based neighbour links, and visual-instance records for
//! a host renderer.
//!
//! ```
//! use tilegrid_core::{Grid, GridConfig, Pivot, Placement, Point, Vec3};
//!
//! let config = GridConfig::new(4, 4).with_pivot(Pivot::Center);
//! let mut grid = Grid::with_factory(&config, |x, y| x + y, Placement::new()).unwrap();
//!
//! assert_eq!(grid.world_to_grid(Vec3::new(0.5, 0.5, 0.0)), Point::new(2, 2));
//! assert!(grid.set_value(2, 2, 10));
//! assert_eq!(grid.get_value(2, 2), Some(&10));
//! assert_eq!(grid.get_value(-1, 0), None);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod geom;
pub mod grid;
pub mod layout;
pub mod neighbours;
pub mod placement;
pub mod visual;

pub use config::GridConfig;
pub use error::GridError;
pub use events::{SubscriptionId, Subscribers};
pub use geom::{Direction, Point};
pub use glam::Vec3;
pub use grid::Grid;
pub use layout::{DrawPlane, Layout, Pivot};
pub use neighbours::NeighbourTable;
pub use placement::Placement;
pub use visual::{TemplateId, VisualContainer, VisualInstance};
