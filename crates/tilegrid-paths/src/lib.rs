//! A* pathfinding over [`tilegrid_core::Grid`].
//!
//! Cells opt in through [`Walkable`]. Movement is 4-directional, each step
//! costs [`STRAIGHT_COST`], and the heuristic is the Manhattan distance.
//!
//! ```
//! use tilegrid_core::{Grid, GridConfig, Placement};
//! use tilegrid_paths::Pathfinder;
//!
//! let grid = Grid::with_factory(
//!     &GridConfig::new(3, 3),
//!     |x, y| !(x == 1 && y == 1),
//!     Placement::new(),
//! )
//! .unwrap();
//! let path = Pathfinder::new(&grid).find_path_points(0, 0, 2, 2).unwrap().unwrap();
//! assert_eq!(path.len(), 5);
//! ```

mod distance;
mod error;
mod node;
mod pathfinder;
mod traits;

pub use distance::{STRAIGHT_COST, heuristic, manhattan, move_cost};
pub use error::{Endpoint, PathError};
pub use node::UNREACHED;
pub use pathfinder::{PathResult, Pathfinder};
pub use traits::Walkable;
