//! Population hooks.
//!
//! A [`Placement`] tells population what to do with each freshly produced
//! cell: wire neighbour links, record a visual instance, hand the cell its
//! world position. Every hook is optional and declared by the caller.

use glam::Vec3;

use crate::geom::{Direction, Point};
use crate::visual::TemplateId;

pub(crate) type LinkHook<'a, T> = Box<dyn FnMut(&mut T, Direction, Point) + 'a>;
pub(crate) type VisualHook<'a, T> = Box<dyn FnMut(&T) -> Option<TemplateId> + 'a>;
pub(crate) type WorldPosHook<'a, T> = Box<dyn FnMut(&mut T, Vec3) + 'a>;

/// Per-cell hooks applied while a grid is populated.
///
/// ```
/// use tilegrid_core::{Grid, GridConfig, Placement, TemplateId, Vec3};
///
/// struct Tile {
///     pos: Vec3,
/// }
///
/// let placement = Placement::new()
///     .link_neighbours()
///     .visual(|_: &Tile| Some(TemplateId(0)))
///     .world_pos(|tile: &mut Tile, pos| tile.pos = pos);
/// let grid = Grid::with_factory(
///     &GridConfig::new(3, 3),
///     |_, _| Tile { pos: Vec3::ZERO },
///     placement,
/// )
/// .unwrap();
/// assert_eq!(grid.visuals().map(|v| v.len()), Some(9));
/// ```
pub struct Placement<'a, T> {
    pub(crate) link_neighbours: bool,
    pub(crate) on_link: Option<LinkHook<'a, T>>,
    pub(crate) visual: Option<VisualHook<'a, T>>,
    pub(crate) world_pos: Option<WorldPosHook<'a, T>>,
}

impl<'a, T> Placement<'a, T> {
    /// No hooks: cells are stored and nothing else happens.
    pub fn new() -> Self {
        Self {
            link_neighbours: false,
            on_link: None,
            visual: None,
            world_pos: None,
        }
    }

    /// Wire the grid's neighbour table as cells are placed.
    pub fn link_neighbours(mut self) -> Self {
        self.link_neighbours = true;
        self
    }

    /// Wire neighbour links and report each one to the cells involved.
    ///
    /// The hook runs once on each side of a link, with the direction from
    /// that cell and the coordinate of the cell it now links to.
    pub fn on_link(mut self, hook: impl FnMut(&mut T, Direction, Point) + 'a) -> Self {
        self.link_neighbours = true;
        self.on_link = Some(Box::new(hook));
        self
    }

    /// Choose a visual template per cell; `None` places no visual.
    pub fn visual(mut self, hook: impl FnMut(&T) -> Option<TemplateId> + 'a) -> Self {
        self.visual = Some(Box::new(hook));
        self
    }

    /// Receive each cell's centred world position.
    pub fn world_pos(mut self, hook: impl FnMut(&mut T, Vec3) + 'a) -> Self {
        self.world_pos = Some(Box::new(hook));
        self
    }
}

impl<T> Default for Placement<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
