//! The [`Grid`] type: a fixed-size 2D array of cell payloads placed in world
//! space.
//!
//! Storage is allocated once from a [`GridConfig`] and never resized. Cells
//! start out unset (`None`) and are filled either by population (a factory
//! called once per coordinate) or by [`set_value`](Grid::set_value), which
//! also notifies the grid's subscribers.

use glam::Vec3;
use log::{debug, trace, warn};

use crate::config::GridConfig;
use crate::error::GridError;
use crate::events::{SubscriptionId, Subscribers};
use crate::geom::{Direction, Point};
use crate::layout::{DrawPlane, Layout, Pivot};
use crate::neighbours::NeighbourTable;
use crate::placement::{LinkHook, Placement};
use crate::visual::{VisualContainer, VisualInstance};

/// A 2D grid of `T` payloads with world-space placement.
///
/// Out-of-bounds access is permissive: reads return `None` and writes are
/// ignored (reported through the `bool` returned by the setters). Use
/// [`contains`](Self::contains) to check coordinates up front.
#[derive(Debug)]
pub struct Grid<T> {
    layout: Layout,
    cells: Vec<Option<T>>,
    neighbours: NeighbourTable,
    subscribers: Subscribers<T>,
    visuals: Option<VisualContainer>,
}

impl<T> Grid<T> {
    /// Create an empty grid; every cell is unset.
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        let layout = config.layout()?;
        let len = layout.len();
        debug!(
            "grid: created empty {}x{} (cell size {})",
            layout.width(),
            layout.height(),
            layout.cell_size()
        );
        Ok(Self {
            layout,
            cells: std::iter::repeat_with(|| None).take(len).collect(),
            neighbours: NeighbourTable::new(len),
            subscribers: Subscribers::new(),
            visuals: None,
        })
    }

    /// Create a grid and populate it immediately.
    ///
    /// See [`populate`](Self::populate) for the order in which `factory` is
    /// called and how `placement` is applied.
    pub fn with_factory(
        config: &GridConfig,
        factory: impl FnMut(i32, i32) -> T,
        placement: Placement<'_, T>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(config)?;
        grid.place_all(factory, placement);
        Ok(grid)
    }

    /// Fill every cell from `factory`, applying `placement` to each one.
    ///
    /// `factory(x, y)` is called exactly once per coordinate, `x` ascending
    /// in the outer loop and `y` ascending in the inner loop, so a cell's
    /// left and lower neighbours always exist by the time it is placed.
    /// Neighbour links are rebuilt from scratch. Subscribers are not
    /// notified.
    ///
    /// Returns the visual container of a previous population, if any, so
    /// the owner can release it.
    pub fn populate(
        &mut self,
        factory: impl FnMut(i32, i32) -> T,
        placement: Placement<'_, T>,
    ) -> Option<VisualContainer> {
        let previous = self.place_all(factory, placement);
        if previous.is_some() {
            warn!("grid: populate replaced an existing visual container");
        }
        previous
    }

    fn place_all(
        &mut self,
        mut factory: impl FnMut(i32, i32) -> T,
        mut placement: Placement<'_, T>,
    ) -> Option<VisualContainer> {
        self.neighbours.clear();
        let mut container = placement.visual.as_ref().map(|_| VisualContainer::new());

        for x in 0..self.layout.width() {
            for y in 0..self.layout.height() {
                let Some(idx) = self.layout.index(x, y) else {
                    continue;
                };
                let here = Point::new(x, y);
                let center = self.layout.grid_to_world(x, y, true);
                self.cells[idx] = Some(factory(x, y));

                if placement.link_neighbours {
                    self.link_placed(idx, here, &mut placement.on_link);
                }

                let Some(cell) = self.cells[idx].as_mut() else {
                    continue;
                };
                if let (Some(hook), Some(container)) =
                    (placement.visual.as_mut(), container.as_mut())
                {
                    if let Some(template) = hook(&*cell) {
                        container.push(VisualInstance {
                            template,
                            cell: here,
                            position: center,
                        });
                    }
                }
                if let Some(hook) = placement.world_pos.as_mut() {
                    hook(cell, center);
                }
            }
        }

        debug!(
            "grid: populated {}x{} ({} links, {} visuals)",
            self.layout.width(),
            self.layout.height(),
            self.neighbours.link_count(),
            container.as_ref().map_or(0, VisualContainer::len)
        );
        std::mem::replace(&mut self.visuals, container)
    }

    /// Link the cell just placed at `here` with its left and lower
    /// neighbours.
    fn link_placed(&mut self, idx: usize, here: Point, on_link: &mut Option<LinkHook<'_, T>>) {
        for dir in [Direction::Left, Direction::Down] {
            let there = here.step(dir);
            let Some(other) = self.layout.index(there.x, there.y) else {
                continue;
            };
            if self.cells[other].is_none() {
                continue;
            }
            self.neighbours.link(idx, dir, other);

            if let Some(hook) = on_link.as_mut() {
                if let Some(cell) = self.cells[idx].as_mut() {
                    hook(cell, dir, there);
                }
                if let Some(cell) = self.cells[other].as_mut() {
                    hook(cell, dir.opposite(), here);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Cell access
    // -----------------------------------------------------------------------

    /// Store `value` at `(x, y)` and notify subscribers.
    ///
    /// Returns `false`, storing nothing and notifying no one, if `(x, y)` is
    /// out of bounds.
    pub fn set_value(&mut self, x: i32, y: i32, value: T) -> bool {
        let Some(idx) = self.layout.index(x, y) else {
            trace!("grid: ignored write outside bounds at ({x}, {y})");
            return false;
        };
        let slot = self.cells[idx].insert(value);
        self.subscribers.notify(x, y, slot);
        true
    }

    /// [`set_value`](Self::set_value) on the cell containing `world`.
    pub fn set_value_at_world(&mut self, world: Vec3, value: T) -> bool {
        let p = self.layout.world_to_grid(world);
        self.set_value(p.x, p.y, value)
    }

    /// The value at `(x, y)`, or `None` if out of bounds or unset.
    pub fn get_value(&self, x: i32, y: i32) -> Option<&T> {
        self.layout
            .index(x, y)
            .and_then(|idx| self.cells[idx].as_ref())
    }

    /// Mutable access to the value at `(x, y)`.
    ///
    /// Changes made through this reference do not notify subscribers.
    pub fn get_value_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        self.layout
            .index(x, y)
            .and_then(|idx| self.cells[idx].as_mut())
    }

    /// [`get_value`](Self::get_value) on the cell containing `world`.
    pub fn get_value_at_world(&self, world: Vec3) -> Option<&T> {
        let p = self.layout.world_to_grid(world);
        self.get_value(p.x, p.y)
    }

    /// The value at `p`.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&T> {
        self.get_value(p.x, p.y)
    }

    /// Iterate over set cells as `(Point, &T)`, `x` outer and `y` inner.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        let layout = self.layout;
        (0..layout.width()).flat_map(move |x| {
            (0..layout.height())
                .filter_map(move |y| self.get_value(x, y).map(|v| (Point::new(x, y), v)))
        })
    }

    /// Coordinate of the neighbour linked to `(x, y)` in `dir`.
    ///
    /// Links only exist after a population with neighbour linking enabled.
    pub fn neighbour(&self, x: i32, y: i32, dir: Direction) -> Option<Point> {
        let idx = self.layout.index(x, y)?;
        self.neighbours
            .get(idx, dir)
            .map(|other| self.layout.point(other))
    }

    /// The raw neighbour table, indexed by flat cell index.
    pub fn neighbours(&self) -> &NeighbourTable {
        &self.neighbours
    }

    // -----------------------------------------------------------------------
    // Notification
    // -----------------------------------------------------------------------

    /// Register a callback fired with `(x, y, new_value)` after every
    /// successful [`set_value`](Self::set_value) on this grid.
    pub fn subscribe(&mut self, callback: impl FnMut(i32, i32, &T) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Remove a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // -----------------------------------------------------------------------
    // Visuals
    // -----------------------------------------------------------------------

    /// Visual instances placed by the last population, if it had a visual
    /// hook.
    pub fn visuals(&self) -> Option<&VisualContainer> {
        self.visuals.as_ref()
    }

    /// Tear down the grid's visuals, handing the container to the owner for
    /// release. Does nothing and returns `None` if no container exists.
    pub fn destroy(&mut self) -> Option<VisualContainer> {
        let container = self.visuals.take();
        if let Some(c) = &container {
            debug!("grid: released visual container ({} instances)", c.len());
        }
        container
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.layout.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.layout.height()
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.layout.cell_size()
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.layout.origin()
    }

    #[inline]
    pub fn pivot(&self) -> Pivot {
        self.layout.pivot()
    }

    #[inline]
    pub fn draw_plane(&self) -> DrawPlane {
        self.layout.draw_plane()
    }

    /// Whether `(x, y)` is inside the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.layout.contains(x, y)
    }

    /// See [`Layout::world_to_grid`].
    #[inline]
    pub fn world_to_grid(&self, world: Vec3) -> Point {
        self.layout.world_to_grid(world)
    }

    /// See [`Layout::grid_to_world`].
    #[inline]
    pub fn grid_to_world(&self, x: i32, y: i32, centered: bool) -> Vec3 {
        self.layout.grid_to_world(x, y, centered)
    }

    /// See [`Layout::outline_segments`].
    pub fn outline_segments(&self) -> Vec<(Vec3, Vec3)> {
        self.layout.outline_segments()
    }
}
