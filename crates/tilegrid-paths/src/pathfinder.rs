//! A* search over a [`Grid`].

use std::fmt;

use log::{debug, trace};
use tilegrid_core::{Grid, Layout, Point};

use crate::distance::{heuristic, move_cost};
use crate::error::{Endpoint, PathError};
use crate::node::SearchNode;
use crate::traits::Walkable;

/// Outcome of a [`Pathfinder::search`] with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Cells from start to end inclusive, if a path was found.
    pub path: Option<Vec<Point>>,
    /// Accumulated move cost of the path.
    pub total_cost: Option<i32>,
    /// Nodes moved to the closed set before the search finished.
    pub nodes_expanded: usize,
}

impl PathResult {
    pub fn success(path: Vec<Point>, total_cost: i32, nodes_expanded: usize) -> Self {
        Self {
            path: Some(path),
            total_cost: Some(total_cost),
            nodes_expanded,
        }
    }

    pub fn failure(nodes_expanded: usize) -> Self {
        Self {
            path: None,
            total_cost: None,
            nodes_expanded,
        }
    }

    /// Whether a path was found.
    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }

    pub fn into_path(self) -> Option<Vec<Point>> {
        self.path
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.total_cost) {
            (Some(path), Some(cost)) => write!(
                f,
                "path of {} cells, cost {}, {} nodes expanded",
                path.len(),
                cost,
                self.nodes_expanded
            ),
            _ => write!(f, "no path, {} nodes expanded", self.nodes_expanded),
        }
    }
}

/// Shortest-path search over a grid of [`Walkable`] cells.
///
/// Movement is 4-directional with uniform step cost and a Manhattan
/// heuristic. Each query rebuilds its search state from the grid's current
/// contents; nothing is kept between calls. Because the pathfinder borrows
/// the grid, the grid cannot change during its lifetime: drop it, mutate
/// the grid, and create a new one (construction is free).
///
/// Among open nodes with equal `f`, the one that entered the open list
/// first is expanded first, which makes paths reproducible.
#[derive(Debug)]
pub struct Pathfinder<'g, T> {
    grid: &'g Grid<T>,
}

impl<T> Clone for Pathfinder<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Pathfinder<'_, T> {}

impl<'g, T: Walkable> Pathfinder<'g, T> {
    pub fn new(grid: &'g Grid<T>) -> Self {
        Self { grid }
    }

    /// The grid being searched.
    pub fn grid(&self) -> &'g Grid<T> {
        self.grid
    }

    /// Shortest path from `(start_x, start_y)` to `(end_x, end_y)` as the
    /// cell values along it, start and end inclusive.
    ///
    /// Returns `Ok(None)` when the end cannot be reached and an error when an
    /// endpoint is outside the grid, unset, or not walkable.
    pub fn find_path(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
    ) -> Result<Option<Vec<&'g T>>, PathError> {
        let points = self.find_path_points(start_x, start_y, end_x, end_y)?;
        let grid = self.grid;
        Ok(points.map(|path| path.into_iter().filter_map(|p| grid.at(p)).collect()))
    }

    /// Like [`find_path`](Self::find_path), returning coordinates.
    pub fn find_path_points(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
    ) -> Result<Option<Vec<Point>>, PathError> {
        self.search(Point::new(start_x, start_y), Point::new(end_x, end_y))
            .map(PathResult::into_path)
    }

    /// Whether any path connects the two cells.
    ///
    /// Runs the full search.
    pub fn path_exists(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
    ) -> Result<bool, PathError> {
        self.search(Point::new(start_x, start_y), Point::new(end_x, end_y))
            .map(|r| r.is_success())
    }

    /// Run A* from `start` to `end` and report the path with its cost and
    /// the number of nodes expanded.
    pub fn search(&self, start: Point, end: Point) -> Result<PathResult, PathError> {
        let layout = self.grid.layout();
        let (mut nodes, lookup) = self.build_nodes(layout);

        let start_idx = locate(layout, &lookup, start, Endpoint::Start)?;
        let end_idx = locate(layout, &lookup, end, Endpoint::End)?;

        nodes[start_idx].g = 0;
        nodes[start_idx].h = heuristic(start, end);
        nodes[start_idx].open = true;

        let mut open: Vec<usize> = vec![start_idx];
        let mut expanded = 0;

        while !open.is_empty() {
            let slot = lowest_f(&open, &nodes);
            let current = open[slot];

            if current == end_idx {
                let path = reconstruct(&nodes, current);
                let cost = nodes[current].g;
                debug!(
                    "path: {start} -> {end} found, {} cells, cost {cost}, {expanded} expanded",
                    path.len()
                );
                return Ok(PathResult::success(path, cost, expanded));
            }

            open.remove(slot);
            nodes[current].open = false;
            nodes[current].closed = true;
            expanded += 1;

            let here = nodes[current].pos;
            let here_g = nodes[current].g;
            trace!("path: expanding {here} (g = {here_g})");

            for next in neighbour_order(here) {
                let Some(ni) = layout.index(next.x, next.y).and_then(|ci| lookup[ci]) else {
                    continue;
                };
                let node = &mut nodes[ni];
                if node.closed {
                    continue;
                }
                let tentative = here_g.saturating_add(move_cost(here, next));
                if tentative < node.g {
                    node.parent = Some(current);
                    node.g = tentative;
                    node.h = heuristic(next, end);
                    if !node.open {
                        node.open = true;
                        open.push(ni);
                    }
                }
            }
        }

        debug!("path: {start} -> {end} unreachable, {expanded} expanded");
        Ok(PathResult::failure(expanded))
    }

    /// One node per walkable cell, `x` outer and `y` inner, plus a dense
    /// map from flat cell index to node index.
    fn build_nodes(&self, layout: &Layout) -> (Vec<SearchNode>, Vec<Option<usize>>) {
        let mut nodes = Vec::new();
        let mut lookup = vec![None; layout.len()];
        for x in 0..layout.width() {
            for y in 0..layout.height() {
                let Some(cell) = self.grid.get_value(x, y) else {
                    continue;
                };
                if !cell.walkable() {
                    continue;
                }
                if let Some(ci) = layout.index(x, y) {
                    lookup[ci] = Some(nodes.len());
                    nodes.push(SearchNode::new(Point::new(x, y)));
                }
            }
        }
        (nodes, lookup)
    }
}

fn locate(
    layout: &Layout,
    lookup: &[Option<usize>],
    pos: Point,
    endpoint: Endpoint,
) -> Result<usize, PathError> {
    let ci = layout
        .index(pos.x, pos.y)
        .ok_or(PathError::OutOfBounds { endpoint, pos })?;
    lookup[ci].ok_or(PathError::NotWalkable { endpoint, pos })
}

/// Grid-adjacent candidates in node-set order (ascending `x`, then `y`).
#[inline]
fn neighbour_order(p: Point) -> [Point; 4] {
    [
        p.shift(-1, 0),
        p.shift(0, -1),
        p.shift(0, 1),
        p.shift(1, 0),
    ]
}

/// Position in `open` of the node with the lowest `f`; the earliest wins
/// ties.
fn lowest_f(open: &[usize], nodes: &[SearchNode]) -> usize {
    let mut best = 0;
    for (slot, &ni) in open.iter().enumerate().skip(1) {
        if nodes[ni].f() < nodes[open[best]].f() {
            best = slot;
        }
    }
    best
}

/// Walk predecessor links back from `end` and return the path start-first.
fn reconstruct(nodes: &[SearchNode], end: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cursor = Some(end);
    while let Some(i) = cursor {
        path.push(nodes[i].pos);
        cursor = nodes[i].parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::prelude::*;
    use tilegrid_core::{GridConfig, Placement};

    use super::*;
    use crate::distance::STRAIGHT_COST;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    /// Walkable grid of `w` x `h` with the listed cells blocked.
    fn open_grid(w: i32, h: i32, blocked: &[(i32, i32)]) -> Grid<bool> {
        Grid::with_factory(
            &GridConfig::new(w, h),
            |x, y| !blocked.contains(&(x, y)),
            Placement::new(),
        )
        .unwrap()
    }

    fn assert_contiguous(path: &[Point]) {
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn open_grid_diagonal_corner() {
        let grid = open_grid(5, 5, &[]);
        let pf = Pathfinder::new(&grid);
        let path = pf.find_path_points(0, 0, 4, 4).unwrap().unwrap();
        assert_eq!(path.len(), 9);
        assert_contiguous(&path);
        assert_eq!(
            path,
            pts(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 4), (2, 4), (3, 4), (4, 4)])
        );
    }

    #[test]
    fn detours_around_blocked_center() {
        let grid = open_grid(3, 3, &[(1, 1)]);
        let pf = Pathfinder::new(&grid);
        let path = pf.find_path_points(0, 0, 2, 2).unwrap().unwrap();
        assert_eq!(path, pts(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]));
        assert!(!path.contains(&Point::new(1, 1)));

        let back = pf.find_path_points(2, 2, 0, 0).unwrap().unwrap();
        assert_eq!(back, pts(&[(2, 2), (1, 2), (0, 2), (0, 1), (0, 0)]));
    }

    #[test]
    fn tie_break_prefers_earliest_open_node() {
        let grid = open_grid(4, 4, &[]);
        let path = Pathfinder::new(&grid)
            .find_path_points(3, 0, 0, 3)
            .unwrap()
            .unwrap();
        assert_eq!(
            path,
            pts(&[(3, 0), (2, 0), (1, 0), (0, 0), (0, 1), (0, 2), (0, 3)])
        );
    }

    #[test]
    fn walks_around_wall() {
        let grid = open_grid(5, 3, &[(2, 0), (2, 1)]);
        let result = Pathfinder::new(&grid)
            .search(Point::new(0, 0), Point::new(4, 0))
            .unwrap();
        assert!(result.is_success());
        assert_eq!(result.total_cost, Some(8 * STRAIGHT_COST));
        assert_eq!(
            result.into_path().unwrap(),
            pts(&[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2), (3, 2), (3, 1), (3, 0), (4, 0)])
        );
    }

    #[test]
    fn blocked_row_has_no_path() {
        let wall: Vec<(i32, i32)> = (0..5).map(|x| (x, 2)).collect();
        let grid = open_grid(5, 5, &wall);
        let pf = Pathfinder::new(&grid);
        assert_eq!(pf.find_path_points(0, 0, 4, 4), Ok(None));
        assert_eq!(pf.path_exists(0, 0, 4, 4), Ok(false));
        assert_eq!(pf.path_exists(0, 0, 4, 1), Ok(true));

        let result = pf.search(Point::new(0, 0), Point::new(0, 4)).unwrap();
        assert!(!result.is_success());
        assert_eq!(result.total_cost, None);
        // Everything below the wall is expanded before giving up.
        assert_eq!(result.nodes_expanded, 10);
    }

    #[test]
    fn start_equals_end() {
        let grid = open_grid(3, 3, &[]);
        let result = Pathfinder::new(&grid)
            .search(Point::new(1, 1), Point::new(1, 1))
            .unwrap();
        assert_eq!(result, PathResult::success(vec![Point::new(1, 1)], 0, 0));
    }

    #[test]
    fn repeated_queries_agree() {
        let grid = open_grid(6, 6, &[(2, 2), (3, 2), (2, 3)]);
        let pf = Pathfinder::new(&grid);
        let first = pf.search(Point::new(0, 5), Point::new(5, 0)).unwrap();
        let second = pf.search(Point::new(0, 5), Point::new(5, 0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn endpoint_errors() {
        let mut grid = open_grid(3, 3, &[(2, 2)]);
        let mut sparse: Grid<bool> = Grid::new(&GridConfig::new(3, 3)).unwrap();
        sparse.set_value(0, 0, true);

        {
            let pf = Pathfinder::new(&grid);
            assert_eq!(
                pf.find_path_points(-1, 0, 1, 1),
                Err(PathError::OutOfBounds {
                    endpoint: Endpoint::Start,
                    pos: Point::new(-1, 0),
                })
            );
            assert_eq!(
                pf.find_path_points(0, 0, 3, 1),
                Err(PathError::OutOfBounds {
                    endpoint: Endpoint::End,
                    pos: Point::new(3, 1),
                })
            );
            let err = pf.find_path_points(0, 0, 2, 2).unwrap_err();
            assert_eq!(
                err,
                PathError::NotWalkable {
                    endpoint: Endpoint::End,
                    pos: Point::new(2, 2),
                }
            );
            assert_eq!(err.endpoint(), Endpoint::End);
            assert_eq!(err.to_string(), "path: end (2, 2) is not walkable");
        }

        let pf = Pathfinder::new(&sparse);
        assert!(matches!(
            pf.path_exists(0, 0, 1, 1),
            Err(PathError::NotWalkable { endpoint: Endpoint::End, .. })
        ));
        assert!(matches!(
            pf.path_exists(2, 2, 0, 0),
            Err(PathError::NotWalkable { endpoint: Endpoint::Start, .. })
        ));

        // Clearing the blocker makes the same query succeed.
        grid.set_value(2, 2, true);
        let pf = Pathfinder::new(&grid);
        assert_eq!(pf.path_exists(0, 0, 2, 2), Ok(true));
    }

    #[derive(Debug, PartialEq)]
    struct Tile {
        id: i32,
        floor: bool,
    }

    impl Walkable for Tile {
        fn walkable(&self) -> bool {
            self.floor
        }
    }

    #[test]
    fn returns_cell_values_along_path() {
        let grid = Grid::with_factory(
            &GridConfig::new(3, 2),
            |x, y| Tile {
                id: x * 10 + y,
                floor: !(x == 1 && y == 0),
            },
            Placement::new(),
        )
        .unwrap();
        let pf = Pathfinder::new(&grid);
        let path = pf.find_path(0, 0, 2, 0).unwrap().unwrap();
        let ids: Vec<i32> = path.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 11, 21, 20]);
        assert!(std::ptr::eq(path[0], grid.get_value(0, 0).unwrap()));
    }

    fn bfs_len(grid: &Grid<bool>, start: Point, end: Point) -> Option<usize> {
        let layout = grid.layout();
        let mut dist = vec![usize::MAX; layout.len()];
        let mut queue = VecDeque::new();
        dist[layout.index(start.x, start.y)?] = 1;
        queue.push_back(start);
        while let Some(p) = queue.pop_front() {
            let d = dist[layout.index(p.x, p.y)?];
            if p == end {
                return Some(d);
            }
            for q in p.neighbors_4() {
                if grid.get_value(q.x, q.y) != Some(&true) {
                    continue;
                }
                let Some(qi) = layout.index(q.x, q.y) else {
                    continue;
                };
                if dist[qi] == usize::MAX {
                    dist[qi] = d + 1;
                    queue.push_back(q);
                }
            }
        }
        None
    }

    #[test]
    fn random_grids_match_bfs() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let w = rng.random_range(2..12);
            let h = rng.random_range(2..12);
            let mut grid: Grid<bool> = Grid::new(&GridConfig::new(w, h)).unwrap();
            for x in 0..w {
                for y in 0..h {
                    grid.set_value(x, y, !rng.random_bool(0.3));
                }
            }
            let start = Point::new(0, 0);
            let end = Point::new(w - 1, h - 1);
            grid.set_value(start.x, start.y, true);
            grid.set_value(end.x, end.y, true);

            let result = Pathfinder::new(&grid).search(start, end).unwrap();
            let expected = bfs_len(&grid, start, end);
            match (result.path, expected) {
                (Some(path), Some(len)) => {
                    assert_eq!(path.len(), len);
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&end));
                    assert_contiguous(&path);
                    assert!(path.iter().all(|&p| grid.at(p) == Some(&true)));
                    assert_eq!(result.total_cost, Some((len as i32 - 1) * STRAIGHT_COST));
                }
                (None, None) => {}
                (got, want) => panic!("{w}x{h}: got {got:?}, bfs {want:?}"),
            }
        }
    }

    #[test]
    fn result_display() {
        let ok = PathResult::success(pts(&[(0, 0), (0, 1)]), 10, 1);
        assert_eq!(ok.to_string(), "path of 2 cells, cost 10, 1 nodes expanded");
        assert_eq!(PathResult::failure(7).to_string(), "no path, 7 nodes expanded");
    }
}
