//! Index-based adjacency links between grid cells.

use crate::geom::Direction;

/// Up to four neighbour links per cell, stored as flat cell indices.
///
/// Slots are addressed by [`Direction::index`]. Links are only present
/// where population wired them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighbourTable {
    links: Vec<[Option<usize>; 4]>,
}

impl NeighbourTable {
    /// A table for `len` cells with no links.
    pub fn new(len: usize) -> Self {
        Self {
            links: vec![[None; 4]; len],
        }
    }

    /// Neighbour of cell `index` in `dir`, if linked.
    #[inline]
    pub fn get(&self, index: usize, dir: Direction) -> Option<usize> {
        self.links.get(index).and_then(|slots| slots[dir.index()])
    }

    /// All four slots of cell `index`.
    #[inline]
    pub fn slots(&self, index: usize) -> [Option<usize>; 4] {
        self.links.get(index).copied().unwrap_or([None; 4])
    }

    /// Link `from` to `to` in `dir`, and `to` back to `from` in the opposite
    /// direction.
    pub fn link(&mut self, from: usize, dir: Direction, to: usize) {
        self.links[from][dir.index()] = Some(to);
        self.links[to][dir.opposite().index()] = Some(from);
    }

    /// Drop every link.
    pub fn clear(&mut self) {
        for slots in self.links.iter_mut() {
            *slots = [None; 4];
        }
    }

    /// Number of established (directed) links.
    pub fn link_count(&self) -> usize {
        self.links
            .iter()
            .map(|slots| slots.iter().filter(|s| s.is_some()).count())
            .sum()
    }
}
