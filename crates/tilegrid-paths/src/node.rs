use tilegrid_core::Point;

/// Sentinel `g` for nodes the search has not reached yet.
pub const UNREACHED: i32 = i32::MAX;

/// Per-query bookkeeping for one walkable cell.
#[derive(Clone, Debug)]
pub(crate) struct SearchNode {
    pub(crate) pos: Point,
    pub(crate) g: i32,
    pub(crate) h: i32,
    /// Index of the predecessor in the node set; `None` for the start and
    /// for unreached nodes.
    pub(crate) parent: Option<usize>,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl SearchNode {
    pub(crate) fn new(pos: Point) -> Self {
        Self {
            pos,
            g: UNREACHED,
            h: 0,
            parent: None,
            open: false,
            closed: false,
        }
    }

    /// `g + h`, computed on demand so it always reflects the current `g`.
    #[inline]
    pub(crate) fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }
}
