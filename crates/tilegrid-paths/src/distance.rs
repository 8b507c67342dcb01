use tilegrid_core::Point;

/// Cost of one axis-aligned step.
///
/// Costs are scaled by 10 so that integer arithmetic stays exact if a
/// fractional step cost is ever needed.
pub const STRAIGHT_COST: i32 = 10;

/// Manhattan (L1) distance between two points, in cells.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Cost of moving from `a` to `b` with axis-aligned steps only.
#[inline]
pub fn move_cost(a: Point, b: Point) -> i32 {
    manhattan(a, b) * STRAIGHT_COST
}

/// Admissible A* estimate from `a` to `b`.
///
/// Identical to [`move_cost`]: with 4-directional movement the Manhattan
/// distance is exact on an open grid.
#[inline]
pub fn heuristic(a: Point, b: Point) -> i32 {
    move_cost(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs_scale_manhattan() {
        let a = Point::new(0, 0);
        let b = Point::new(4, -3);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(move_cost(a, b), 70);
        assert_eq!(heuristic(b, a), 70);
        assert_eq!(move_cost(a, Point::new(0, 1)), STRAIGHT_COST);
    }
}
