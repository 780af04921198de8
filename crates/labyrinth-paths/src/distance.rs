use labyrinth_core::Cell;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    a.manhattan(b)
}

/// A* heuristic: Manhattan distance as a float.
///
/// Admissible because every step costs at least [`BASE_COST`](crate::BASE_COST).
#[inline]
pub fn heuristic(a: Cell, b: Cell) -> f64 {
    f64::from(manhattan(a, b))
}
