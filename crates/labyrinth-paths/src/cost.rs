//! Step cost shared by Dijkstra and A*.

use labyrinth_core::Cell;

/// Cost of a plain step between adjacent cells.
pub const BASE_COST: f64 = 1.0;

/// Tie-break surcharge added to some steps.
pub const NUDGE: f64 = 0.001;

/// Cost of moving from `from` to the adjacent cell `to`.
///
/// Steps out of an even-parity cell pay [`NUDGE`] when they change row;
/// steps out of an odd-parity cell pay it when they change column. Equal
/// hop-count routes therefore never tie exactly, which keeps results and
/// traces reproducible.
#[inline]
pub fn cost(from: Cell, to: Cell) -> f64 {
    let nudged = if from.parity_even() {
        to.row != from.row
    } else {
        to.col != from.col
    };
    if nudged { BASE_COST + NUDGE } else { BASE_COST }
}

/// Sum of [`cost`] over consecutive pairs of `path`.
pub fn path_cost(path: &[Cell]) -> f64 {
    path.windows(2).map(|w| cost(w[0], w[1])).sum()
}
