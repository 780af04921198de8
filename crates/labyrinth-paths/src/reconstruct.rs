//! Path reconstruction from a predecessor map.

use std::collections::HashMap;

use labyrinth_core::Cell;

/// Maps each reached cell to the cell it was reached from.
///
/// The search source maps to `None`; every other key maps to `Some`.
pub type PredecessorMap = HashMap<Cell, Option<Cell>>;

/// Walk predecessor links from `target` back to `source`.
///
/// Returns the cells from `source` to `target` inclusive, or an empty vector
/// when `target` was never reached. The map must be acyclic along the walk.
pub fn reconstruct(predecessors: &PredecessorMap, source: Cell, target: Cell) -> Vec<Cell> {
    if !predecessors.contains_key(&target) {
        return Vec::new();
    }
    let mut path = Vec::new();
    let mut current = target;
    while current != source {
        path.push(current);
        match predecessors.get(&current).copied().flatten() {
            Some(prev) => current = prev,
            // Hit a root that is not `source`: the chain does not lead back.
            None => return Vec::new(),
        }
    }
    path.push(source);
    path.reverse();
    path
}
