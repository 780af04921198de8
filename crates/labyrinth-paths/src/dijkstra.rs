use labyrinth_core::{Cell, OccupancyGrid};

use crate::astar::{Estimate, best_first_path};

/// Shortest path under [`cost`](crate::cost) using uniform-cost search.
///
/// Identical to [`astar_path`](crate::astar_path) with a zero heuristic:
/// cells are expanded strictly by accumulated cost. Returns an empty vector
/// when `target` is unreachable.
pub fn dijkstra_path(grid: &OccupancyGrid, source: Cell, target: Cell) -> Vec<Cell> {
    best_first_path(grid, source, target, Estimate::Zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{BASE_COST, NUDGE, path_cost};

    #[test]
    fn straight_corridor() {
        let mut g = OccupancyGrid::walled(10, 10).unwrap();
        for c in 0..10 {
            g.set_free(Cell::new(3, c));
        }
        let path = dijkstra_path(&g, Cell::new(3, 0), Cell::new(3, 9));
        assert_eq!(path.len(), 10);
        assert!(path.iter().all(|c| c.row == 3));
    }

    #[test]
    fn prefers_the_cheaper_of_two_equal_hop_routes() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let path = dijkstra_path(&g, Cell::new(0, 0), Cell::new(1, 1));
        assert_eq!(path.len(), 3);
        // Via (0, 1): column step from even, then row step from odd.
        assert_eq!(path[1], Cell::new(0, 1));
        assert_eq!(path_cost(&path), 2.0 * BASE_COST);
        // The other route would pay the nudge twice.
        let other = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)];
        assert_eq!(path_cost(&other), 2.0 * (BASE_COST + NUDGE));
    }

    #[test]
    fn source_equals_target() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        assert_eq!(
            dijkstra_path(&g, Cell::new(4, 4), Cell::new(4, 4)),
            vec![Cell::new(4, 4)]
        );
    }
}
