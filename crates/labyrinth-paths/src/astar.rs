//! Cost-aware best-first search: A* and, with a zero estimate, Dijkstra.

use std::collections::HashMap;

use labyrinth_core::{Cell, Neighbors, OccupancyGrid};

use crate::cost::cost;
use crate::distance::heuristic;
use crate::frontier::Frontier;
use crate::reconstruct::{PredecessorMap, reconstruct};
use crate::trace::{SolveStep, Status};

/// Accumulated cost from the source to each reached cell.
pub type CostMap = HashMap<Cell, f64>;

/// Which estimate orders the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Estimate {
    /// Uniform-cost search.
    Zero,
    /// A* with the Manhattan heuristic.
    Manhattan,
}

impl Estimate {
    #[inline]
    fn eval(self, from: Cell, to: Cell) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Manhattan => heuristic(from, to),
        }
    }
}

#[inline]
fn improves(costs: &CostMap, cell: Cell, new_cost: f64) -> bool {
    costs.get(&cell).is_none_or(|&old| new_cost < old)
}

/// Shortest path under [`cost`](crate::cost) using A* with the Manhattan
/// heuristic.
///
/// Returns the full path (including both endpoints) or an empty vector when
/// `target` is unreachable.
pub fn astar_path(grid: &OccupancyGrid, source: Cell, target: Cell) -> Vec<Cell> {
    best_first_path(grid, source, target, Estimate::Manhattan)
}

pub(crate) fn best_first_path(
    grid: &OccupancyGrid,
    source: Cell,
    target: Cell,
    estimate: Estimate,
) -> Vec<Cell> {
    let mut open = Frontier::new();
    let mut came_from = PredecessorMap::new();
    let mut cost_so_far = CostMap::new();
    open.push(0.0, source);
    came_from.insert(source, None);
    cost_so_far.insert(source, 0.0);

    let mut expanded = 0usize;
    while let Some((_, current)) = open.pop() {
        if current == target {
            break;
        }
        let Some(&current_cost) = cost_so_far.get(&current) else {
            continue;
        };
        expanded += 1;

        for next in grid.neighbors(current) {
            let new_cost = current_cost + cost(current, next);
            if !improves(&cost_so_far, next, new_cost) {
                continue;
            }
            cost_so_far.insert(next, new_cost);
            open.push(new_cost + estimate.eval(next, target), next);
            came_from.insert(next, Some(current));
        }
    }

    let path = reconstruct(&came_from, source, target);
    log::debug!(
        "{:?} search {} -> {}: expanded {}, reached {}, path length {}",
        estimate,
        source,
        target,
        expanded,
        came_from.len(),
        path.len()
    );
    path
}

/// Step-by-step best-first search.
///
/// `used` in each emitted step holds every neighbor relaxed since the
/// current cell was popped; it is cleared on the next pop.
#[derive(Debug)]
pub(crate) struct BestFirstTrace<'g> {
    grid: &'g OccupancyGrid,
    target: Cell,
    estimate: Estimate,
    open: Frontier,
    came_from: PredecessorMap,
    cost_so_far: CostMap,
    expanding: Option<(Cell, f64, Neighbors<'g>)>,
    used: Vec<Cell>,
    status: Status,
}

impl<'g> BestFirstTrace<'g> {
    pub(crate) fn new(
        grid: &'g OccupancyGrid,
        source: Cell,
        target: Cell,
        estimate: Estimate,
    ) -> Self {
        let mut open = Frontier::new();
        open.push(0.0, source);
        let mut came_from = PredecessorMap::new();
        came_from.insert(source, None);
        let mut cost_so_far = CostMap::new();
        cost_so_far.insert(source, 0.0);
        Self {
            grid,
            target,
            estimate,
            open,
            came_from,
            cost_so_far,
            expanding: None,
            used: Vec::new(),
            status: Status::Running,
        }
    }

    pub(crate) fn predecessors(&self) -> &PredecessorMap {
        &self.came_from
    }

    pub(crate) fn costs(&self) -> &CostMap {
        &self.cost_so_far
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }
}

impl Iterator for BestFirstTrace<'_> {
    type Item = SolveStep;

    fn next(&mut self) -> Option<SolveStep> {
        loop {
            if let Some((current, current_cost, neighbors)) = self.expanding.as_mut() {
                if let Some(next) = neighbors.next() {
                    let (current, current_cost) = (*current, *current_cost);
                    let new_cost = current_cost + cost(current, next);
                    let relaxed = improves(&self.cost_so_far, next, new_cost);
                    if relaxed {
                        self.cost_so_far.insert(next, new_cost);
                        self.open
                            .push(new_cost + self.estimate.eval(next, self.target), next);
                        self.came_from.insert(next, Some(current));
                        self.used.push(next);
                    }
                    return Some(SolveStep {
                        current,
                        selected: next,
                        used: self.used.clone(),
                        relaxed,
                    });
                }
                self.expanding = None;
            }

            if self.status != Status::Running {
                return None;
            }
            match self.open.pop() {
                None => self.status = Status::Exhausted,
                Some((_, c)) if c == self.target => self.status = Status::Found,
                Some((_, c)) => {
                    if let Some(&g) = self.cost_so_far.get(&c) {
                        self.used.clear();
                        self.expanding = Some((c, g, self.grid.neighbors(c)));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::path_cost;

    #[test]
    fn open_grid_corner_to_corner() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        for estimate in [Estimate::Zero, Estimate::Manhattan] {
            let path = best_first_path(&g, Cell::new(9, 9), Cell::new(0, 0), estimate);
            assert_eq!(path.len(), 19, "{estimate:?}");
            assert_eq!(path.first(), Some(&Cell::new(9, 9)));
            assert_eq!(path.last(), Some(&Cell::new(0, 0)));
        }
    }

    #[test]
    fn astar_and_dijkstra_agree_on_cost() {
        let mut g = OccupancyGrid::free(12, 12).unwrap();
        for r in 0..10 {
            g.set_occupied(Cell::new(r, 5));
        }
        for c in 3..12 {
            g.set_occupied(Cell::new(6, c));
        }
        g.set_free(Cell::new(6, 8));
        let (s, t) = (Cell::new(0, 0), Cell::new(11, 11));
        let a = best_first_path(&g, s, t, Estimate::Manhattan);
        let d = best_first_path(&g, s, t, Estimate::Zero);
        assert!(!a.is_empty());
        assert!((path_cost(&a) - path_cost(&d)).abs() < 1e-9);
    }

    #[test]
    fn unreachable_target() {
        let mut g = OccupancyGrid::free(10, 10).unwrap();
        for c in 0..10 {
            g.set_occupied(Cell::new(5, c));
        }
        assert!(astar_path(&g, Cell::new(0, 0), Cell::new(9, 9)).is_empty());
    }

    #[test]
    fn trace_used_accumulates_within_expansion() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let mut trace = BestFirstTrace::new(&g, Cell::new(5, 5), Cell::ZERO, Estimate::Manhattan);
        // (5, 5) is even: all four neighbors are relaxed in one expansion.
        let steps: Vec<_> = trace.by_ref().take(4).collect();
        assert!(steps.iter().all(|s| s.current == Cell::new(5, 5)));
        for (i, s) in steps.iter().enumerate() {
            assert!(s.relaxed);
            assert_eq!(s.used.len(), i + 1);
        }
        // The next step belongs to a new expansion, so `used` restarts.
        let next = trace.next().unwrap();
        assert_ne!(next.current, Cell::new(5, 5));
        assert!(next.used.len() <= 1);
        assert_eq!(trace.costs().get(&Cell::new(5, 5)), Some(&0.0));
    }

    #[test]
    fn trace_and_direct_search_build_the_same_map() {
        let mut g = OccupancyGrid::free(10, 10).unwrap();
        g.set_occupied(Cell::new(4, 4));
        g.set_occupied(Cell::new(4, 5));
        let (s, t) = (Cell::new(8, 2), Cell::new(1, 7));
        let mut trace = BestFirstTrace::new(&g, s, t, Estimate::Zero);
        trace.by_ref().for_each(drop);
        assert_eq!(trace.status(), Status::Found);
        assert_eq!(
            reconstruct(trace.predecessors(), s, t),
            best_first_path(&g, s, t, Estimate::Zero)
        );
    }
}
