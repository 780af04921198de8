use std::collections::VecDeque;

use labyrinth_core::{Cell, Neighbors, OccupancyGrid};

use crate::reconstruct::{PredecessorMap, reconstruct};
use crate::trace::{SolveStep, Status};

/// Shortest path in hop count from `source` to `target`.
///
/// Expands cells first-in first-out and stops as soon as `target` is
/// dequeued. Step costs (including the nudge) are ignored. Returns an empty
/// vector when `target` is unreachable.
pub fn bfs_path(grid: &OccupancyGrid, source: Cell, target: Cell) -> Vec<Cell> {
    let mut queue: VecDeque<Cell> = VecDeque::new();
    let mut came_from = PredecessorMap::new();
    queue.push_back(source);
    came_from.insert(source, None);

    let mut expanded = 0usize;
    while let Some(current) = queue.pop_front() {
        if current == target {
            break;
        }
        expanded += 1;
        for next in grid.neighbors(current) {
            if came_from.contains_key(&next) {
                continue;
            }
            queue.push_back(next);
            came_from.insert(next, Some(current));
        }
    }

    let path = reconstruct(&came_from, source, target);
    log::debug!(
        "bfs {} -> {}: expanded {}, reached {}, path length {}",
        source,
        target,
        expanded,
        came_from.len(),
        path.len()
    );
    path
}

/// Step-by-step breadth-first search.
///
/// Emits one [`SolveStep`] per neighbor examined, in the order
/// [`bfs_path`] examines them.
#[derive(Debug)]
pub(crate) struct BfsTrace<'g> {
    grid: &'g OccupancyGrid,
    target: Cell,
    queue: VecDeque<Cell>,
    came_from: PredecessorMap,
    expanding: Option<(Cell, Neighbors<'g>)>,
    status: Status,
}

impl<'g> BfsTrace<'g> {
    pub(crate) fn new(grid: &'g OccupancyGrid, source: Cell, target: Cell) -> Self {
        let mut came_from = PredecessorMap::new();
        came_from.insert(source, None);
        Self {
            grid,
            target,
            queue: VecDeque::from([source]),
            came_from,
            expanding: None,
            status: Status::Running,
        }
    }

    pub(crate) fn predecessors(&self) -> &PredecessorMap {
        &self.came_from
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }
}

impl Iterator for BfsTrace<'_> {
    type Item = SolveStep;

    fn next(&mut self) -> Option<SolveStep> {
        loop {
            if let Some((current, neighbors)) = self.expanding.as_mut() {
                if let Some(next) = neighbors.next() {
                    let current = *current;
                    let relaxed = !self.came_from.contains_key(&next);
                    if relaxed {
                        self.queue.push_back(next);
                        self.came_from.insert(next, Some(current));
                    }
                    return Some(SolveStep {
                        current,
                        selected: next,
                        used: if relaxed { vec![next] } else { Vec::new() },
                        relaxed,
                    });
                }
                self.expanding = None;
            }

            if self.status != Status::Running {
                return None;
            }
            match self.queue.pop_front() {
                None => self.status = Status::Exhausted,
                Some(c) if c == self.target => self.status = Status::Found,
                Some(c) => self.expanding = Some((c, self.grid.neighbors(c))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_corner_to_corner() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let path = bfs_path(&g, Cell::new(9, 9), Cell::new(0, 0));
        assert_eq!(path.len(), 19);
        assert_eq!(path[0], Cell::new(9, 9));
        assert_eq!(path[18], Cell::new(0, 0));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]));
            assert_eq!(w[1].manhattan(Cell::ZERO), w[0].manhattan(Cell::ZERO) - 1);
        }
    }

    #[test]
    fn walled_target_is_unreachable() {
        let mut g = OccupancyGrid::free(10, 10).unwrap();
        g.set_occupied(Cell::new(0, 1));
        g.set_occupied(Cell::new(1, 0));
        assert!(bfs_path(&g, Cell::new(9, 9), Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn trace_emits_one_step_per_neighbor() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let mut trace = BfsTrace::new(&g, Cell::new(0, 0), Cell::new(0, 1));
        // (0, 0) is even: candidates reversed, only (0, 1) and (1, 0) in bounds.
        let first = trace.next().unwrap();
        assert_eq!(first.current, Cell::new(0, 0));
        assert_eq!(first.selected, Cell::new(0, 1));
        assert_eq!(first.used, vec![Cell::new(0, 1)]);
        assert!(first.relaxed);
        let second = trace.next().unwrap();
        assert_eq!(second.selected, Cell::new(1, 0));
        // Target (0, 1) is dequeued next, which ends the trace.
        assert!(trace.next().is_none());
        assert_eq!(trace.status(), Status::Found);
        assert_eq!(trace.predecessors().len(), 3);
    }

    #[test]
    fn revisits_are_reported_with_empty_used() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let mut trace = BfsTrace::new(&g, Cell::new(5, 5), Cell::new(0, 0));
        let revisit = trace
            .find(|s| !s.relaxed)
            .expect("an open grid revisits cells");
        assert!(revisit.used.is_empty());
    }
}
