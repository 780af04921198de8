//! Consumer-side view of an in-progress trace.

use std::collections::HashSet;

use labyrinth_core::Cell;

use crate::reconstruct::{PredecessorMap, reconstruct};
use crate::trace::SolveStep;

/// Accumulates [`SolveStep`]s into the state an animation needs: the cells
/// touched so far, the cell under consideration, and the path leading to it.
///
/// Works from step deltas alone, so it can sit on the far side of a channel
/// from the [`Trace`](crate::Trace) that produced them. After applying every
/// step of a trace, [`predecessors`](Self::predecessors) equals the trace's
/// own map.
#[derive(Debug, Clone)]
pub struct SolveProgress {
    source: Cell,
    target: Cell,
    used: HashSet<Cell>,
    predecessors: PredecessorMap,
    current: Option<Cell>,
    path_cache: Option<Vec<Cell>>,
    steps: usize,
}

impl SolveProgress {
    pub fn new(source: Cell, target: Cell) -> Self {
        let mut predecessors = PredecessorMap::new();
        predecessors.insert(source, None);
        Self {
            source,
            target,
            used: HashSet::new(),
            predecessors,
            current: None,
            path_cache: None,
            steps: 0,
        }
    }

    pub fn source(&self) -> Cell {
        self.source
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    /// Fold one step into the model.
    pub fn apply(&mut self, step: &SolveStep) {
        if step.relaxed {
            self.predecessors.insert(step.selected, Some(step.current));
        }
        self.used.extend(step.used.iter().copied());
        self.current = Some(step.selected);
        self.path_cache = None;
        self.steps += 1;
    }

    /// Every cell that has appeared in a step's `used` set.
    pub fn used(&self) -> &HashSet<Cell> {
        &self.used
    }

    /// The neighbor examined by the latest step.
    pub fn current(&self) -> Option<Cell> {
        self.current
    }

    pub fn predecessors(&self) -> &PredecessorMap {
        &self.predecessors
    }

    pub fn steps_applied(&self) -> usize {
        self.steps
    }

    /// Path from the source to the current cell, rebuilt lazily after each
    /// [`apply`](Self::apply). Empty before the first step or when the
    /// current cell has no recorded predecessor.
    pub fn partial_path(&mut self) -> &[Cell] {
        let (source, current) = (self.source, self.current);
        let predecessors = &self.predecessors;
        self.path_cache.get_or_insert_with(|| match current {
            Some(c) => reconstruct(predecessors, source, c),
            None => Vec::new(),
        })
    }

    /// Path from the source to the target under the current map.
    pub fn path(&self) -> Vec<Cell> {
        reconstruct(&self.predecessors, self.source, self.target)
    }

    /// Forget every applied step.
    pub fn reset(&mut self) {
        *self = Self::new(self.source, self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Algorithm;
    use labyrinth_core::OccupancyGrid;

    #[test]
    fn replaying_a_trace_rebuilds_its_map() {
        let mut g = OccupancyGrid::free(10, 10).unwrap();
        for r in 0..8 {
            g.set_occupied(Cell::new(r, 5));
        }
        let (s, t) = (Cell::new(0, 0), Cell::new(0, 9));
        for algo in Algorithm::ALL {
            let mut progress = SolveProgress::new(s, t);
            let mut trace = algo.traced_solve(&g, s, t);
            for step in trace.by_ref() {
                progress.apply(&step);
            }
            assert_eq!(progress.predecessors(), trace.predecessors(), "{algo}");
            assert_eq!(progress.path(), algo.solve(&g, s, t));
            assert_eq!(progress.steps_applied(), trace.steps());
        }
    }

    #[test]
    fn partial_path_follows_current_cell() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let (s, t) = (Cell::new(9, 9), Cell::ZERO);
        let mut progress = SolveProgress::new(s, t);
        assert!(progress.partial_path().is_empty());
        for step in Algorithm::BreadthFirst.traced_solve(&g, s, t).take(10) {
            progress.apply(&step);
            let current = progress.current().unwrap();
            let path = progress.partial_path().to_vec();
            assert_eq!(path.first(), Some(&s));
            assert_eq!(path.last(), Some(&current));
        }
    }

    #[test]
    fn used_accumulates_and_reset_clears() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let (s, t) = (Cell::new(5, 5), Cell::ZERO);
        let mut progress = SolveProgress::new(s, t);
        for step in Algorithm::AStar.traced_solve(&g, s, t).take(4) {
            progress.apply(&step);
        }
        assert_eq!(progress.used().len(), 4);
        progress.reset();
        assert!(progress.used().is_empty());
        assert_eq!(progress.current(), None);
        assert_eq!(progress.predecessors().len(), 1);
        assert_eq!(progress.steps_applied(), 0);
    }
}
