//! Replayable, pull-based search traces.
//!
//! A [`Trace`] is an explicit state machine: each call to `next` advances
//! the underlying search by exactly one examined neighbor and returns the
//! matching [`SolveStep`]. Nothing runs between pulls, so a consumer may pace
//! the trace, forward it to another thread, or drop it at any point.

use std::iter::FusedIterator;

use labyrinth_core::{Cell, OccupancyGrid};

use crate::Algorithm;
use crate::astar::{BestFirstTrace, Estimate};
use crate::bfs::BfsTrace;
use crate::reconstruct::{PredecessorMap, reconstruct};

/// One observable unit of search progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStep {
    /// Cell being expanded.
    pub current: Cell,
    /// Neighbor of `current` examined by this step.
    pub selected: Cell,
    /// Cells newly promoted to the frontier.
    ///
    /// Breadth-first: `[selected]` if this step enqueued it, else empty.
    /// Dijkstra / A*: every neighbor relaxed since `current` was popped.
    pub used: Vec<Cell>,
    /// Whether this step recorded `current` as the predecessor of `selected`.
    pub relaxed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Running,
    Found,
    Exhausted,
}

#[derive(Debug)]
enum Engine<'g> {
    Bfs(BfsTrace<'g>),
    BestFirst(BestFirstTrace<'g>),
}

/// A lazily produced sequence of [`SolveStep`]s for one search.
///
/// Created by [`Algorithm::traced_solve`]. Steps come out in exactly the
/// order the direct solve examines neighbors. The trace cannot be restarted;
/// call `traced_solve` again for a fresh run.
#[derive(Debug)]
pub struct Trace<'g> {
    algorithm: Algorithm,
    source: Cell,
    target: Cell,
    steps: usize,
    engine: Engine<'g>,
}

impl<'g> Trace<'g> {
    pub(crate) fn new(
        algorithm: Algorithm,
        grid: &'g OccupancyGrid,
        source: Cell,
        target: Cell,
    ) -> Self {
        let engine = match algorithm {
            Algorithm::BreadthFirst => Engine::Bfs(BfsTrace::new(grid, source, target)),
            Algorithm::Dijkstra => {
                Engine::BestFirst(BestFirstTrace::new(grid, source, target, Estimate::Zero))
            }
            Algorithm::AStar => {
                Engine::BestFirst(BestFirstTrace::new(grid, source, target, Estimate::Manhattan))
            }
        };
        Self {
            algorithm,
            source,
            target,
            steps: 0,
            engine,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn source(&self) -> Cell {
        self.source
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    /// Number of steps produced so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The predecessor map as of the last produced step.
    pub fn predecessors(&self) -> &PredecessorMap {
        match &self.engine {
            Engine::Bfs(t) => t.predecessors(),
            Engine::BestFirst(t) => t.predecessors(),
        }
    }

    /// An owned copy of [`predecessors`](Self::predecessors).
    pub fn snapshot(&self) -> PredecessorMap {
        self.predecessors().clone()
    }

    fn status(&self) -> Status {
        match &self.engine {
            Engine::Bfs(t) => t.status(),
            Engine::BestFirst(t) => t.status(),
        }
    }

    /// Whether the search has stopped producing steps.
    pub fn is_finished(&self) -> bool {
        self.status() != Status::Running
    }

    /// Whether the search stopped because it popped the target.
    pub fn found(&self) -> bool {
        self.status() == Status::Found
    }

    /// Path from the source to the target implied by the current map.
    ///
    /// Once the trace is exhausted this equals the direct solve's result.
    pub fn path(&self) -> Vec<Cell> {
        reconstruct(self.predecessors(), self.source, self.target)
    }

    /// Path from the source to `cell` implied by the current map.
    pub fn path_to(&self, cell: Cell) -> Vec<Cell> {
        reconstruct(self.predecessors(), self.source, cell)
    }
}

impl Iterator for Trace<'_> {
    type Item = SolveStep;

    fn next(&mut self) -> Option<SolveStep> {
        let step = match &mut self.engine {
            Engine::Bfs(t) => t.next(),
            Engine::BestFirst(t) => t.next(),
        };
        if step.is_some() {
            self.steps += 1;
        }
        step
    }
}

impl FusedIterator for Trace<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked_grid() -> OccupancyGrid {
        let mut g = OccupancyGrid::free(10, 10).unwrap();
        for r in 1..10 {
            g.set_occupied(Cell::new(r, 4));
        }
        for c in 4..9 {
            g.set_occupied(Cell::new(2, c));
        }
        g
    }

    #[test]
    fn exhausted_trace_matches_solve() {
        let g = blocked_grid();
        let (s, t) = (Cell::new(9, 0), Cell::new(9, 9));
        for algo in Algorithm::ALL {
            let mut trace = algo.traced_solve(&g, s, t);
            let n = trace.by_ref().count();
            assert!(n > 0);
            assert_eq!(trace.steps(), n);
            assert!(trace.is_finished());
            assert!(trace.found());
            assert_eq!(trace.path(), algo.solve(&g, s, t), "{algo}");
        }
    }

    #[test]
    fn traces_are_deterministic() {
        let g = blocked_grid();
        let (s, t) = (Cell::new(0, 0), Cell::new(8, 8));
        for algo in Algorithm::ALL {
            let a: Vec<_> = algo.traced_solve(&g, s, t).collect();
            let b: Vec<_> = algo.traced_solve(&g, s, t).collect();
            assert_eq!(a, b, "{algo}");
        }
    }

    #[test]
    fn unreachable_trace_is_finite() {
        let mut g = OccupancyGrid::free(10, 10).unwrap();
        for c in 0..10 {
            g.set_occupied(Cell::new(5, c));
        }
        for algo in Algorithm::ALL {
            let mut trace = algo.traced_solve(&g, Cell::new(0, 0), Cell::new(9, 9));
            trace.by_ref().for_each(drop);
            assert!(trace.is_finished());
            assert!(!trace.found());
            assert!(trace.path().is_empty());
            // Fused.
            assert!(trace.next().is_none());
        }
    }

    #[test]
    fn source_equals_target_emits_nothing() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let c = Cell::new(3, 3);
        for algo in Algorithm::ALL {
            let mut trace = algo.traced_solve(&g, c, c);
            assert!(trace.next().is_none());
            assert_eq!(trace.path(), vec![c]);
        }
    }

    #[test]
    fn abandoned_trace_leaves_partial_map() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        let mut trace = Algorithm::AStar.traced_solve(&g, Cell::new(9, 9), Cell::ZERO);
        let steps: Vec<_> = trace.by_ref().take(6).collect();
        assert!(!trace.is_finished());
        let last = steps.last().unwrap();
        let partial = trace.path_to(last.current);
        assert_eq!(partial.first(), Some(&Cell::new(9, 9)));
        assert_eq!(partial.last(), Some(&last.current));
        let snap = trace.snapshot();
        drop(trace);
        assert!(snap.contains_key(&Cell::new(9, 9)));
    }

    #[test]
    fn relaxed_steps_match_map_growth() {
        let g = blocked_grid();
        let mut trace = Algorithm::BreadthFirst.traced_solve(&g, Cell::new(0, 0), Cell::new(9, 9));
        let mut reached = 1;
        while let Some(step) = trace.next() {
            if step.relaxed {
                reached += 1;
                assert_eq!(trace.predecessors().get(&step.selected), Some(&Some(step.current)));
            }
            assert_eq!(trace.predecessors().len(), reached);
        }
    }
}
