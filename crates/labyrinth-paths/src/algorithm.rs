use std::fmt;
use std::str::FromStr;

use labyrinth_core::{Cell, OccupancyGrid};

use crate::astar::astar_path;
use crate::bfs::bfs_path;
use crate::dijkstra::dijkstra_path;
use crate::trace::Trace;

/// The interchangeable search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    BreadthFirst,
    Dijkstra,
    #[default]
    AStar,
}

impl Algorithm {
    /// Every variant, in menu order.
    pub const ALL: [Algorithm; 3] = [Self::BreadthFirst, Self::Dijkstra, Self::AStar];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "Breadth-First",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
        }
    }

    /// Compute a path from `source` to `target`.
    ///
    /// The result starts at `source` and ends at `target`; it is `[source]`
    /// when the two are equal and empty when `target` cannot be reached.
    pub fn solve(self, grid: &OccupancyGrid, source: Cell, target: Cell) -> Vec<Cell> {
        match self {
            Self::BreadthFirst => bfs_path(grid, source, target),
            Self::Dijkstra => dijkstra_path(grid, source, target),
            Self::AStar => astar_path(grid, source, target),
        }
    }

    /// Start a step-by-step run of the same search.
    ///
    /// The returned [`Trace`] is independent of any [`solve`](Self::solve)
    /// call and does no work until pulled.
    pub fn traced_solve(self, grid: &OccupancyGrid, source: Cell, target: Cell) -> Trace<'_> {
        Trace::new(self, grid, source, target)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Algorithm::from_str`] for an unknown name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    name: String,
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm {:?} (expected bfs, dijkstra or astar)",
            self.name
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" | "breadth_first" | "breadthfirst" => Ok(Self::BreadthFirst),
            "dijkstra" | "ucs" | "uniform-cost" => Ok(Self::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            _ => Err(ParseAlgorithmError {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::path_cost;

    #[test]
    fn parse_names() {
        assert_eq!("bfs".parse(), Ok(Algorithm::BreadthFirst));
        assert_eq!("Breadth-First".parse(), Ok(Algorithm::BreadthFirst));
        assert_eq!("DIJKSTRA".parse(), Ok(Algorithm::Dijkstra));
        assert_eq!(" a* ".parse(), Ok(Algorithm::AStar));
        assert!("greedy".parse::<Algorithm>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.to_string().parse(), Ok(algo));
        }
    }

    #[test]
    fn all_find_length_19_on_open_10x10() {
        let g = OccupancyGrid::free(10, 10).unwrap();
        for algo in Algorithm::ALL {
            let path = algo.solve(&g, Cell::new(9, 9), Cell::new(0, 0));
            assert_eq!(path.len(), 19, "{algo}");
        }
    }

    #[test]
    fn cost_aware_searches_beat_or_match_bfs_cost() {
        let mut g = OccupancyGrid::free(10, 10).unwrap();
        g.set_occupied(Cell::new(3, 3));
        g.set_occupied(Cell::new(3, 4));
        g.set_occupied(Cell::new(4, 3));
        let (s, t) = (Cell::new(0, 0), Cell::new(9, 7));
        let bfs = Algorithm::BreadthFirst.solve(&g, s, t);
        let dij = Algorithm::Dijkstra.solve(&g, s, t);
        let ast = Algorithm::AStar.solve(&g, s, t);
        assert_eq!(bfs.len(), dij.len());
        assert_eq!(ast.len(), dij.len());
        assert!(path_cost(&dij) <= path_cost(&bfs) + 1e-9);
        assert!((path_cost(&dij) - path_cost(&ast)).abs() < 1e-9);
    }

    #[test]
    fn solve_on_wall_target() {
        let mut g = OccupancyGrid::free(10, 10).unwrap();
        g.set_occupied(Cell::new(5, 5));
        for algo in Algorithm::ALL {
            assert!(algo.solve(&g, Cell::ZERO, Cell::new(5, 5)).is_empty());
        }
    }
}
