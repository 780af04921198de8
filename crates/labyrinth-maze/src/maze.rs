//! Depth-first maze carving.
//!
//! Cells with two even coordinates are *chambers*; cells between two
//! chambers are the walls that carving may remove. Starting from a random
//! chamber, the generator repeatedly pops a chamber off an explicit stack,
//! opens every unvisited chamber two steps away along an axis together with
//! the wall in between, and pushes them back with one randomly chosen
//! chamber on top. Each chamber is opened exactly once, from exactly one
//! parent, so the result is a spanning tree over the chambers: connected and
//! free of cycles.

use labyrinth_core::{Cell, GridError, OccupancyGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One past the last row (or column) index that takes part in carving.
///
/// Equals `2 * floor((n - 1) / 2) + 1`. For even `n` the final row is left
/// out and cleared instead.
#[inline]
pub fn carve_extent(n: i32) -> i32 {
    (n - 1).max(0) / 2 * 2 + 1
}

/// The chambers of `grid`: even-coordinate cells inside the carve extent.
pub fn chambers(grid: &OccupancyGrid) -> impl Iterator<Item = Cell> + '_ {
    let rows = carve_extent(grid.rows()).min(grid.rows());
    let cols = carve_extent(grid.cols()).min(grid.cols());
    (0..rows)
        .step_by(2)
        .flat_map(move |r| (0..cols).step_by(2).map(move |c| Cell::new(r, c)))
}

/// Maze generator holding its random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Carve a perfect maze into a fresh `rows`×`cols` grid.
    ///
    /// Rows and columns past [`carve_extent`] are left free. Fails only for
    /// non-positive dimensions.
    pub fn dfs_maze(&mut self, rows: i32, cols: i32) -> Result<OccupancyGrid, GridError> {
        let mut grid = OccupancyGrid::walled(rows, cols)?;

        let row_extent = carve_extent(rows);
        let col_extent = carve_extent(cols);
        for r in row_extent..rows {
            for c in 0..cols {
                grid.set_free(Cell::new(r, c));
            }
        }
        for c in col_extent..cols {
            for r in 0..rows {
                grid.set_free(Cell::new(r, c));
            }
        }

        let start = Cell::new(
            self.rng.random_range(0..=(rows - 1) / 2) * 2,
            self.rng.random_range(0..=(cols - 1) / 2) * 2,
        );
        let index = |c: Cell| (c.row * cols + c.col) as usize;
        let mut visited = vec![false; grid.len()];
        visited[index(start)] = true;
        grid.set_free(start);

        let mut stack = vec![start];
        let mut nbuf: Vec<Cell> = Vec::with_capacity(4);
        let mut carved = 1usize;

        while let Some(current) = stack.pop() {
            nbuf.clear();
            for n in [
                current.shift(0, -2),
                current.shift(-2, 0),
                current.shift(2, 0),
                current.shift(0, 2),
            ] {
                if grid.contains(n) && !visited[index(n)] {
                    nbuf.push(n);
                }
            }
            if nbuf.is_empty() {
                continue;
            }

            let chosen = self.rng.random_range(0..nbuf.len());
            for (i, &n) in nbuf.iter().enumerate() {
                visited[index(n)] = true;
                grid.set_free(n);
                grid.set_free(Cell::new(
                    (current.row + n.row) / 2,
                    (current.col + n.col) / 2,
                ));
                carved += 1;
                if i != chosen {
                    stack.push(n);
                }
            }
            stack.push(nbuf[chosen]);
        }

        log::debug!("dfs maze {rows}x{cols}: {carved} chambers carved from {start}");
        Ok(grid)
    }
}

/// Generate a maze using the thread-local RNG.
pub fn generate(rows: i32, cols: i32) -> Result<OccupancyGrid, GridError> {
    MazeGen::new(rand::rng()).dfs_maze(rows, cols)
}

/// Generate a reproducible maze from `seed`.
pub fn generate_seeded(rows: i32, cols: i32, seed: u64) -> Result<OccupancyGrid, GridError> {
    MazeGen::new(StdRng::seed_from_u64(seed)).dfs_maze(rows, cols)
}
