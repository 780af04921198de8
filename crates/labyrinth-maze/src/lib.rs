//! Maze generation for labyrinth.
//!
//! [`MazeGen`] carves perfect mazes into [`OccupancyGrid`]s with a
//! randomized depth-first walk. [`generate`] and [`generate_seeded`] are
//! shortcuts for the common cases.

pub mod maze;

pub use maze::{MazeGen, carve_extent, chambers, generate, generate_seeded};

pub use labyrinth_core::OccupancyGrid;
