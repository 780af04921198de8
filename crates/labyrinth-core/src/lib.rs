//! **labyrinth-core**: core types for the labyrinth grid pathfinding engine.
//!
//! This crate provides the two types every other labyrinth crate builds on:
//! [`Cell`], a `(row, column)` coordinate, and [`OccupancyGrid`], a fixed-size
//! boolean wall/free field with bounds-checked access and the neighbor
//! enumeration shared by all search algorithms.

pub mod geom;
pub mod grid;

pub use geom::Cell;
pub use grid::{GridError, MIN_COLS, MIN_ROWS, Neighbors, OccupancyGrid, dimension_from_slider};
