//! Pathfinding over [`OccupancyGrid`](labyrinth_core::OccupancyGrid)s.
//!
//! Three interchangeable strategies, selected through [`Algorithm`]:
//!
//! - **Breadth-first** ([`bfs_path`]): FIFO frontier, optimal in hop count
//! - **Dijkstra** ([`dijkstra_path`]): uniform-cost search under [`cost`]
//! - **A\*** ([`astar_path`]): Dijkstra ordered by cost + [`heuristic`]
//!
//! Each strategy runs either directly ([`Algorithm::solve`], returning the
//! final path) or step by step ([`Algorithm::traced_solve`], returning a
//! [`Trace`] that a consumer pulls at its own pace). [`SolveProgress`]
//! folds trace steps into an animation model, and [`TraceDriver`] runs a
//! trace on a worker thread with a per-step delay.
//!
//! # Determinism
//!
//! | Source of order | Rule |
//! |---|---|
//! | neighbor enumeration | [`OccupancyGrid::neighbors`](labyrinth_core::OccupancyGrid::neighbors) parity order |
//! | step cost | [`cost`] with its [`NUDGE`] tie-break |
//! | frontier ties | insertion order ([`Frontier`]) |
//!
//! Identical inputs therefore always produce identical paths and traces.

mod algorithm;
mod astar;
mod bfs;
mod cost;
mod dijkstra;
mod distance;
mod driver;
mod frontier;
mod progress;
mod reconstruct;
mod trace;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use astar::{CostMap, astar_path};
pub use bfs::bfs_path;
pub use cost::{BASE_COST, NUDGE, cost, path_cost};
pub use dijkstra::dijkstra_path;
pub use distance::{heuristic, manhattan};
pub use driver::{DriverConfig, DriverEvent, TraceDriver};
pub use frontier::Frontier;
pub use progress::SolveProgress;
pub use reconstruct::{PredecessorMap, reconstruct};
pub use trace::{SolveStep, Trace};
