//! Load and save [`OccupancyGrid`]s as comma-separated text.
//!
//! ## Format
//!
//! ```text
//! 1,1,1,0,...
//! 0,0,1,0,...
//! ```
//!
//! One grid row per line, `1` for a wall and `0` for a free cell. The first
//! line fixes the column count; every other line must match it. A file
//! needs at least two lines and must describe a grid of at least
//! [`MIN_ROWS`]×[`MIN_COLS`].

mod error;

use std::fs;
use std::path::Path;

use labyrinth_core::{Cell, MIN_COLS, MIN_ROWS, OccupancyGrid};

pub use error::GridFileError;

/// Parse a grid from its text form.
pub fn parse(text: &str) -> Result<OccupancyGrid, GridFileError> {
    let mut lines: Vec<&str> = text.lines().collect();
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.len() < 2 {
        return Err(GridFileError::format(
            lines.len(),
            "expected at least 2 lines",
        ));
    }

    let rows = lines.len() as i32;
    let cols = lines[0].split(',').count() as i32;
    if rows < MIN_ROWS || cols < MIN_COLS {
        log::warn!("rejecting {rows}x{cols} grid: below {MIN_ROWS}x{MIN_COLS}");
        return Err(GridFileError::TooSmall { rows, cols });
    }
    let mut grid =
        OccupancyGrid::free(rows, cols).map_err(|_| GridFileError::TooSmall { rows, cols })?;

    for (r, line) in lines.iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() as i32 != cols {
            return Err(GridFileError::format(
                r + 1,
                format!("expected {cols} fields, found {}", fields.len()),
            ));
        }
        for (c, field) in fields.iter().enumerate() {
            match field.trim() {
                "1" => {
                    grid.set_occupied(Cell::new(r as i32, c as i32));
                }
                "0" => {}
                other => {
                    return Err(GridFileError::format(
                        r + 1,
                        format!("invalid cell value {other:?} in column {}", c + 1),
                    ));
                }
            }
        }
    }
    Ok(grid)
}

/// Render a grid in its text form, without a trailing newline.
pub fn dump(grid: &OccupancyGrid) -> String {
    let mut out = String::with_capacity(grid.len() * 2);
    for r in 0..grid.rows() {
        if r != 0 {
            out.push('\n');
        }
        for c in 0..grid.cols() {
            if c != 0 {
                out.push(',');
            }
            out.push(if grid.is_occupied(Cell::new(r, c)) { '1' } else { '0' });
        }
    }
    out
}

/// Read and parse the grid stored at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<OccupancyGrid, GridFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| GridFileError::io(path, e))?;
    let grid = parse(&text)?;
    log::info!("loaded {}x{} grid from {}", grid.rows(), grid.cols(), path.display());
    Ok(grid)
}

/// Write `grid` to `path`, replacing any existing file.
pub fn save(grid: &OccupancyGrid, path: impl AsRef<Path>) -> Result<(), GridFileError> {
    let path = path.as_ref();
    fs::write(path, dump(grid)).map_err(|e| GridFileError::io(path, e))?;
    log::info!("saved {}x{} grid to {}", grid.rows(), grid.cols(), path.display());
    Ok(())
}
