//! Shared pieces of the `labyrinth` demo binary: grid sources, endpoint
//! parsing and ASCII rendering.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use labyrinth_core::{Cell, OccupancyGrid};

/// Default grid size when neither a file nor dimensions are given.
pub const DEFAULT_ROWS: i32 = 21;
pub const DEFAULT_COLS: i32 = 41;

/// Where the demo gets its grid from.
#[derive(Debug, Clone)]
pub enum GridSource {
    File(PathBuf),
    Maze { rows: i32, cols: i32, seed: Option<u64> },
    Empty { rows: i32, cols: i32 },
}

impl GridSource {
    pub fn build(&self) -> Result<OccupancyGrid> {
        let grid = match self {
            Self::File(path) => labyrinth_io::load(path)?,
            Self::Maze { rows, cols, seed } => match seed {
                Some(seed) => labyrinth_maze::generate_seeded(*rows, *cols, *seed)?,
                None => labyrinth_maze::generate(*rows, *cols)?,
            },
            Self::Empty { rows, cols } => OccupancyGrid::free(*rows, *cols)?,
        };
        Ok(grid)
    }
}

/// Parse `row,col` into a cell.
pub fn parse_cell(s: &str) -> Result<Cell> {
    let (r, c) = s
        .split_once(',')
        .with_context(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = r.trim().parse().with_context(|| format!("bad row in {s:?}"))?;
    let col = c.trim().parse().with_context(|| format!("bad column in {s:?}"))?;
    Ok(Cell::new(row, col))
}

/// Resolve the endpoints, defaulting to the bottom-right and top-left
/// corners, and make sure both are walkable.
pub fn endpoints(
    grid: &mut OccupancyGrid,
    source: Option<Cell>,
    target: Option<Cell>,
) -> Result<(Cell, Cell)> {
    let source = source.unwrap_or(Cell::new(grid.rows() - 1, grid.cols() - 1));
    let target = target.unwrap_or(Cell::ZERO);
    for (name, cell) in [("source", source), ("target", target)] {
        if !grid.contains(cell) {
            bail!("{name} {cell} is outside the {}x{} grid", grid.rows(), grid.cols());
        }
        grid.set_free(cell);
    }
    Ok((source, target))
}

/// Resize `grid`, moving an endpoint that no longer fits back to its
/// default corner and clearing the cell it lands on.
///
/// Returns `None`, with nothing changed, when the resize is rejected.
pub fn resize_with_endpoints(
    grid: &mut OccupancyGrid,
    rows: i32,
    cols: i32,
    source: Cell,
    target: Cell,
) -> Option<(Cell, Cell)> {
    if !grid.resize(rows, cols) {
        log::warn!("rejected resize to {rows}x{cols}");
        return None;
    }
    let mut target = target;
    if !grid.contains(target) {
        target = Cell::ZERO;
        grid.set_free(target);
    }
    let mut source = source;
    if !grid.contains(source) {
        source = Cell::new(rows - 1, cols - 1);
        grid.set_free(source);
    }
    Some((source, target))
}

/// What to overlay on the grid when rendering.
#[derive(Debug, Default)]
pub struct Overlay<'a> {
    pub source: Option<Cell>,
    pub target: Option<Cell>,
    pub path: &'a [Cell],
    pub used: Option<&'a HashSet<Cell>>,
    pub current: Option<Cell>,
}

/// Render `grid` as text: `#` wall, `.` free, `o` used, `*` path,
/// `@` current cell, `S`/`T` endpoints.
pub fn render(grid: &OccupancyGrid, overlay: &Overlay<'_>) -> String {
    let path: HashSet<Cell> = overlay.path.iter().copied().collect();
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let cell = Cell::new(r, c);
            let ch = if Some(cell) == overlay.source {
                'S'
            } else if Some(cell) == overlay.target {
                'T'
            } else if Some(cell) == overlay.current {
                '@'
            } else if path.contains(&cell) {
                '*'
            } else if grid.is_occupied(cell) {
                '#'
            } else if overlay.used.is_some_and(|u| u.contains(&cell)) {
                'o'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// One-line summary of a finished search.
pub fn summary(source: Cell, target: Cell, path: &[Cell]) -> String {
    let mut s = String::new();
    if path.is_empty() {
        let _ = write!(s, "No path exists from point {source} to point {target}");
    } else {
        let _ = write!(
            s,
            "path of {} cells, {} steps, cost {:.3}",
            path.len(),
            path.len() - 1,
            labyrinth_paths::path_cost(path)
        );
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_accepts_spaces() {
        assert_eq!(parse_cell("3, 4").unwrap(), Cell::new(3, 4));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,4").is_err());
    }

    #[test]
    fn endpoints_default_to_corners_and_clear_walls() {
        let mut g = OccupancyGrid::walled(10, 12).unwrap();
        let (s, t) = endpoints(&mut g, None, None).unwrap();
        assert_eq!(s, Cell::new(9, 11));
        assert_eq!(t, Cell::ZERO);
        assert!(g.is_free(s) && g.is_free(t));
        assert!(endpoints(&mut g, Some(Cell::new(10, 0)), None).is_err());
    }

    #[test]
    fn shrinking_moves_stranded_endpoints() {
        let mut g = OccupancyGrid::walled(30, 30).unwrap();
        let (s, t) = (Cell::new(29, 29), Cell::new(25, 3));
        let (s2, t2) = resize_with_endpoints(&mut g, 12, 20, s, t).unwrap();
        assert_eq!(s2, Cell::new(11, 19));
        assert_eq!(t2, Cell::ZERO);
        assert!(g.is_free(s2) && g.is_free(t2));
        // Endpoints that still fit stay put, walls and all.
        let inside = Cell::new(5, 5);
        let (s3, t3) = resize_with_endpoints(&mut g, 15, 15, inside, t2).unwrap();
        assert_eq!((s3, t3), (inside, Cell::ZERO));
        assert!(g.is_occupied(inside));
    }

    #[test]
    fn rejected_resize_keeps_everything() {
        let mut g = OccupancyGrid::free(12, 12).unwrap();
        let (s, t) = (Cell::new(11, 11), Cell::ZERO);
        assert_eq!(resize_with_endpoints(&mut g, 9, 50, s, t), None);
        assert_eq!((g.rows(), g.cols()), (12, 12));
    }

    #[test]
    fn render_marks_overlay() {
        let mut g = OccupancyGrid::free(2, 3).unwrap();
        g.set_occupied(Cell::new(1, 1));
        let path = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)];
        let text = render(
            &g,
            &Overlay {
                source: Some(Cell::new(0, 0)),
                target: Some(Cell::new(0, 2)),
                path: &path,
                ..Overlay::default()
            },
        );
        assert_eq!(text, "S*T\n.#.\n");
    }

    #[test]
    fn summary_reports_unreachable() {
        let s = summary(Cell::new(9, 9), Cell::ZERO, &[]);
        assert_eq!(s, "No path exists from point (9, 9) to point (0, 0)");
    }
}
