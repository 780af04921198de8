//! The [`OccupancyGrid`] type: a rows×columns field of wall/free flags.
//!
//! Reads are total: any cell outside the grid reads as occupied, so search
//! code can treat the border as an implicit wall. Writes outside the grid are
//! rejected and reported through a `bool` return value.

use std::fmt;
use std::iter::FusedIterator;

use crate::geom::Cell;

/// Minimum number of rows accepted by [`OccupancyGrid::resize`].
pub const MIN_ROWS: i32 = 10;
/// Minimum number of columns accepted by [`OccupancyGrid::resize`].
pub const MIN_COLS: i32 = 10;

/// Map a 0–100 size slider onto a dimension in `10..=100`.
///
/// Values past 100 saturate.
pub fn dimension_from_slider(percent: u32) -> i32 {
    (percent.min(100) * 90 / 100) as i32 + MIN_ROWS
}

/// Error returned when a grid cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns were not positive.
    InvalidDimensions { rows: i32, cols: i32 },
    /// Stored cell data does not cover `rows`×`cols`.
    CellCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}: both must be positive")
            }
            Self::CellCountMismatch { expected, found } => {
                write!(f, "grid needs {expected} cells, found {found}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// OccupancyGrid
// ---------------------------------------------------------------------------

/// A fixed-size 2D boolean field. `true` means occupied (wall).
///
/// Storage is row-major. The grid is exclusively owned; searches borrow it
/// immutably and never write to it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct OccupancyGrid {
    rows: i32,
    cols: i32,
    cells: Vec<bool>,
}

/// Unchecked wire form of [`OccupancyGrid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    rows: i32,
    cols: i32,
    cells: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for OccupancyGrid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, GridError> {
        let RawGrid { rows, cols, cells } = raw;
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let expected = (rows as usize) * (cols as usize);
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }
}

impl OccupancyGrid {
    /// Create a `rows`×`cols` grid with every cell set to `preset`.
    ///
    /// Only non-positive dimensions are rejected; the 10×10 floor applies to
    /// [`resize`](Self::resize).
    pub fn new(rows: i32, cols: i32, preset: bool) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![preset; (rows as usize) * (cols as usize)],
        })
    }

    /// Create an all-free grid.
    pub fn free(rows: i32, cols: i32) -> Result<Self, GridError> {
        Self::new(rows, cols, false)
    }

    /// Create an all-occupied grid.
    pub fn walled(rows: i32, cols: i32) -> Result<Self, GridError> {
        Self::new(rows, cols, true)
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell` lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.col >= 0 && cell.row < self.rows && cell.col < self.cols
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some((cell.row as usize) * (self.cols as usize) + (cell.col as usize))
        } else {
            None
        }
    }

    /// Whether `cell` is a wall. Out-of-bounds cells read as occupied.
    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) => self.cells[i],
            None => true,
        }
    }

    /// Whether `cell` is in bounds and walkable.
    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.is_occupied(cell)
    }

    /// Write `occupied` at `cell`. Returns whether the write applied.
    pub fn set(&mut self, cell: Cell, occupied: bool) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = occupied;
                true
            }
            None => false,
        }
    }

    /// Mark `cell` as a wall. Returns whether the write applied.
    pub fn set_occupied(&mut self, cell: Cell) -> bool {
        self.set(cell, true)
    }

    /// Mark `cell` as walkable. Returns whether the write applied.
    pub fn set_free(&mut self, cell: Cell) -> bool {
        self.set(cell, false)
    }

    /// Flip `cell`. Returns whether the write applied.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = !self.cells[i];
                true
            }
            None => false,
        }
    }

    /// Set every cell to `occupied`.
    pub fn fill(&mut self, occupied: bool) {
        self.cells.fill(occupied);
    }

    /// Resize in place, keeping the overlapping sub-rectangle and freeing
    /// every new cell.
    ///
    /// Returns `false` and leaves the grid untouched unless both dimensions
    /// meet the [`MIN_ROWS`]×[`MIN_COLS`] floor.
    pub fn resize(&mut self, rows: i32, cols: i32) -> bool {
        if rows < MIN_ROWS || cols < MIN_COLS {
            return false;
        }
        let mut cells = vec![false; (rows as usize) * (cols as usize)];
        let keep_rows = rows.min(self.rows);
        let keep_cols = cols.min(self.cols) as usize;
        for r in 0..keep_rows {
            let src = (r as usize) * (self.cols as usize);
            let dst = (r as usize) * (cols as usize);
            cells[dst..dst + keep_cols].copy_from_slice(&self.cells[src..src + keep_cols]);
        }
        self.rows = rows;
        self.cols = cols;
        self.cells = cells;
        true
    }

    /// The in-bounds, free, axis-aligned neighbours of `cell`.
    ///
    /// Candidates are generated as `(r+1, c)`, `(r-1, c)`, `(r, c-1)`,
    /// `(r, c+1)`; when `r + c` is even that order is reversed. The sequence
    /// is produced lazily.
    pub fn neighbors(&self, cell: Cell) -> Neighbors<'_> {
        let mut candidates = [
            cell.shift(1, 0),
            cell.shift(-1, 0),
            cell.shift(0, -1),
            cell.shift(0, 1),
        ];
        if cell.parity_even() {
            candidates.reverse();
        }
        Neighbors {
            grid: self,
            candidates,
            pos: 0,
        }
    }

    /// Iterate over every in-bounds cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Cell::new(r, c)))
    }

    /// Iterate over `(Cell, occupied)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.cells().zip(self.cells.iter().copied())
    }

    /// Number of walls.
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Number of walkable cells.
    pub fn count_free(&self) -> usize {
        self.cells.len() - self.count_occupied()
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// Lazy iterator returned by [`OccupancyGrid::neighbors`].
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    grid: &'a OccupancyGrid,
    candidates: [Cell; 4],
    pos: usize,
}

impl Iterator for Neighbors<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while self.pos < self.candidates.len() {
            let c = self.candidates[self.pos];
            self.pos += 1;
            if self.grid.is_free(c) {
                return Some(c);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.candidates.len() - self.pos))
    }
}

impl FusedIterator for Neighbors<'_> {}
