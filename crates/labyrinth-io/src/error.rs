use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Failure to read, parse or write a grid file.
#[derive(Debug)]
pub enum GridFileError {
    /// The file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The text is not a valid grid. `line` is 1-based.
    Format { line: usize, reason: String },
    /// The described grid is smaller than the minimum size.
    TooSmall { rows: i32, cols: i32 },
}

impl GridFileError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GridFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "grid file {}: {source}", path.display()),
            Self::Format { line, reason } => write!(f, "invalid grid format at line {line}: {reason}"),
            Self::TooSmall { rows, cols } => write!(
                f,
                "grid of {rows}x{cols} is below the {}x{} minimum",
                labyrinth_core::MIN_ROWS,
                labyrinth_core::MIN_COLS
            ),
        }
    }
}

impl std::error::Error for GridFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
