use std::path::PathBuf;

use crate::grid::Pos;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Malformed input.
    #[error("the grid is empty")]
    EmptyGrid,
    #[error("row {row} has {found} cells, but the first row has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected cell {cell:?} at `({x}, {y})`")]
    InvalidCell { x: usize, y: usize, cell: char },
    #[error("no {0:?} marker in the grid")]
    MissingMarker(char),
    #[error("no open tile in row {row}")]
    NoOpening { row: usize },

    #[error("the point `({x}, {y})` is out of bounds. size: `({width}, {height})`")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("no path found to `({x}, {y})`")]
    NoPathFound { x: i32, y: i32 },

    #[error(transparent)]
    Args(#[from] pico_args::Error),
    #[error("unexpected arguments: {0:?}")]
    UnexpectedArguments(Vec<std::ffi::OsString>),
}

impl Error {
    pub(crate) fn no_path_to(target: Pos) -> Self {
        Self::NoPathFound {
            x: target.x,
            y: target.y,
        }
    }
}
