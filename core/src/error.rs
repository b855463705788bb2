use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {rows}x{cols} board with {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Board shape does not fit the coordinate range")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure to load a [`GameConfig`](crate::GameConfig) from a settings blob.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}
