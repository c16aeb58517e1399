use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must be larger than 5x5 in both directions, got {0}x{1}")]
    InvalidDimensions(Coord, Coord),
    #[error("Mine count {mines} must be positive and below the cell count {cells}")]
    InvalidMineCount { mines: CellCount, cells: CellCount },
    #[error("Too many mines: {mines} requested but only {available} cells lie outside the safe zone")]
    TooManyMines {
        mines: CellCount,
        available: CellCount,
    },
    #[error("Minefield was already generated")]
    AlreadyGenerated,
    #[error("Minefield has not been generated yet")]
    NotGenerated,
    #[error("Coordinates {0:?} are outside the board")]
    OutOfBounds(Coord2),
    #[error("Cell {0:?} was already revealed")]
    AlreadyRevealed(Coord2),
    #[error("Cell {0:?} is explored and its marker can no longer change")]
    AlreadyFinalized(Coord2),
    #[error("Cell {0:?} can only be explored from the unknown state")]
    InvalidTransition(Coord2),
    #[error("Cell {0:?} is already explored")]
    AlreadyExplored(Coord2),
    #[error("Cell {0:?} is flagged, remove the flag before exploring it")]
    CellFlagged(Coord2),
    #[error("Game already started")]
    AlreadyStarted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
