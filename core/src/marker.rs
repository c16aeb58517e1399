use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    #[default]
    Unknown,
    MineFlag,
    Suspicious,
    /// Safe, with the number of mines among the neighbors. Terminal.
    Explored(u8),
}

impl Marker {
    pub const fn is_explored(self) -> bool {
        matches!(self, Self::Explored(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::MineFlag)
    }
}

/// The player's view of the board. It knows nothing about where the mines are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerGrid {
    cells: Array2<Marker>,
}

impl MarkerGrid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    /// Changes the marker of a cell.
    ///
    /// Explored cells are final and reject every change. A cell can become explored only from
    /// [`Marker::Unknown`].
    pub fn mark(&mut self, coords: Coord2, value: Marker) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        match (*cell, value) {
            (Marker::Explored(_), _) => Err(GameError::AlreadyFinalized(coords)),
            (Marker::MineFlag | Marker::Suspicious, Marker::Explored(_)) => {
                Err(GameError::InvalidTransition(coords))
            }
            _ => {
                *cell = value;
                Ok(())
            }
        }
    }

    pub fn status(&self, coords: Coord2) -> Result<Marker> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cell(coords))
    }

    /// False for coordinates outside the board.
    pub fn is_explored(&self, coords: Coord2) -> bool {
        self.cells
            .get(coords.to_nd_index())
            .is_some_and(|marker| marker.is_explored())
    }

    /// Marker at coordinates the caller already validated.
    pub(crate) fn cell(&self, coords: Coord2) -> Marker {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn count_neighbors(&self, coords: Coord2, marker: Marker) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cell(pos) == marker)
            .count() as u8
    }

    /// Every cell with its marker, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Marker)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &marker)| ((x as Coord, y as Coord), marker))
    }

    pub fn count(&self, marker: Marker) -> CellCount {
        self.cells.iter().filter(|&&cell| cell == marker).count() as CellCount
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }
}
