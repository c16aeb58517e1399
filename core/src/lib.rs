#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use field::*;
pub use frontier::*;
pub use game::*;
pub use generator::*;
pub use marker::*;
pub use policy::*;
pub use types::*;

mod error;
mod field;
mod frontier;
mod game;
mod generator;
mod marker;
mod policy;
mod types;

/// Smallest board side that is rejected; both sides must be strictly larger.
pub const MIN_SIDE_EXCLUSIVE: Coord = 5;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates the board dimensions and that `0 < mines < rows * cols`.
    ///
    /// Whether the mines also fit around the start point is only known once the first cell is
    /// explored, see [`Field::generate`].
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        check_dimensions(size)?;
        let config = Self::new_unchecked(size, mines);
        config.check_mine_count()?;
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub(crate) fn check_mine_count(&self) -> Result<()> {
        let cells = self.total_cells();
        if self.mines == 0 || self.mines >= cells {
            Err(GameError::InvalidMineCount {
                mines: self.mines,
                cells,
            })
        } else {
            Ok(())
        }
    }
}

pub(crate) fn check_dimensions((rows, cols): Coord2) -> Result<()> {
    if rows <= MIN_SIDE_EXCLUSIVE || cols <= MIN_SIDE_EXCLUSIVE {
        Err(GameError::InvalidDimensions(rows, cols))
    } else {
        Ok(())
    }
}

/// Where the mines are. Built once, either by a [`MinefieldGenerator`] or from known coordinates,
/// and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        check_dimensions(size)?;
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds(coords));
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        layout.game_config().check_mine_count()?;
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbors, the cast cannot truncate
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// All mine coordinates in row-major order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

/// What a single move did to the match.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MoveOutcome {
    NoChange,
    Progressed,
    HitMine,
    Won,
}

impl BitOr for MoveOutcome {
    type Output = MoveOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use MoveOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Progressed, _) => Progressed,
            (_, Progressed) => Progressed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn config_rejects_small_boards() {
        assert_eq!(
            GameConfig::new((5, 10), 3),
            Err(GameError::InvalidDimensions(5, 10))
        );
        assert_eq!(
            GameConfig::new((10, 2), 3),
            Err(GameError::InvalidDimensions(10, 2))
        );
        assert!(GameConfig::new((6, 6), 3).is_ok());
    }

    #[test]
    fn config_rejects_mine_counts_outside_board() {
        let invalid = |mines| GameError::InvalidMineCount { mines, cells: 100 };
        assert_eq!(GameConfig::new((10, 10), 0), Err(invalid(0)));
        assert_eq!(GameConfig::new((10, 10), 100), Err(invalid(100)));
        assert_eq!(GameConfig::new((10, 10), 99).map(|c| c.mines), Ok(99));
    }

    #[test]
    fn layout_from_coords_counts_neighbors() {
        let layout = MineLayout::from_mine_coords((6, 6), &[(0, 0), (0, 1), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 33);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 3);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 2);
        assert_eq!(layout.adjacent_mine_count((5, 5)), 0);
        assert!(layout.contains_mine((2, 2)));
        assert!(!layout.contains_mine((9, 9)));
        assert_eq!(
            layout.mine_coords().collect::<Vec<_>>(),
            [(0, 0), (0, 1), (2, 2)]
        );
    }

    #[test]
    fn layout_from_coords_validates_input() {
        assert_eq!(
            MineLayout::from_mine_coords((6, 6), &[(6, 0)]),
            Err(GameError::OutOfBounds((6, 0)))
        );
        assert_eq!(
            MineLayout::from_mine_coords((6, 6), &[]),
            Err(GameError::InvalidMineCount { mines: 0, cells: 36 })
        );
    }

    #[test]
    fn outcome_merge_prefers_terminal_results() {
        use MoveOutcome::*;
        assert_eq!(NoChange | Progressed, Progressed);
        assert_eq!(Progressed | Won, Won);
        assert_eq!(Won | HitMine, HitMine);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
