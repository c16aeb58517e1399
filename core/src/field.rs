use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of revealing one cell of the field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reveal {
    /// No mine here, with the number of mines among the neighbors.
    Clear(u8),
    /// The cell holds a mine and the match is lost.
    Mine,
}

#[derive(Clone, Debug, PartialEq)]
enum Layout {
    Pending,
    Generated(MineLayout),
}

/// The hidden side of a match: where the mines are, and which cells were already played.
///
/// Mines are placed lazily on the first [`Field::generate`] call, after which the layout is
/// fixed for the rest of the match.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    size: Coord2,
    layout: Layout,
    revealed: Array2<bool>,
}

impl Field {
    pub fn new(size: Coord2) -> Result<Self> {
        check_dimensions(size)?;
        Ok(Self {
            size,
            layout: Layout::Pending,
            revealed: Array2::default(size.to_nd_index()),
        })
    }

    /// A field whose mines are already known.
    pub fn with_layout(layout: MineLayout) -> Self {
        let size = layout.size();
        Self {
            size,
            layout: Layout::Generated(layout),
            revealed: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.layout, Layout::Generated(_))
    }

    pub fn is_valid_coords(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_valid_coords(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    /// Places `mines` mines at random, keeping `start` and its neighbors clear.
    pub fn generate(&mut self, start: Coord2, mines: CellCount, seed: u64) -> Result<()> {
        self.generate_with(ReservoirGenerator::new(seed, start), mines)
    }

    pub fn generate_with(
        &mut self,
        generator: impl MinefieldGenerator,
        mines: CellCount,
    ) -> Result<()> {
        if self.is_generated() {
            return Err(GameError::AlreadyGenerated);
        }
        let layout = generator.generate(GameConfig::new_unchecked(self.size, mines))?;
        self.layout = Layout::Generated(layout);
        Ok(())
    }

    /// Plays a cell. Each cell can be revealed only once.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Reveal> {
        let Layout::Generated(layout) = &self.layout else {
            return Err(GameError::NotGenerated);
        };
        let coords = self.validate_coords(coords)?;
        let revealed = &mut self.revealed[coords.to_nd_index()];
        if *revealed {
            return Err(GameError::AlreadyRevealed(coords));
        }
        *revealed = true;

        Ok(if layout[coords] {
            Reveal::Mine
        } else {
            Reveal::Clear(layout.adjacent_mine_count(coords))
        })
    }

    pub(crate) fn layout(&self) -> Option<&MineLayout> {
        match &self.layout {
            Layout::Pending => None,
            Layout::Generated(layout) => Some(layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_enforces_minimum_size() {
        assert_eq!(Field::new((5, 6)), Err(GameError::InvalidDimensions(5, 6)));
        assert_eq!(Field::new((6, 0)), Err(GameError::InvalidDimensions(6, 0)));
        assert!(Field::new((6, 6)).is_ok());
    }

    #[test]
    fn generates_once() {
        let mut field = Field::new((10, 10)).unwrap();
        assert!(!field.is_generated());
        field.generate((4, 4), 20, 1).unwrap();
        assert!(field.is_generated());
        assert_eq!(
            field.generate((4, 4), 20, 1),
            Err(GameError::AlreadyGenerated)
        );
    }

    #[test]
    fn failed_generation_leaves_field_pending() {
        let mut field = Field::new((10, 10)).unwrap();
        assert!(matches!(
            field.generate((0, 0), 97, 1),
            Err(GameError::TooManyMines { .. })
        ));
        assert!(!field.is_generated());
        assert!(field.generate((0, 0), 96, 1).is_ok());
    }

    #[test]
    fn reveal_requires_generation() {
        let mut field = Field::new((10, 10)).unwrap();
        assert_eq!(field.reveal((0, 0)), Err(GameError::NotGenerated));
    }

    #[test]
    fn corner_start_reveals_count_not_mine() {
        for seed in 0..50 {
            let mut field = Field::new((10, 10)).unwrap();
            field.generate((0, 0), 20, seed).unwrap();
            assert_eq!(field.reveal((0, 0)), Ok(Reveal::Clear(0)));
        }
    }

    #[test]
    fn reveal_reports_counts_mines_and_repeats() {
        let layout = MineLayout::from_mine_coords((6, 6), &[(0, 0), (0, 2)]).unwrap();
        let mut field = Field::with_layout(layout);

        assert_eq!(field.reveal((0, 1)), Ok(Reveal::Clear(2)));
        assert_eq!(field.reveal((0, 1)), Err(GameError::AlreadyRevealed((0, 1))));
        assert_eq!(field.reveal((0, 0)), Ok(Reveal::Mine));
        assert_eq!(field.reveal((6, 1)), Err(GameError::OutOfBounds((6, 1))));
        // neighbor counting does not consume the neighbors
        assert_eq!(field.reveal((1, 1)), Ok(Reveal::Clear(2)));
        assert_eq!(field.reveal((0, 2)), Ok(Reveal::Mine));
    }

    #[test]
    fn coordinate_validation() {
        let field = Field::new((6, 8)).unwrap();
        assert!(field.is_valid_coords((5, 7)));
        assert!(!field.is_valid_coords((6, 7)));
        assert!(!field.is_valid_coords((5, 8)));
    }
}
