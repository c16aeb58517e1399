use super::*;

/// Places mines in one row-major pass, keeping the 3x3 block around the start point mine-free.
///
/// Every cell outside the safe zone gets a mine with probability `mines_left / cells_left` at the
/// time it is visited, which yields exactly the requested count and a uniform distribution over
/// all layouts with an empty safe zone.
#[derive(Clone, Debug, PartialEq)]
pub struct ReservoirGenerator {
    seed: u64,
    start: Coord2,
}

impl ReservoirGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl MinefieldGenerator for ReservoirGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        check_dimensions(config.size)?;
        config.check_mine_count()?;
        if !in_bounds(self.start, config.size) {
            return Err(GameError::OutOfBounds(self.start));
        }

        let available = config.total_cells() - safe_zone_size(self.start, config.size);
        if config.mines > available {
            return Err(GameError::TooManyMines {
                mines: config.mines,
                available,
            });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_left = config.mines;
        let mut cells_left = available;

        let (rows, cols) = config.size;
        'fill: for x in 0..rows {
            for y in 0..cols {
                if mines_left == 0 {
                    // everything not yet visited stays clear
                    break 'fill;
                }
                let coords = (x, y);
                if in_safe_zone(coords, self.start) {
                    continue;
                }

                let is_mine =
                    mines_left == cells_left || rng.random_range(1..=cells_left) <= mines_left;
                if is_mine {
                    mines[coords.to_nd_index()] = true;
                    mines_left -= 1;
                }
                cells_left -= 1;
            }
        }

        let layout = MineLayout::from_mine_mask(mines);
        log::debug!(
            "Generated {}x{} minefield with {} mines, safe start at {:?}",
            rows,
            cols,
            layout.mine_count(),
            self.start
        );
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        Ok(layout)
    }
}
