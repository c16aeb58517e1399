use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl MatchState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// An action the driver can take on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Explore,
    Flag,
    /// Removes a flag or a suspicious mark.
    Unflag,
    MarkSuspicious,
}

/// A single match: the hidden [`Field`], the player's [`MarkerGrid`] and the bookkeeping between
/// them.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    field: Field,
    markers: MarkerGrid,
    total_mines: CellCount,
    remaining_mines: i32,
    flagged_count: CellCount,
    state: MatchState,
    losing_cell: Option<Coord2>,
    frontier: Frontier,
    seed: u64,
}

impl Game {
    /// A new match whose mines are placed on the first explore, seeded with `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self::from_parts(Field::new(config.size)?, config.mines, seed))
    }

    /// A match over known mine positions. There is no safe start on such a field.
    pub fn with_layout(layout: MineLayout) -> Self {
        let mines = layout.mine_count();
        Self::from_parts(Field::with_layout(layout), mines, 0)
    }

    fn from_parts(field: Field, total_mines: CellCount, seed: u64) -> Self {
        Self {
            markers: MarkerGrid::new(field.size()),
            field,
            total_mines,
            remaining_mines: total_mines.into(),
            flagged_count: 0,
            state: MatchState::NotStarted,
            losing_cell: None,
            frontier: Frontier::new(),
            seed,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.field.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    /// Mines not yet flagged. Negative when the player placed more flags than there are mines.
    pub fn remaining_mines(&self) -> i32 {
        self.remaining_mines
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// The mine that ended the match, if it was lost.
    pub fn losing_cell(&self) -> Option<Coord2> {
        self.losing_cell
    }

    pub fn status(&self, coords: Coord2) -> Result<Marker> {
        self.markers.status(coords)
    }

    pub fn markers(&self) -> &MarkerGrid {
        &self.markers
    }

    /// Unexplored cells next to explored ones, as of the last move.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The mine positions, available only once the match is over.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        if self.is_finished() {
            self.field.layout()
        } else {
            None
        }
    }

    pub fn apply(&mut self, coords: Coord2, action: Move) -> Result<MoveOutcome> {
        match action {
            Move::Explore => self.explore(coords),
            Move::Flag => self.flag(coords),
            Move::Unflag => self.unflag(coords),
            Move::MarkSuspicious => self.mark_suspicious(coords),
        }
    }

    /// Explores a cell, generating the field around it first if this is the opening move.
    ///
    /// Cells with no adjacent mines open their whole zero region.
    pub fn explore(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.field.validate_coords(coords)?;
        self.check_not_finished()?;

        match self.markers.cell(coords) {
            Marker::Explored(_) => return Err(GameError::AlreadyExplored(coords)),
            Marker::MineFlag => return Err(GameError::CellFlagged(coords)),
            Marker::Unknown | Marker::Suspicious => {}
        }

        if !self.field.is_generated() {
            self.field.generate(coords, self.total_mines, self.seed)?;
        }
        if self.state == MatchState::NotStarted {
            log::debug!("Match started at {:?}", coords);
            self.state = MatchState::InProgress;
        }

        let outcome = match self.open_cell(coords, &mut Vec::new())? {
            Reveal::Mine => MoveOutcome::HitMine,
            Reveal::Clear(_) => MoveOutcome::Progressed,
        };
        Ok(self.finish_move(outcome))
    }

    /// Explores a uniformly random cell as the opening move.
    pub fn explore_random_start(&mut self) -> Result<MoveOutcome> {
        use rand::prelude::*;

        if self.state != MatchState::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        let (rows, cols) = self.size();
        let mut rng = SmallRng::seed_from_u64(self.seed.rotate_left(32));
        let start = (rng.random_range(0..rows), rng.random_range(0..cols));
        self.explore(start)
    }

    /// Flags a cell as a mine, then explores every neighbor that the new flag proves safe.
    pub fn flag(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.field.validate_coords(coords)?;
        self.check_not_finished()?;

        match self.markers.cell(coords) {
            Marker::Explored(_) => Err(GameError::AlreadyExplored(coords)),
            Marker::MineFlag => Ok(MoveOutcome::NoChange),
            Marker::Unknown | Marker::Suspicious => {
                self.markers.mark(coords, Marker::MineFlag)?;
                self.record_flag(true);

                let clues: Vec<_> = self
                    .markers
                    .iter_neighbors(coords)
                    .filter(|&pos| self.markers.is_explored(pos))
                    .collect();
                let outcome = MoveOutcome::Progressed | self.recheck(clues)?;
                Ok(self.finish_move(outcome))
            }
        }
    }

    /// Clears a flag or a suspicious mark.
    pub fn unflag(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.field.validate_coords(coords)?;
        self.check_not_finished()?;

        match self.markers.cell(coords) {
            Marker::Explored(_) => Err(GameError::AlreadyExplored(coords)),
            Marker::Unknown => Ok(MoveOutcome::NoChange),
            marker @ (Marker::MineFlag | Marker::Suspicious) => {
                self.markers.mark(coords, Marker::Unknown)?;
                if marker.is_flagged() {
                    self.record_flag(false);
                }
                Ok(self.finish_move(MoveOutcome::Progressed))
            }
        }
    }

    pub fn mark_suspicious(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.field.validate_coords(coords)?;
        self.check_not_finished()?;

        match self.markers.cell(coords) {
            Marker::Explored(_) => Err(GameError::AlreadyExplored(coords)),
            Marker::Suspicious => Ok(MoveOutcome::NoChange),
            marker @ (Marker::Unknown | Marker::MineFlag) => {
                self.markers.mark(coords, Marker::Suspicious)?;
                if marker.is_flagged() {
                    self.record_flag(false);
                }
                Ok(self.finish_move(MoveOutcome::Progressed))
            }
        }
    }

    /// Whether every safe cell is explored and every mine is flagged.
    ///
    /// # Panics
    ///
    /// If the flag counters disagree with each other or with the board.
    pub fn check_win(&self) -> bool {
        let flags_on_board = self.markers.count(Marker::MineFlag);
        assert!(
            self.flagged_count == flags_on_board
                && self.remaining_mines + i32::from(self.flagged_count)
                    == i32::from(self.total_mines),
            "flag counters out of sync: {} flagged, {} on board, {} remaining of {}",
            self.flagged_count,
            flags_on_board,
            self.remaining_mines,
            self.total_mines
        );

        self.remaining_mines == 0
            && flags_on_board == self.total_mines
            && self
                .markers
                .iter()
                .all(|(_, marker)| marker.is_explored() || marker.is_flagged())
    }

    /// Reveals one cell on both layers, cascading when it has no adjacent mines.
    ///
    /// Every cell that becomes explored is appended to `opened`.
    fn open_cell(&mut self, coords: Coord2, opened: &mut Vec<Coord2>) -> Result<Reveal> {
        let reveal = self.reveal_single(coords)?;
        if let Reveal::Clear(count) = reveal {
            opened.push(coords);
            if count == 0 {
                self.flood_fill(coords, opened)?;
            }
        }
        Ok(reveal)
    }

    fn reveal_single(&mut self, coords: Coord2) -> Result<Reveal> {
        if self.markers.cell(coords) == Marker::Suspicious {
            self.markers.mark(coords, Marker::Unknown)?;
        }

        let reveal = self.field.reveal(coords)?;
        match reveal {
            Reveal::Mine => {
                log::debug!("Mine hit at {:?}, match lost", coords);
                self.losing_cell = Some(coords);
                self.state = MatchState::Lost;
            }
            Reveal::Clear(count) => self.markers.mark(coords, Marker::Explored(count))?,
        }
        Ok(reveal)
    }

    /// Opens everything reachable from `start` through cells with no adjacent mines.
    fn flood_fill(&mut self, start: Coord2, opened: &mut Vec<Coord2>) -> Result<()> {
        let mut to_visit = VecDeque::from([start]);

        while let Some(center) = to_visit.pop_front() {
            for pos in self.markers.iter_neighbors(center) {
                if !self.can_auto_open(pos) {
                    continue;
                }
                log::trace!("Cascade from {:?} opens {:?}", center, pos);
                let reveal = self.reveal_single(pos)?;
                if let Reveal::Clear(count) = reveal {
                    opened.push(pos);
                    if count == 0 {
                        to_visit.push_back(pos);
                    }
                }
            }
        }
        Ok(())
    }

    /// Explores the unmarked neighbors of every clue whose flag count already matches it,
    /// following up on every cell this uncovers, cascades included.
    fn recheck(&mut self, clues: Vec<Coord2>) -> Result<MoveOutcome> {
        let mut outcome = MoveOutcome::NoChange;
        let mut to_check = VecDeque::from(clues);

        while let Some(center) = to_check.pop_front() {
            let Marker::Explored(clue) = self.markers.cell(center) else {
                continue;
            };
            if self.markers.count_neighbors(center, Marker::MineFlag) != clue {
                continue;
            }

            let safe: Vec<_> = self
                .markers
                .iter_neighbors(center)
                .filter(|&pos| self.can_auto_open(pos))
                .collect();
            for pos in safe {
                // an earlier cascade may have opened it already
                if !self.can_auto_open(pos) {
                    continue;
                }
                log::trace!("Clue at {:?} proves {:?} safe", center, pos);
                let mut opened = Vec::new();
                match self.open_cell(pos, &mut opened)? {
                    Reveal::Mine => {
                        log::warn!(
                            "Deduction from {:?} hit a mine at {:?}, a flag was misplaced",
                            center,
                            pos
                        );
                        return Ok(MoveOutcome::HitMine);
                    }
                    Reveal::Clear(_) => {
                        outcome = MoveOutcome::Progressed;
                        to_check.extend(opened);
                    }
                }
            }
        }
        Ok(outcome)
    }

    fn can_auto_open(&self, coords: Coord2) -> bool {
        matches!(
            self.markers.cell(coords),
            Marker::Unknown | Marker::Suspicious
        )
    }

    fn record_flag(&mut self, placed: bool) {
        if placed {
            self.flagged_count += 1;
            self.remaining_mines -= 1;
        } else {
            self.flagged_count -= 1;
            self.remaining_mines += 1;
        }
    }

    fn finish_move(&mut self, outcome: MoveOutcome) -> MoveOutcome {
        self.frontier = scan_frontier(&self.markers);

        if self.state == MatchState::Lost {
            return MoveOutcome::HitMine;
        }
        if self.check_win() {
            log::debug!("Match won with {} mines flagged", self.flagged_count);
            self.state = MatchState::Won;
            return MoveOutcome::Won;
        }
        outcome
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
