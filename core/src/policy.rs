use crate::*;

/// Chooses the next move of a match. The engine itself never decides anything; a policy may be a
/// human at a prompt, a solver reading [`Game::frontier`], or a script.
pub trait MovePolicy {
    fn decide(&mut self, game: &Game) -> (Coord2, Move);
}

impl<F> MovePolicy for F
where
    F: FnMut(&Game) -> (Coord2, Move),
{
    fn decide(&mut self, game: &Game) -> (Coord2, Move) {
        self(game)
    }
}

impl Game {
    /// Asks `policy` for moves until the match is won or lost.
    ///
    /// A rejected move stops the loop and is returned as the error; the match stays as it was
    /// before that move.
    pub fn play(&mut self, policy: &mut impl MovePolicy) -> Result<MatchState> {
        while !self.is_finished() {
            let (coords, action) = policy.decide(self);
            log::trace!("Policy chose {:?} at {:?}", action, coords);
            self.apply(coords, action)?;
        }
        Ok(self.state())
    }
}
