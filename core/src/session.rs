use rand::CryptoRng;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Owns the active minefield and the random source used to lay it out.
///
/// A finished game is moved out of play and kept only for display until the
/// next [`Session::new_game`].
#[derive(Debug)]
pub struct Session<R> {
    rng: R,
    minefield: Option<Minefield>,
    last_game: Option<Minefield>,
    state: SessionState,
}

impl<R: CryptoRng> Session<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            minefield: None,
            last_game: None,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The game in progress, if any.
    pub fn minefield(&self) -> Option<&Minefield> {
        self.minefield.as_ref()
    }

    /// The most recently finished game.
    pub fn last_game(&self) -> Option<&Minefield> {
        self.last_game.as_ref()
    }

    pub fn new_game(
        &mut self,
        rows: Coord,
        columns: Coord,
        max_mines: CellCount,
    ) -> Result<&Minefield> {
        self.start(GameConfig::new(rows, columns, max_mines)?)
    }

    /// Replaces any current game with a freshly populated one.
    pub fn start(&mut self, config: GameConfig) -> Result<&Minefield> {
        let minefield = Minefield::new_game(config, &mut self.rng)?;
        self.last_game = None;
        self.state = SessionState::Active;
        Ok(self.minefield.insert(minefield))
    }

    pub fn step(&mut self, coords: Coord2) -> Result<StepOutcome> {
        let minefield = self.minefield.as_mut().ok_or(GameError::NoActiveGame)?;

        let before = minefield[minefield.validate_coords(coords)?];
        if !minefield.step(coords, &mut self.rng)? {
            self.finish(false);
            return Ok(StepOutcome::HitMine);
        }

        if minefield.are_all_mines_revealed() {
            self.finish(true);
            Ok(StepOutcome::Won)
        } else if before == minefield[coords] {
            Ok(StepOutcome::NoChange)
        } else {
            Ok(StepOutcome::Revealed)
        }
    }

    pub fn mark_tile(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let minefield = self.minefield.as_mut().ok_or(GameError::NoActiveGame)?;

        let outcome = minefield.mark_tile(coords)?;
        if outcome.has_update() && minefield.are_all_mines_revealed() {
            self.finish(true);
        }
        Ok(outcome)
    }

    fn finish(&mut self, won: bool) {
        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        log::debug!("game ended: {:?}", self.state);
        self.last_game = self.minefield.take();
    }
}
