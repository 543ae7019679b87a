use rand::CryptoRng;

use crate::*;
pub use rejection::*;
pub use shuffle::*;

mod rejection;
mod shuffle;

/// Fills an empty [`Minefield`] up to its mine budget, never mining the origin.
pub trait MineGenerator {
    fn populate<R>(&self, minefield: &mut Minefield, rng: &mut R) -> Result<()>
    where
        R: CryptoRng;
}

/// Placement strategy picked from the mine density of a configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Rejection,
    Shuffle,
}

impl Placement {
    /// Rejection sampling slows down as the board fills up, past 60% a full
    /// shuffle is cheaper.
    pub const fn select(config: GameConfig) -> Self {
        if config.is_dense() {
            Self::Shuffle
        } else {
            Self::Rejection
        }
    }
}

impl MineGenerator for Placement {
    fn populate<R>(&self, minefield: &mut Minefield, rng: &mut R) -> Result<()>
    where
        R: CryptoRng,
    {
        log::debug!("populating minefield with {:?} placement", self);
        match self {
            Self::Rejection => RejectionGenerator.populate(minefield, rng)?,
            Self::Shuffle => ShuffleGenerator.populate(minefield, rng)?,
        }

        if minefield.mines_placed() != minefield.max_mines() {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                minefield.mines_placed(),
                minefield.max_mines()
            );
        }
        Ok(())
    }
}
