#![no_std]

extern crate alloc;

pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod error;
mod generator;
mod minefield;
mod render;
mod reveal;
mod session;
mod tile;
mod types;

/// Largest board accepted, 1024x1024 or any other shape with as many tiles.
pub const MAX_TILES: CellCount = 1 << 20;

/// Validated minefield dimensions and mine budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub size: Coord2,
    pub max_mines: CellCount,
}

impl GameConfig {
    const fn new_unchecked(size: Coord2, max_mines: CellCount) -> Self {
        Self { size, max_mines }
    }

    pub fn new(rows: Coord, columns: Coord, max_mines: CellCount) -> Result<Self> {
        if rows == 0 {
            return Err(ConfigError::NoRows.into());
        }
        if columns == 0 {
            return Err(ConfigError::NoColumns.into());
        }
        let total_tiles = mult(rows, columns);
        if total_tiles > MAX_TILES {
            return Err(ConfigError::TooLarge.into());
        }
        if total_tiles <= 1 {
            return Err(ConfigError::SingleTile.into());
        }
        if max_mines > total_tiles - 1 {
            return Err(ConfigError::TooManyMines.into());
        }
        Ok(Self::new_unchecked((rows, columns), max_mines))
    }

    /// Same checks as [`GameConfig::new`] for untrusted signed input.
    pub fn from_signed(rows: i64, columns: i64, max_mines: i64) -> Result<Self> {
        if rows <= 0 {
            return Err(ConfigError::NoRows.into());
        }
        if columns <= 0 {
            return Err(ConfigError::NoColumns.into());
        }
        let rows = Coord::try_from(rows).map_err(|_| ConfigError::TooLarge)?;
        let columns = Coord::try_from(columns).map_err(|_| ConfigError::TooLarge)?;
        // dimension checks come before the mine budget ones
        Self::new(rows, columns, 0)?;
        if max_mines < 0 {
            return Err(ConfigError::NegativeMines.into());
        }
        let max_mines = CellCount::try_from(max_mines).map_err(|_| ConfigError::TooManyMines)?;
        Self::new(rows, columns, max_mines)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn columns(&self) -> Coord {
        self.size.1
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Whether at least 60% of the tiles are mined.
    pub const fn is_dense(&self) -> bool {
        // max_mines / total >= 3 / 5, kept in integers
        (self.max_mines as u64) * 5 >= (self.total_tiles() as u64) * 3
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}
