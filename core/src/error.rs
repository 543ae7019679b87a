use thiserror::Error;

/// Which coordinate of a request fell outside the minefield.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
    Both,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Row => "Row",
            Self::Column => "Column",
            Self::Both => "Row and column",
        })
    }
}

/// Reason a `(rows, columns, max_mines)` triple was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("must have 1 or more rows")]
    NoRows,
    #[error("must have 1 or more columns")]
    NoColumns,
    #[error("grid dimensions too large")]
    TooLarge,
    #[error("must be more than 1 tile")]
    SingleTile,
    #[error("mines cannot be negative")]
    NegativeMines,
    #[error("more mines than tiles available (excluding (0,0))")]
    TooManyMines,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("{0} out of bounds")]
    OutOfBounds(Axis),
    #[error("You cannot place a mine at (0,0)")]
    InvalidPlacement,
    #[error("No game in progress")]
    NoActiveGame,
}

pub type Result<T> = core::result::Result<T, GameError>;
