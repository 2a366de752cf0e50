use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("Mine divisor must be positive")]
    InvalidDensity,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mine layout does not match the board size")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
