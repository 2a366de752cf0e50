//! Minesweeper board engine: mine placement, adjacency counting, flood-fill reveal and win/loss detection
//! over a small in-memory grid.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod snapshot;
mod types;

/// One mine for every this many cells, rounded down.
pub const DEFAULT_MINE_DIVISOR: CellCount = 7;

/// Board size used by the default entry point.
pub const DEFAULT_SIZE: Coord2 = (15, 15);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mine_divisor: CellCount,
}

impl BoardConfig {
    pub fn new(size: Coord2) -> Result<Self> {
        Self::with_mine_divisor(size, DEFAULT_MINE_DIVISOR)
    }

    pub fn with_mine_divisor(size: Coord2, mine_divisor: CellCount) -> Result<Self> {
        let config = Self { size, mine_divisor };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mine_divisor == 0 {
            return Err(GameError::InvalidDensity);
        }
        if self.mine_count() >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn columns(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn mine_count(&self) -> CellCount {
        match self.mine_divisor {
            0 => 0,
            divisor => self.total_cells() / divisor,
        }
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            mine_divisor: DEFAULT_MINE_DIVISOR,
        }
    }
}

/// Where the mines are on a board, independent of any play state.
///
/// Serialized as the bare mine mask; deserializing re-derives the count and checks the dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, columns) = mine_mask.dim();
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidSize);
        }
        if rows > usize::from(Coord::MAX) || columns > usize::from(Coord::MAX) {
            return Err(GameError::InvalidLayout);
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        if mine_count >= mine_mask.len() {
            return Err(GameError::TooManyMines);
        }
        let mine_count = CellCount::try_from(mine_count).map_err(|_| GameError::InvalidLayout)?;

        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.mine_mask.dim();
        // bounded by `from_mine_mask`
        (rows as Coord, columns as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// Coordinates of every mine, row by row.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, column), _)| (row as Coord, column as Coord))
    }
}

impl TryFrom<Array2<bool>> for MineLayout {
    type Error = GameError;

    fn try_from(mine_mask: Array2<bool>) -> Result<Self> {
        Self::from_mine_mask(mine_mask)
    }
}

impl From<MineLayout> for Array2<bool> {
    fn from(layout: MineLayout) -> Self {
        layout.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// What a single `open` call did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
