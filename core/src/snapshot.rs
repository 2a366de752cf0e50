use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Render-safe picture of a board: everything a front end needs, and no hidden mine positions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub state: GameState,
    pub mine_count: CellCount,
    pub hidden_safe_count: CellCount,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let mut cells: Array2<CellView> = Array2::default(size.to_nd_index());
        for (coords, cell) in board.iter_cells() {
            cells[coords.to_nd_index()] = cell.view();
        }

        Self {
            size,
            state: board.state(),
            mine_count: board.mine_count(),
            hidden_safe_count: board.hidden_safe_count(),
            cells,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellView> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }
}
