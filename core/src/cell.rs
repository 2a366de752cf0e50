use serde::{Deserialize, Serialize};

/// Player-facing visibility of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
    /// Set on every mine by the end-of-game sweep.
    FlaggedAsMine,
}

/// One grid position as stored by the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) mines_around: u8,
    pub(crate) visibility: Visibility,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn mines_around(self) -> u8 {
        self.mines_around
    }

    pub const fn visibility(self) -> Visibility {
        self.visibility
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    /// Render-safe view, which never tells whether a hidden cell holds a mine.
    pub const fn view(self) -> CellView {
        match self.visibility {
            Visibility::Hidden => CellView::Hidden,
            Visibility::Revealed => CellView::Revealed(self.mines_around),
            Visibility::FlaggedAsMine => CellView::Mine,
        }
    }
}

/// What a renderer is allowed to know about a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Revealed(u8),
    Mine,
}
