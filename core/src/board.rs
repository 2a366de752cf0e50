use std::collections::VecDeque;

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game: the grid, its mines and where the player stands.
///
/// Dimensions are fixed for the lifetime of the board; [`Board::restart`] lays out fresh mines on the same
/// grid. The only other mutation is [`Board::open`].
#[derive(Clone, Debug)]
pub struct Board {
    config: BoardConfig,
    rng: SmallRng,
    cells: Array2<Cell>,
    state: GameState,
    hidden_safe_count: CellCount,
}

impl Board {
    /// Board of the given size with the default mine density, seeded from the OS.
    pub fn new(rows: Coord, columns: Coord) -> Result<Self> {
        Self::with_config(BoardConfig::new((rows, columns))?)
    }

    pub fn with_config(config: BoardConfig) -> Result<Self> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Fully deterministic board: the first layout and every layout after a restart derive from `seed`.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut board = Self::empty(config, SmallRng::seed_from_u64(seed));
        board.lay_out_random_mines()?;
        Ok(board)
    }

    /// Board over a fixed mine layout. Restarting it falls back to random placement at the default density.
    pub fn from_layout(layout: MineLayout) -> Self {
        let config = BoardConfig {
            size: layout.size(),
            mine_divisor: DEFAULT_MINE_DIVISOR,
        };
        let mut board = Self::empty(config, SmallRng::seed_from_u64(rand::rng().random()));
        board.lay_out(&layout);
        board
    }

    fn empty(config: BoardConfig, rng: SmallRng) -> Self {
        Self {
            config,
            rng,
            cells: Array2::default(config.size.to_nd_index()),
            state: GameState::InProgress,
            hidden_safe_count: 0,
        }
    }

    /// Clears the board and places a fresh random set of mines, keeping the dimensions.
    ///
    /// On error the board is left untouched.
    pub fn restart(&mut self) -> Result<()> {
        self.lay_out_random_mines()
    }

    fn lay_out_random_mines(&mut self) -> Result<()> {
        let seed: u64 = self.rng.random();
        log::debug!(
            "Placing {} mines on a {}x{} board with seed {}",
            self.config.mine_count(),
            self.config.rows(),
            self.config.columns(),
            seed
        );
        let layout = RejectionSampler::new(seed).generate(self.config)?;
        self.lay_out(&layout);
        Ok(())
    }

    fn lay_out(&mut self, layout: &MineLayout) {
        self.cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, column)| {
            let coords = (row as Coord, column as Coord);
            Cell {
                is_mine: layout.contains_mine(coords),
                mines_around: layout.adjacent_mine_count(coords),
                visibility: Visibility::Hidden,
            }
        });
        self.hidden_safe_count =
            self.cells.iter().filter(|cell| !cell.is_mine).count() as CellCount;
        self.state = GameState::InProgress;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Size and density used by [`Board::restart`].
    ///
    /// For a board built with [`Board::from_layout`] this is the default density, so its
    /// [`BoardConfig::mine_count`] may differ from the current [`Board::mine_count`] until the next restart.
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn columns(&self) -> Coord {
        self.config.columns()
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine).count() as CellCount
    }

    /// Safe cells that are still hidden; the game is won when this reaches zero.
    pub fn hidden_safe_count(&self) -> CellCount {
        self.hidden_safe_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        if coords.0 < rows && coords.1 < columns {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Full cell state, including whether a hidden cell is a mine.
    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// What a renderer may show for the cell.
    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        self.cell(coords).map(Cell::view)
    }

    /// Opens a cell, flooding outwards through cells with no adjacent mines.
    ///
    /// Opening a cell that is already open, or any cell once the game is over, changes nothing.
    pub fn open(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() || !self.cells[coords.to_nd_index()].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.cells[coords.to_nd_index()].is_mine {
            log::debug!("Mine hit at {:?}", coords);
            self.end_game(GameState::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        let mut revealed: CellCount = 0;
        let mut worklist = VecDeque::from([coords]);
        while let Some(visit_coords) = worklist.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if !cell.is_hidden() {
                continue;
            }

            cell.visibility = Visibility::Revealed;
            self.hidden_safe_count -= 1;
            revealed += 1;

            if cell.mines_around == 0 {
                worklist.extend(self.cells.iter_neighbors(visit_coords));
            }
        }
        log::trace!("Opened {} cells from {:?}", revealed, coords);

        if self.hidden_safe_count == 0 {
            self.end_game(GameState::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    fn end_game(&mut self, state: GameState) {
        log::debug!("Game over: {:?}", state);
        self.state = state;
        self.show_mines();
    }

    fn show_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.visibility = Visibility::FlaggedAsMine;
        }
    }

    /// Cells row by row with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, column), &cell)| ((row as Coord, column as Coord), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn visibility(board: &Board, coords: Coord2) -> Visibility {
        board.cell(coords).unwrap().visibility()
    }

    #[test]
    fn new_board_places_one_mine_per_seven_cells() {
        let board = Board::new(15, 15).unwrap();
        assert_eq!(board.size(), (15, 15));
        assert_eq!(board.mine_count(), 32);
        assert_eq!(board.hidden_safe_count(), 225 - 32);
        assert_eq!(board.state(), GameState::InProgress);
        assert!(board.iter_cells().all(|(_, cell)| cell.is_hidden()));
    }

    #[test]
    fn numbered_cell_does_not_expand() {
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(board.open((0, 0)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(board.cell_at((0, 0)).unwrap(), CellView::Revealed(1));
        let revealed = board.iter_cells().filter(|(_, cell)| !cell.is_hidden()).count();
        assert_eq!(revealed, 1);
        assert_eq!(board.hidden_safe_count(), 7);
        assert_eq!(board.state(), GameState::InProgress);
    }

    #[test]
    fn single_cell_board_wins_immediately() {
        let mut board = Board::new(1, 1).unwrap();
        assert_eq!(board.mine_count(), 0);

        assert_eq!(board.open((0, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.state(), GameState::Won);
        assert_eq!(board.hidden_safe_count(), 0);
    }

    #[test]
    fn flood_fill_stops_at_numbered_ring() {
        // Mine column on the right, zero region on the left.
        let mut board = board((4, 5), &[(0, 4), (1, 4), (2, 4), (3, 4)]);

        assert_eq!(board.open((0, 0)).unwrap(), RevealOutcome::Won);
        for row in 0..4 {
            for column in 0..3 {
                assert_eq!(board.cell_at((row, column)).unwrap(), CellView::Revealed(0));
            }
            assert!(matches!(
                board.cell_at((row, 3)).unwrap(),
                CellView::Revealed(2 | 3)
            ));
            assert_eq!(board.cell_at((row, 4)).unwrap(), CellView::Mine);
        }
    }

    #[test]
    fn flood_fill_leaves_other_regions_hidden() {
        // A wall of mines splits the board; the far side must stay hidden.
        let mut board = board((3, 7), &[(0, 3), (1, 3), (2, 3)]);

        assert_eq!(board.open((1, 0)).unwrap(), RevealOutcome::Revealed);

        for row in 0..3 {
            assert_eq!(visibility(&board, (row, 0)), Visibility::Revealed);
            assert_eq!(visibility(&board, (row, 1)), Visibility::Revealed);
            assert_eq!(visibility(&board, (row, 2)), Visibility::Revealed);
            assert_eq!(visibility(&board, (row, 3)), Visibility::Hidden);
            for column in 4..7 {
                assert_eq!(visibility(&board, (row, column)), Visibility::Hidden);
            }
        }
        assert_eq!(board.hidden_safe_count(), 9);
    }

    #[test]
    fn opening_mine_loses_and_shows_all_mines() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);
        board.open((0, 1)).unwrap();

        assert_eq!(board.open((2, 2)).unwrap(), RevealOutcome::HitMine);

        assert_eq!(board.state(), GameState::Lost);
        assert_eq!(visibility(&board, (0, 0)), Visibility::FlaggedAsMine);
        assert_eq!(visibility(&board, (2, 2)), Visibility::FlaggedAsMine);
        assert_eq!(visibility(&board, (0, 1)), Visibility::Revealed);
        for coords in [(0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1)] {
            assert_eq!(visibility(&board, coords), Visibility::Hidden);
        }
        assert_eq!(board.hidden_safe_count(), 6);
    }

    #[test]
    fn winning_shows_mines() {
        let mut board = board((1, 3), &[(0, 0)]);

        assert_eq!(board.open((0, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.state(), GameState::Won);
        assert_eq!(board.cell_at((0, 0)).unwrap(), CellView::Mine);
        assert_eq!(board.cell_at((0, 1)).unwrap(), CellView::Revealed(1));
    }

    #[test]
    fn finished_game_ignores_opens() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.open((0, 0)).unwrap();
        let before = board.clone();

        assert_eq!(board.open((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.open((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.cells, before.cells);
        assert_eq!(board.state(), GameState::Lost);
    }

    #[test]
    fn repeated_open_is_noop() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.open((2, 2)).unwrap();
        let cells = board.cells.clone();

        assert_eq!(board.open((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.cells, cells);
        assert_eq!(board.hidden_safe_count(), 7);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut board = board((2, 3), &[]);
        assert_eq!(board.open((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.open((0, 3)), Err(GameError::InvalidCoords));
        assert_eq!(board.cell_at((5, 5)), Err(GameError::InvalidCoords));
        assert_eq!(board.hidden_safe_count(), 6);
    }

    #[test]
    fn hidden_mines_are_not_exposed_to_renderer() {
        let board = board((2, 2), &[(1, 1)]);
        assert!(board.cell((1, 1)).unwrap().is_mine());
        assert_eq!(board.cell_at((1, 1)).unwrap(), CellView::Hidden);
    }

    #[test]
    fn restart_keeps_size_and_resets_state() {
        let config = BoardConfig::new((8, 9)).unwrap();
        let mut board = Board::with_seed(config, 5).unwrap();
        let mine = board
            .iter_cells()
            .find(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
            .unwrap();
        board.open(mine).unwrap();
        assert_eq!(board.state(), GameState::Lost);

        board.restart().unwrap();

        assert_eq!(board.size(), (8, 9));
        assert_eq!(board.state(), GameState::InProgress);
        assert_eq!(board.mine_count(), 10);
        assert_eq!(board.hidden_safe_count(), 62);
        assert!(board.iter_cells().all(|(_, cell)| cell.is_hidden()));
    }

    #[test]
    fn restart_after_layout_uses_default_density() {
        let mut board = board((7, 2), &[(0, 0), (0, 1), (1, 0)]);
        assert_eq!(board.mine_count(), 3);

        board.restart().unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.hidden_safe_count(), 12);
    }

    #[test]
    fn layout_board_config_tracks_restart_density() {
        let mut board = board((7, 2), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(board.mine_count(), 4);
        assert_eq!(board.config().mine_count(), 2);

        assert_eq!(board.restart(), Ok(()));
        assert_eq!(board.mine_count(), board.config().mine_count());
    }

    #[test]
    fn deserialized_layout_can_be_won() {
        let json = r#"{"v":1,"dim":[2,2],"data":[true,false,false,false]}"#;
        let layout: MineLayout = serde_json::from_str(json).unwrap();
        let mut board = Board::from_layout(layout);
        assert_eq!(board.hidden_safe_count(), 3);

        for coords in [(0, 1), (1, 0), (1, 1)] {
            board.open(coords).unwrap();
        }

        assert_eq!(board.hidden_safe_count(), 0);
        assert_eq!(board.state(), GameState::Won);
    }

    #[test]
    fn seeded_boards_repeat() {
        let config = BoardConfig::default();
        let mut a = Board::with_seed(config, 99).unwrap();
        let mut b = Board::with_seed(config, 99).unwrap();
        assert_eq!(a.cells, b.cells);

        a.restart().unwrap();
        b.restart().unwrap();
        assert_eq!(a.cells, b.cells);
    }

    #[test]
    fn adjacency_counts_match_layout() {
        let board = board((3, 3), &[(0, 0), (0, 1), (2, 2)]);
        let counts: Vec<u8> = board.iter_cells().map(|(_, cell)| cell.mines_around()).collect();
        assert_eq!(counts, vec![1, 1, 1, 2, 3, 2, 0, 1, 0]);
    }
}
