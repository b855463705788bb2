use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "In progress",
            Self::Won => "Game won",
            Self::Lost => "Game lost",
        })
    }
}

/// A single game of Minesweeper from the first reveal to a win or a loss.
///
/// All mutation goes through [`reveal`](Self::reveal) and
/// [`toggle_flag`](Self::toggle_flag). Once the status leaves
/// [`GameStatus::InProgress`] both become no-ops and the only way forward is
/// [`new_game`](Self::new_game).
///
/// Serialize only: a game cannot be loaded back.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Minefield {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Minefield {
    /// Starts a game with mines drawn from [`SecureRandomGenerator`].
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, SecureRandomGenerator)
    }

    pub fn with_generator(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let layout = generator.generate(config)?;
        Ok(Self::from_layout(&layout))
    }

    /// Starts a game on a fixed set of mines.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let config = layout.game_config();
        let mut cells: Array2<Cell> = Array2::default(config.size.to_nd_index());

        for mine in layout.iter_mines() {
            cells[mine.to_nd_index()].has_mine = true;
            for pos in cells.iter_neighbors(mine) {
                cells[pos.to_nd_index()].adjacent_mines += 1;
            }
        }

        log::debug!(
            "New game: {}x{} with {} mines",
            config.rows(),
            config.cols(),
            config.mines
        );

        Self {
            config,
            cells,
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::InProgress,
            triggered_mine: None,
        }
    }

    /// Replaces the current game with a freshly generated one.
    ///
    /// On error the current game is left untouched.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        self.new_game_with(config, SecureRandomGenerator)
    }

    pub fn new_game_with(
        &mut self,
        config: GameConfig,
        generator: impl MinefieldGenerator,
    ) -> Result<()> {
        *self = Self::with_generator(config, generator)?;
        Ok(())
    }

    /// New random game with the same dimensions and mine count.
    pub fn restart(&mut self) -> Result<()> {
        self.new_game(self.config)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Mines minus flags placed. Flagging is capped, so this never drops
    /// below zero.
    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// In-bounds neighbors of `coords`, in row-major order.
    pub fn neighbors(&self, coords: Coord2) -> Result<NeighborIter> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.cells.iter_neighbors(coords))
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.view_at(coords))
    }

    pub(crate) fn view_at(&self, coords: Coord2) -> CellView {
        use CellState::*;

        let cell = self.cells[coords.to_nd_index()];
        match (cell.state, cell.has_mine, self.status.is_finished()) {
            (Revealed, true, _) => CellView::TriggeredMine,
            (Revealed, false, _) => CellView::Revealed(cell.adjacent_mines),
            (Flagged, false, true) => CellView::Misflagged,
            (Flagged, _, _) => CellView::Flagged,
            (Hidden, true, true) => CellView::Mine,
            (Hidden, _, _) => CellView::Hidden,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.config.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(NoChange);
        }

        let mines_remaining = self.mines_remaining();
        let cell = &mut self.cells[coords.to_nd_index()];
        Ok(match cell.state {
            CellState::Hidden if mines_remaining > 0 => {
                cell.state = CellState::Flagged;
                self.flagged_count += 1;
                Flagged
            }
            CellState::Hidden => NoFlagsRemaining,
            CellState::Flagged => {
                cell.state = CellState::Hidden;
                self.flagged_count -= 1;
                Unflagged
            }
            CellState::Revealed => NoChange,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.has_mine {
            cell.state = CellState::Revealed;
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.flood_reveal(coords);
        log::trace!("Revealed {} cells from {:?}", opened, coords);

        if self.revealed_count == self.config.safe_cells() {
            self.end_game(GameStatus::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Reveals `start` and, through zero-count cells, everything connected to
    /// it. `start` must be a hidden safe cell.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened: CellCount = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            // revealed earlier in this walk, or flagged
            if !cell.is_hidden() {
                continue;
            }

            // a zero-count cell has no mined neighbors, so mines are never queued
            cell.state = CellState::Revealed;
            opened += 1;

            if cell.adjacent_mines == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    cells
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        self.revealed_count += opened;
        opened
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        log::debug!(
            "{} after revealing {} of {} safe cells",
            status,
            self.revealed_count,
            self.config.safe_cells()
        );
    }
}
