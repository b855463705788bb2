use serde::{Deserialize, Serialize};

/// Player-facing state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// Everything the board knows about one cell.
///
/// `has_mine` and `adjacent_mines` are fixed once the board is generated; only
/// `state` changes during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub has_mine: bool,
    pub adjacent_mines: u8,
    pub state: CellState,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }
}

/// What a presenter should draw for a cell.
///
/// While a game is in progress only `Hidden`, `Flagged` and `Revealed` occur.
/// After it ends the mines are disclosed: the one that was stepped on, the ones
/// still covered, and flags that were wrong.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    TriggeredMine,
    Mine,
    Misflagged,
}

impl CellView {
    /// Whether the cell is still covered on screen.
    pub const fn is_covered(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            TriggeredMine => false,
            Mine => false,
            Misflagged => true,
        }
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}
