use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot of everything a presenter needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub status: GameStatus,
    pub mines_remaining: i32,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_minefield(minefield: &Minefield) -> Self {
        let size = minefield.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            // shape comes from `size`, so both indices fit in `Coord`
            minefield.view_at((row as Coord, col as Coord))
        });

        Self {
            size,
            status: minefield.status(),
            mines_remaining: minefield.mines_remaining(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn hidden_count(&self) -> usize {
        self.cells.iter().filter(|view| view.is_covered()).count()
    }
}

impl From<&Minefield> for BoardView {
    fn from(minefield: &Minefield) -> Self {
        Self::from_minefield(minefield)
    }
}
