use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use types::*;
pub use view::*;

mod cell;
mod error;
mod generator;
mod minefield;
mod types;
mod view;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// 16x16 with 40 mines.
    pub const DEFAULT: Self = Self::new_unchecked((16, 16), 40);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a configuration, rejecting empty boards and mine counts outside
    /// `1..rows * cols`.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON settings blob such as `{"size":[9,9],"mines":10}`.
    pub fn from_json(json: &str) -> core::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 || self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: self.mines,
            });
        }
        Ok(())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row < self.size.0 && col < self.size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where the mines are, and nothing else.
///
/// Deserializing goes through [`MineLayout::from_mine_mask`], so a stored
/// `mine_count` that disagrees with the mask is rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutRepr")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct MineLayoutRepr {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<MineLayoutRepr> for MineLayout {
    type Error = GameError;

    fn try_from(repr: MineLayoutRepr) -> Result<Self> {
        let layout = Self::from_mine_mask(repr.mine_mask)?;
        if layout.mine_count != repr.mine_count {
            let (rows, cols) = layout.size();
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: repr.mine_count,
            });
        }
        Ok(layout)
    }
}

impl MineLayout {
    /// Only for generators that already hold a valid configuration.
    pub(crate) fn new_unchecked(mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let rows: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        let cols: Coord = cols.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .map_err(|_| GameError::InvalidBoardShape)?;

        GameConfig::new((rows, cols), mine_count)?;

        // standard layout keeps flat indices row-major
        let mine_mask = if mine_mask.is_standard_layout() {
            mine_mask
        } else {
            mine_mask.as_standard_layout().into_owned()
        };

        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    /// Builds a layout with mines at exactly `mine_coords`; duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds {
                    row: coords.0,
                    col: coords.1,
                });
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        // checked on construction
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        let cols = self.size().1;
        self.mine_mask
            .iter()
            .enumerate()
            .filter(|&(_, &is_mine)| is_mine)
            .map(move |(index, _)| types::from_flat_index(index, cols))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
    /// Every mine already has a flag; the cell was left hidden.
    NoFlagsRemaining,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        use MarkOutcome::*;
        match self {
            NoChange => false,
            Flagged => true,
            Unflagged => true,
            NoFlagsRemaining => false,
        }
    }
}

impl fmt::Display for MarkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoChange => "No change",
            Self::Flagged => "Flagged",
            Self::Unflagged => "Unflagged",
            Self::NoFlagsRemaining => "No marks left",
        })
    }
}

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
