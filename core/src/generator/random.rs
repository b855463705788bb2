use ndarray::Array2;

use super::*;

/// Draws positions from the thread-local CSPRNG so layouts cannot be predicted
/// from earlier games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SecureRandomGenerator;

impl MinefieldGenerator for SecureRandomGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        let mut rng = rand::rng();
        place_mines(config, |total_cells| rng.random_range(0..total_cells))
    }
}

/// Reproducible layouts: the same seed and configuration always yield the same
/// mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeededRandomGenerator {
    seed: u64,
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for SeededRandomGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        let mut rng = StdRng::seed_from_u64(self.seed);
        place_mines(config, |total_cells| rng.random_range(0..total_cells))
    }
}

/// Rejection sampling over flat row-major indices: draw, and draw again when
/// the position is already mined.
fn place_mines(config: GameConfig, mut draw: impl FnMut(usize) -> usize) -> Result<MineLayout> {
    if let Err(err) = config.validate() {
        log::warn!("Refusing to generate minefield: {}", err);
        return Err(err);
    }

    let total_cells = usize::from(config.total_cells());
    let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
    let mut mines_placed: CellCount = 0;
    let mut redraws = 0usize;

    {
        let cells = mines.as_slice_mut().ok_or(GameError::InvalidBoardShape)?;
        while mines_placed < config.mines {
            let position = draw(total_cells);
            if cells[position] {
                redraws += 1;
                continue;
            }
            cells[position] = true;
            mines_placed += 1;
            log::trace!(
                "Mine placed at {:?}",
                crate::types::from_flat_index(position, config.cols())
            );
        }
    }

    log::debug!(
        "Generated {}x{} minefield with {} mines ({} redraws)",
        config.rows(),
        config.cols(),
        mines_placed,
        redraws
    );
    Ok(MineLayout::new_unchecked(mines, mines_placed))
}
