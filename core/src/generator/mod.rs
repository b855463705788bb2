use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts for new games.
pub trait MinefieldGenerator {
    /// Places `config.mines` mines on a `config.size` board.
    ///
    /// Fails with [`GameError::InvalidConfiguration`] when `config` does not
    /// validate.
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
