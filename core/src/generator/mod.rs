use crate::*;
pub use reservoir::*;

mod reservoir;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
