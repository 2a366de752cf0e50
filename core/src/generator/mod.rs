use crate::*;
pub use rejection::*;

mod rejection;

pub trait MinefieldGenerator {
    fn generate(self, config: BoardConfig) -> Result<MineLayout>;
}
