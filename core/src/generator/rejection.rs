use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Draws per placed mine after which placement is reported as unusually slow.
const SLOW_DRAWS_PER_MINE: u64 = 32;

/// Places mines by drawing a uniformly random row and column, re-drawing whenever the cell already holds a
/// mine, until the target count is reached.
///
/// The expected number of draws for the `k`-th mine is `total / (total - k + 1)`, so the sampler is cheap at
/// low densities but grows without bound as the density approaches 1. [`BoardConfig::validate`] keeps at
/// least one safe cell, which is enough for termination.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RejectionSampler {
    fn generate(self, config: BoardConfig) -> Result<MineLayout> {
        config.validate()?;

        let (rows, columns) = config.size;
        let mine_count = config.mine_count();
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut mines_placed: CellCount = 0;
        let mut draws: u64 = 0;
        let slow_after = u64::from(mine_count) * SLOW_DRAWS_PER_MINE;
        while mines_placed < mine_count {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..columns));
            draws += 1;
            if draws == slow_after {
                log::warn!(
                    "Mine placement is slow: {} draws for {} of {} mines on a {}x{} board",
                    draws,
                    mines_placed,
                    mine_count,
                    rows,
                    columns
                );
            }

            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }
        log::trace!("Placed {} mines in {} draws", mines_placed, draws);

        MineLayout::from_mine_mask(mine_mask)
    }
}
