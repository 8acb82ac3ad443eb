//! Uniform random placement of items onto empty cells.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use torus_snake_core::{CellCoord, CellKind};

use crate::grid::Grid;

/// Picks uniformly random empty cells for apples, power-ups and obstacles.
#[derive(Clone, Debug)]
pub struct ItemPlacer {
    rng: ChaCha8Rng,
}

impl ItemPlacer {
    /// Creates a placer whose placement sequence is fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a placer seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Restarts the placement sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Samples coordinates until an empty cell turns up, tags it with `kind`
    /// and returns it.
    ///
    /// Never returns when the grid has no empty cell left. Session
    /// configuration keeps a fresh arena below capacity, but a snake that
    /// grows to fill the remaining cells reaches this case.
    pub fn place_random(&mut self, grid: &mut Grid, kind: CellKind) -> CellCoord {
        let size = grid.size();
        loop {
            let x = self.rng.gen_range(0..size);
            let y = self.rng.gen_range(0..size);
            let cell = CellCoord::new(x, y);
            if grid.get(cell) != Ok(CellKind::Empty) {
                continue;
            }
            if grid.set(cell, kind).is_ok() {
                tracing::trace!(?kind, %cell, "placed item");
                return cell;
            }
        }
    }
}
