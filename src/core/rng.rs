//! Seeded randomness for selection tie-breaks and rollouts.
//!
//! A search owns one `GameRng`. Each rollout forks a child stream from it,
//! so the number of draws a rollout makes never shifts the tie-break draws
//! of later selections.
//!
//! ```
//! use board_mcts::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut rollout = rng.fork();
//!
//! let mut replay = GameRng::new(42);
//! let mut replay_rollout = replay.fork();
//! assert_eq!(rollout.gen_range_usize(0..100), replay_rollout.gen_range_usize(0..100));
//! ```

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment spacing the seeds of successive forks.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream plus the bookkeeping needed to derive forks.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Derive the next independent stream. The n-th fork of a given seed is
    /// always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniform draw in `[0, 1)`.
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform index in `range`. Panics on an empty range, so callers check
    /// for zero legal moves first.
    pub fn gen_range_usize(&mut self, range: Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
