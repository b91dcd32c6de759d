//! Branch randomness — the source of each validator's left/right choice.
//!
//! A session owns exactly one [`BranchSource`]. Production runs use
//! [`SeededBranchSource`]; tests swap in the scripted source from
//! `ffg-nullables` to control every round outcome.

use ffg_types::Branch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the binary choice a validator makes in a round.
pub trait BranchSource: Send {
    fn next_branch(&mut self) -> Branch;
}

/// Uniform left/right choices backed by a single [`StdRng`].
pub struct SeededBranchSource {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededBranchSource {
    /// Reproducible source: the same seed yields the same branch sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Source seeded from OS entropy, for runs without a configured seed.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Restart the branch sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = Some(seed);
    }

    /// The seed in use, or `None` when seeded from entropy.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl BranchSource for SeededBranchSource {
    fn next_branch(&mut self) -> Branch {
        Branch::from(self.rng.gen_bool(0.5))
    }
}
