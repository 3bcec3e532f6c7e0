//! Randomizer module - 7-bag piece supply
//!
//! Implements the "7-bag" randomization used by modern falling-block games.
//! Each bag holds one of each kind (O, I, T, L, J, S, Z), shuffled, and is
//! drawn until empty before a new bag is shuffled. This bounds both the repeat
//! gap and the drought length of any kind.
//!
//! The shuffle source is an explicitly seeded [`rand`] generator, so a seed
//! fully determines the sequence.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::{ShapeKind, ALL_SHAPES};

/// One shuffled cycle of the seven kinds
pub type Bag = ArrayVec<ShapeKind, 7>;

/// 7-bag piece supply
#[derive(Debug, Clone)]
pub struct Randomizer<R = StdRng> {
    /// Kinds left in the current cycle; drawn from the back
    bag: Bag,
    rng: R,
}

impl Randomizer<StdRng> {
    /// Create a supply with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a supply seeded from the OS entropy source
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> Randomizer<R> {
    /// Create a supply around any generator
    pub fn with_rng(rng: R) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng,
        }
    }

    /// Produce a fresh bag: each of the seven kinds exactly once, shuffled
    pub fn refill_bag(&mut self) -> Bag {
        let mut bag: Bag = ALL_SHAPES.into_iter().collect();
        bag.shuffle(&mut self.rng);
        bag
    }

    /// Draw the next kind, starting a new bag when the current one is spent
    pub fn next(&mut self) -> ShapeKind {
        if self.bag.is_empty() {
            self.bag = self.refill_bag();
        }
        match self.bag.pop() {
            Some(kind) => kind,
            None => unreachable!("a refilled bag holds seven kinds"),
        }
    }

    /// Throw away what is left of the current bag.
    ///
    /// The next draw starts a new cycle, so draws stay bag-aligned after a reset.
    pub fn discard_bag(&mut self) {
        self.bag.clear();
    }
}

impl Default for Randomizer<StdRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
