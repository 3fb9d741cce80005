//! RNG module - injectable random source for board layouts
//!
//! Target placement is the only randomised step in the puzzle. It goes
//! through the [`RandomSource`] trait so callers decide where randomness comes
//! from: [`SeededRng`] gives reproducible layouts from a `u64` seed, and
//! [`RngSource`] adapts any `rand` generator.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of randomness consumed by `Board::initialize`.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max). Returns 0 when `max` is 0.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

/// Deterministic RNG seeded from a `u64`.
///
/// Uses ChaCha8 so that the same seed yields the same layout on every
/// platform.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.inner.gen_range(0..max)
    }
}

/// Adapter exposing any `rand` generator as a [`RandomSource`].
///
/// ```
/// use tui_dice_core::rng::{RandomSource, RngSource};
///
/// let mut rng = RngSource(rand::thread_rng());
/// assert!(rng.next_range(6) < 6);
/// ```
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.0.gen_range(0..max)
    }
}
