#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;
use std::cell::RefCell;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max].
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Picks an index from `0..size` uniformly. Returns zero for empty or singleton ranges.
    fn pick_index(&self, size: usize) -> usize {
        if size < 2 { 0 } else { self.uniform_int(0, size as i32 - 1) as usize }
    }
}

/// A default random implementation backed by a seeded small rng, so that the same seed always
/// produces the same sequence.
pub struct DefaultRandom {
    rng: RefCell<SmallRng>,
}

impl DefaultRandom {
    /// Creates an instance of `DefaultRandom` with the given seed.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { rng: RefCell::new(SmallRng::seed_from_u64(seed)) }
    }

    /// Creates an instance of `DefaultRandom` with a fixed seed.
    pub fn new_repeatable() -> Self {
        Self::new_with_seed(0)
    }
}

impl Default for DefaultRandom {
    fn default() -> Self {
        Self::new_repeatable()
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        self.rng.borrow_mut().gen_range(min..max + 1)
    }
}
