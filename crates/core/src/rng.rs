//! RNG module - 7-bag piece supply
//!
//! Implements the "7-bag" randomizer: the pending queue is topped up with whole
//! shuffled permutations of the seven kinds whenever fewer than seven pieces
//! remain, so any seven consecutive draws from a fresh supply contain every
//! kind exactly once.
//!
//! The randomness source is injected, which keeps sessions reproducible from a
//! seed and lets tests script the shuffle.

use std::collections::VecDeque;

use crate::types::{PieceKind, BAG_SIZE};

/// Source of uniform random integers used to shuffle bags.
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. `bound` is never zero.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Shuffle a slice using Fisher-Yates
    ///
    /// Every permutation is equally likely as long as `next_below` is uniform.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (usable as a seed to replay from here)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    /// Multiply-shift with rejection: unbiased, and it draws on the high bits,
    /// which are the well-mixed ones in an LCG.
    fn next_below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bound must be positive");
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let m = u64::from(self.next_u32()) * u64::from(bound);
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }
}

/// 7-bag piece supply
#[derive(Debug, Clone)]
pub struct PieceSupply<R: RandomSource = SimpleRng> {
    /// Pending kinds, front is drawn next
    queue: VecDeque<PieceKind>,
    rng: R,
}

impl PieceSupply<SimpleRng> {
    /// Create a supply backed by a seeded [`SimpleRng`]
    pub fn from_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> PieceSupply<R> {
    /// Create a supply and fill it with the first bag
    pub fn new(rng: R) -> Self {
        let mut supply = Self {
            queue: VecDeque::with_capacity(BAG_SIZE * 2),
            rng,
        };
        supply.refill_if_needed();
        supply
    }

    /// Append shuffled bags until at least one full bag is pending
    pub fn refill_if_needed(&mut self) {
        while self.queue.len() < BAG_SIZE {
            let mut bag = PieceKind::ALL;
            self.rng.shuffle(&mut bag);
            self.queue.extend(bag);
        }
    }

    /// Draw the next piece kind (oldest queued first)
    pub fn next(&mut self) -> PieceKind {
        self.refill_if_needed();
        let kind = self.queue.pop_front();
        // The refill above guarantees at least one pending kind
        kind.unwrap_or(PieceKind::I)
    }

    /// Peek at up to `count` upcoming kinds without drawing them
    ///
    /// Returns fewer than `count` entries when fewer are pending.
    pub fn peek(&mut self, count: usize) -> Vec<PieceKind> {
        self.refill_if_needed();
        self.queue.iter().take(count).copied().collect()
    }

    /// Upcoming kinds currently pending, front first (no refill)
    pub fn pending(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    /// Drop everything pending and start over with a fresh bag
    pub fn reset(&mut self) {
        self.queue.clear();
        self.refill_if_needed();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

impl Default for PieceSupply<SimpleRng> {
    fn default() -> Self {
        Self::from_seed(1)
    }
}
