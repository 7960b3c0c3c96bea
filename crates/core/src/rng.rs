//! RNG module - next-piece selection
//!
//! The next kind is drawn uniformly from the 7 kinds, excluding the kind that
//! currently sits in the "next" slot, which cuts down on back-to-back
//! duplicates without a full bag randomizer.
//!
//! Randomness comes through the [`PieceRng`] trait so sessions can run on the
//! seeded [`SimpleRng`] or, in tests, on a fixed `SequenceRng` script.

use crate::types::PieceKind;

/// Source of uniform random indices.
pub trait PieceRng {
    /// Generate random value in range [0, max). `max` is never 0.
    fn next_range(&mut self, max: u32) -> u32;
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
}

impl PieceRng for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of raw values, cycling when exhausted.
///
/// Each value is reduced modulo the requested range. Only built for tests and
/// with the `test-support` feature.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    pos: usize,
}

#[cfg(any(test, feature = "test-support"))]
impl SequenceRng {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, pos: 0 }
    }

    /// Script that makes [`next_kind`] return exactly `kinds`, in order.
    ///
    /// Consecutive entries must differ, and the first must differ from the
    /// kind that will be "previous" at the first draw (if any).
    ///
    /// # Panics
    ///
    /// Panics if `kinds` is empty or repeats a kind back to back.
    pub fn for_kinds(first_previous: Option<PieceKind>, kinds: &[PieceKind]) -> Self {
        let mut previous = first_previous;
        let mut values = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let value = match previous {
                None => kind.index() as u32,
                Some(prev) => {
                    assert_ne!(prev, kind, "consecutive kinds must differ");
                    if kind.index() > prev.index() {
                        kind.index() as u32 - 1
                    } else {
                        kind.index() as u32
                    }
                }
            };
            values.push(value);
            previous = Some(kind);
        }
        Self::new(values)
    }
}

#[cfg(any(test, feature = "test-support"))]
impl PieceRng for SequenceRng {
    fn next_range(&mut self, max: u32) -> u32 {
        let value = self.values[self.pos];
        self.pos = (self.pos + 1) % self.values.len();
        value % max
    }
}

/// Draw the next kind, never returning `previous`.
///
/// With a previous kind the draw is uniform over the other 6; without one it is
/// uniform over all 7.
pub fn next_kind(previous: Option<PieceKind>, rng: &mut impl PieceRng) -> PieceKind {
    match previous {
        None => PieceKind::ALL[rng.next_range(7) as usize],
        Some(prev) => {
            let mut idx = rng.next_range(6) as usize;
            if idx >= prev.index() {
                idx += 1;
            }
            PieceKind::ALL[idx]
        }
    }
}
