//! RNG module - deterministic candy generation
//!
//! Every random choice the board makes (initial fill and refills) is drawn
//! from a seeded LCG, so the same seed always reproduces the same game.
//! Refill draws can additionally be scripted, which replays and tests use to
//! force specific cascades.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::types::CandyKind;

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

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Pick a uniformly random element, `None` for an empty slice
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let i = self.next_range(items.len() as u32) as usize;
        items.get(i).copied()
    }

    /// Current internal state (restarting from it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of candy kinds for a board
///
/// Holds the active palette (3 to 6 kinds), the RNG, and an optional script of
/// kinds that refills consume before falling back to the RNG.
#[derive(Debug, Clone)]
pub struct CandyFeed {
    palette: ArrayVec<CandyKind, 6>,
    rng: SimpleRng,
    scripted: VecDeque<CandyKind>,
}

impl CandyFeed {
    /// Feed over the first `kinds` entries of [`CandyKind::ALL`]
    ///
    /// `kinds` is clamped to `1..=6`; callers validate the palette size.
    pub fn new(kinds: usize, seed: u32) -> Self {
        let kinds = kinds.clamp(1, CandyKind::ALL.len());
        Self {
            palette: CandyKind::ALL[..kinds].iter().copied().collect(),
            rng: SimpleRng::new(seed),
            scripted: VecDeque::new(),
        }
    }

    pub fn palette(&self) -> &[CandyKind] {
        &self.palette
    }

    /// Uniformly random kind from the palette
    pub fn random(&mut self) -> CandyKind {
        self.rng.pick(&self.palette).unwrap_or(CandyKind::Red)
    }

    /// Uniformly random kind from the palette minus `excluded`
    ///
    /// Returns `None` when every kind is excluded.
    pub fn random_excluding(&mut self, excluded: &[CandyKind]) -> Option<CandyKind> {
        let available: ArrayVec<CandyKind, 6> = self
            .palette
            .iter()
            .copied()
            .filter(|kind| !excluded.contains(kind))
            .collect();
        self.rng.pick(&available)
    }

    /// Next refill kind: scripted kinds first, then random
    pub fn draw(&mut self) -> CandyKind {
        match self.scripted.pop_front() {
            Some(kind) => kind,
            None => self.random(),
        }
    }

    /// Append kinds to the refill script
    pub fn queue<I: IntoIterator<Item = CandyKind>>(&mut self, kinds: I) {
        self.scripted.extend(kinds);
    }

    /// Number of scripted kinds not yet drawn
    pub fn scripted_len(&self) -> usize {
        self.scripted.len()
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for CandyFeed {
    fn default() -> Self {
        Self::new(CandyKind::ALL.len(), 1)
    }
}
