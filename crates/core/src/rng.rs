//! RNG module - deterministic piece generation
//!
//! Shapes and colors are drawn independently and uniformly, so the same shape
//! can show up in any color. A seeded LCG keeps games reproducible for tests
//! and replays.

use crate::pieces::Piece;
use crate::types::{Color, PieceKind};

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
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draws random pieces from the catalog
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw a piece at the spawn anchor with a random shape and color
    pub fn draw(&mut self) -> Piece {
        let kind = PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize];
        let index = self.rng.next_range(Color::COUNT as u32) as u8 + 1;
        // index is always in 1..=COUNT
        let color = Color::new(index).unwrap_or(Color::MIN);
        Piece::new(kind, color)
    }

    /// Current RNG state (seeds the next session on reset)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_generator_covers_all_kinds_and_colors() {
        let mut gen = PieceGenerator::new(42);
        let mut kinds = HashSet::new();
        let mut colors = HashSet::new();
        for _ in 0..500 {
            let p = gen.draw();
            kinds.insert(p.kind);
            colors.insert(p.color.index());
            assert_eq!((p.x, p.y), (4, 0));
        }
        assert_eq!(kinds.len(), 7);
        assert_eq!(colors.len(), 7);
        assert!(colors.iter().all(|&c| (1..=7).contains(&c)));
    }

    #[test]
    fn test_generator_is_reproducible() {
        let mut a = PieceGenerator::new(99);
        let mut b = PieceGenerator::new(99);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
