//! Small deterministic pseudo-random source.
//!
//! A 16-bit linear congruential generator with the same constants and
//! byte-folding as `FastLED`'s `random8`/`random16`, so sparkle and flash
//! effects keep their familiar distribution on tiny targets.

const MULTIPLIER: u16 = 2053;
const INCREMENT: u16 = 13849;

#[derive(Debug, Clone)]
pub struct Random {
    seed: u16,
}

impl Random {
    /// Create a generator from a 64-bit seed (e.g. a hardware RNG sample)
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(seed: u64) -> Self {
        let folded = (seed ^ (seed >> 16) ^ (seed >> 32) ^ (seed >> 48)) as u16;
        Self { seed: folded }
    }

    pub fn random16(&mut self) -> u16 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.seed
    }

    pub fn random8(&mut self) -> u8 {
        let [lo, hi] = self.random16().to_le_bytes();
        lo.wrapping_add(hi)
    }

    /// Uniform value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    pub fn random8_below(&mut self, limit: u8) -> u8 {
        ((u16::from(self.random8()) * u16::from(limit)) >> 8) as u8
    }

    /// Uniform value in `min..max` (`min` when the range is empty)
    pub fn random8_range(&mut self, min: u8, max: u8) -> u8 {
        min + self.random8_below(max.saturating_sub(min))
    }

    /// Uniform value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    pub fn random16_below(&mut self, limit: u16) -> u16 {
        ((u32::from(self.random16()) * u32::from(limit)) >> 16) as u16
    }

    /// Uniform value in `min..max` (`min` when the range is empty)
    pub fn random16_range(&mut self, min: u16, max: u16) -> u16 {
        min + self.random16_below(max.saturating_sub(min))
    }

    /// Uniform index in `0..len` (0 when `len` is 0)
    pub fn index_below(&mut self, len: usize) -> usize {
        let limit = u16::try_from(len).unwrap_or(u16::MAX);
        usize::from(self.random16_below(limit))
    }
}
