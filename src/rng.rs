//! Random draws used by the simulation.
//!
//! Every decision in a tick is a uniform draw compared against a constant, so
//! the engine only needs floats in `[0, 1)`. Systems take `&mut dyn RandomSource`
//! which lets tests replay a fixed sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let scaled = (self.next_f64() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }

    /// `+1` or `-1` with equal probability.
    fn step(&mut self) -> i64 {
        if self.next_f64() > 0.5 {
            1
        } else {
            -1
        }
    }
}

/// Entropy-seeded generator used by the binary.
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl From<ChaCha8Rng> for SimRng {
    fn from(inner: ChaCha8Rng) -> Self {
        Self { inner }
    }
}

impl RandomSource for SimRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted random needs at least one value");
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_values_wrap_around() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn pick_index_stays_in_range() {
        let mut low = ScriptedRandom::constant(0.0);
        let mut high = ScriptedRandom::constant(0.999_999);
        assert_eq!(low.pick_index(32), 0);
        assert_eq!(high.pick_index(32), 31);
        assert_eq!(high.pick_index(1), 0);
    }

    #[test]
    fn chance_is_strict() {
        let mut rng = ScriptedRandom::constant(0.5);
        assert!(!rng.chance(0.5));
        assert!(rng.chance(0.51));
        assert!(!ScriptedRandom::constant(0.0).chance(0.0));
    }

    #[test]
    fn step_follows_midpoint() {
        assert_eq!(ScriptedRandom::constant(0.7).step(), 1);
        assert_eq!(ScriptedRandom::constant(0.2).step(), -1);
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = SimRng::from(ChaCha8Rng::seed_from_u64(42));
        let mut b = SimRng::from(ChaCha8Rng::seed_from_u64(42));
        for _ in 0..16 {
            let value = a.next_f64();
            assert_eq!(value, b.next_f64());
            assert!((0.0..1.0).contains(&value));
        }
    }
}
