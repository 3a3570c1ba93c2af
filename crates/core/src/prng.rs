//! Injectable randomness for particle initialization.
//!
//! Field activation draws positions, radii and velocities through the
//! [`RandomSource`] trait so hosts can pick their entropy and tests can
//! supply fixed sequences. [`Xorshift64`] is the default seedable source:
//! the same seed always produces the same sequence across all platforms.

use serde::{Deserialize, Serialize};

/// A source of uniformly distributed floats in [0, 1).
///
/// Object safe, so field activation takes `&mut dyn RandomSource`.
pub trait RandomSource {
    /// Returns the next value in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Returns a uniformly distributed f64 in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// Seedable xorshift64 generator (shifts 13, 7, 17).
///
/// Seed 0 is a fixed point of the recurrence and is swapped for
/// [`FALLBACK_SEED`](Self::FALLBACK_SEED).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { Self::FALLBACK_SEED } else { seed };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Xorshift64 {
    /// Top 53 bits over 2^53.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_first_value_for_seed_42() {
        // Saved field seeds depend on this sequence.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn zero_seed_uses_fallback_state() {
        let mut zero = Xorshift64::new(0);
        let mut fallback = Xorshift64::new(Xorshift64::FALLBACK_SEED);
        let drawn: Vec<u64> = (0..3).map(|_| zero.next_u64()).collect();
        assert!(drawn.iter().all(|&v| v != 0));
        assert_eq!(drawn[0], fallback.next_u64());
    }

    #[test]
    fn same_seed_same_particle_draws() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for _ in 0..500 {
            assert_eq!(a.next_range(0.0, 800.0).to_bits(), b.next_range(0.0, 800.0).to_bits());
        }
    }

    #[test]
    fn speed_draws_are_symmetric_around_zero() {
        let mut rng = Xorshift64::new(2024);
        let (mut neg, mut pos) = (0, 0);
        for _ in 0..10_000 {
            let v = rng.next_range(-0.25, 0.25);
            assert!((-0.25..0.25).contains(&v), "{v}");
            if v < 0.0 { neg += 1 } else { pos += 1 }
        }
        assert!(neg > 4_000 && pos > 4_000, "neg {neg} pos {pos}");
    }

    #[test]
    fn degenerate_range_returns_its_bound() {
        let mut rng = Xorshift64::new(5);
        assert_eq!(rng.next_range(3.0, 3.0), 3.0);
    }

    #[test]
    fn usable_as_trait_object() {
        let mut concrete = Xorshift64::new(31);
        let mut boxed: Box<dyn RandomSource> = Box::new(Xorshift64::new(31));
        for _ in 0..10 {
            assert_eq!(concrete.next_f64().to_bits(), boxed.next_f64().to_bits());
        }
    }

    #[test]
    fn resumes_from_serialized_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..200 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "{v} for seed {seed}");
                }
            }

            #[test]
            fn radius_draws_stay_in_range(seed: u64, lo in 0.0_f64..10.0, span in 0.01_f64..10.0) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let r = rng.next_range(lo, lo + span);
                    prop_assert!(r >= lo && r <= lo + span, "{r} outside [{lo}, {}]", lo + span);
                }
            }
        }
    }
}
