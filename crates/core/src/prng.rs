//! Seedable Xorshift64 generator used to scatter particles.
//!
//! The browser seeds it from `Math.random()`; tests and the CLI pass fixed
//! seeds so two fields built with the same seed are bit-identical.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is a fixed point of the algorithm and is replaced by a
/// non-zero fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a generator from `seed` (0 maps to the fallback seed).
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Creates a generator from a host-provided float in [0, 1), such as
    /// `Math.random()`. Out-of-range or non-finite input uses the fallback.
    pub fn from_unit_f64(value: f64) -> Self {
        if !value.is_finite() || !(0.0..1.0).contains(&value) {
            return Self::new(0);
        }
        Self::new((value * u64::MAX as f64) as u64)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform f64 in [-amplitude / 2, amplitude / 2).
    pub fn next_centered(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() - 0.5) * amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Changing this breaks reproducibility of every seeded field.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_is_replaced_by_fallback() {
        let mut zero = Xorshift64::new(0);
        let mut fallback = Xorshift64::new(Xorshift64::FALLBACK_SEED);
        assert_ne!(zero.next_u64(), 0);
        assert_eq!(zero.next_u64(), {
            fallback.next_u64();
            fallback.next_u64()
        });
    }

    #[test]
    fn from_unit_f64_rejects_out_of_range_input() {
        for bad in [f64::NAN, f64::INFINITY, -0.5, 1.0, 2.0] {
            let mut rng = Xorshift64::from_unit_f64(bad);
            let mut fallback = Xorshift64::new(0);
            assert_eq!(rng.next_u64(), fallback.next_u64(), "input {bad}");
        }
    }

    #[test]
    fn from_unit_f64_distinguishes_nearby_values() {
        let mut a = Xorshift64::from_unit_f64(0.25);
        let mut b = Xorshift64::from_unit_f64(0.26);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn same_seed_produces_identical_sequences() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
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
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v}");
                }
            }

            #[test]
            fn next_range_in_bounds_for_any_seed(
                seed: u64,
                min in -1e4_f64..1e4,
                span in 1e-3_f64..1e4,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, min + span);
                    prop_assert!(v >= min && v < min + span, "next_range = {v}");
                }
            }

            #[test]
            fn next_centered_is_symmetric_around_zero(
                seed: u64,
                amplitude in 1e-3_f64..100.0,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_centered(amplitude);
                    prop_assert!(v >= -amplitude / 2.0 && v < amplitude / 2.0, "v = {v}");
                }
            }
        }
    }
}
