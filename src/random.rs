//! Random helpers shared by the generators.
//!
//! Every generator takes `&mut impl Rng` so callers choose between the
//! thread-local RNG and a seeded `ChaCha8Rng`. The [`RandomSource`]
//! extension trait adds the forgiving range helpers the drawing code leans
//! on: inverted or empty ranges never panic.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A table entry with a relative weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weighted<T> {
    pub value: T,
    pub weight: u32,
}

/// Shorthand for building weighted tables in `const` context.
pub const fn w<T>(value: T, weight: u32) -> Weighted<T> {
    Weighted { value, weight }
}

pub trait RandomSource: Rng {
    /// Uniform float in `[min, max)`. Returns `min` when the range is empty.
    fn float(&mut self, min: f64, max: f64) -> f64 {
        min + self.gen::<f64>() * (max - min)
    }

    /// Uniform integer in `[min, max]`. Returns `min` when `max <= min`.
    fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.gen::<f64>() < probability
    }

    /// -1 or +1 with equal probability.
    fn sign(&mut self) -> i32 {
        if self.gen_bool(0.5) { 1 } else { -1 }
    }

    /// Symmetric jitter in `[-half_span, half_span)`.
    fn jitter(&mut self, half_span: f64) -> f64 {
        (self.gen::<f64>() - 0.5) * 2.0 * half_span
    }

    fn choose_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(self)
    }

    /// Weighted pick. Zero total weight falls back to the last entry.
    fn choose_weighted<'a, T>(&mut self, items: &'a [Weighted<T>]) -> Option<&'a T> {
        let total: u32 = items.iter().map(|item| item.weight).sum();
        if total == 0 {
            return items.last().map(|item| &item.value);
        }
        let mut roll = self.gen_range(0..total);
        for item in items {
            if roll < item.weight {
                return Some(&item.value);
            }
            roll -= item.weight;
        }
        items.last().map(|item| &item.value)
    }

    /// Up to `count` distinct entries in random order.
    fn choose_unique<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        items
            .choose_multiple(self, count.min(items.len()))
            .cloned()
            .collect()
    }
}

impl<R: Rng + ?Sized> RandomSource for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_int_inclusive_and_inverted() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let v = rng.int(2, 4);
            assert!((2..=4).contains(&v));
            seen_min |= v == 2;
            seen_max |= v == 4;
        }
        assert!(seen_min && seen_max);
        assert_eq!(rng.int(5, 3), 5);
        assert_eq!(rng.int(3, 3), 3);
    }

    #[test]
    fn test_float_degenerate_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(rng.float(0.5, 0.5), 0.5);
        for _ in 0..100 {
            let v = rng.float(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
    }

    #[test]
    fn test_weighted_respects_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let table = [w("never", 0), w("always", 5)];
        for _ in 0..100 {
            assert_eq!(rng.choose_weighted(&table), Some(&"always"));
        }
        let empty: [Weighted<&str>; 0] = [];
        assert_eq!(rng.choose_weighted(&empty), None);
    }

    #[test]
    fn test_choose_unique_has_no_duplicates() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let items = ["a", "b", "c", "d"];
        let picked = rng.choose_unique(&items, 3);
        assert_eq!(picked.len(), 3);
        for (i, a) in picked.iter().enumerate() {
            assert!(!picked[i + 1..].contains(a));
        }
        assert_eq!(rng.choose_unique(&items, 10).len(), 4);
    }
}
