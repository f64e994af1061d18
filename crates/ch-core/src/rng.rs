//! Random number generation and deterministic hashing
//!
//! Uses a seeded ChaCha RNG for reproducibility. The RNG stream is consumed
//! during dungeon generation only; runtime decisions that must replay
//! identically (corridor offsets, damage rolls) go through the pure hash
//! functions below instead.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible generation. Only the seed is
/// serialized; deserializing recreates a fresh stream from it.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1, or 0 if n is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns 1..=n, or 0 if n is 0
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }

    /// Inclusive integer range; returns `lo` when the range is degenerate
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        lo + self.rn2((hi - lo + 1) as u32) as i32
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len() as u32) as usize])
        }
    }
}

/// Mix a list of integers into a hash, for structural "pseudo-random"
/// choices that must be a pure function of geometry rather than an RNG
/// draw. Plain wrapping arithmetic; no dependence on a particular overflow
/// behavior.
pub fn geometry_hash(values: &[i32]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for &v in values {
        h ^= (v as i64) as u64;
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
        h ^= h >> 29;
    }
    h
}

/// Deterministic sample from an inclusive range keyed by two seeds.
/// Identical seeds always yield the identical value; used for damage rolls
/// so replays reproduce combat exactly.
pub fn sample_in_range(seed_a: u64, seed_b: u64, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        return lo;
    }
    let mut z = seed_a
        .wrapping_mul(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(seed_b.rotate_left(31));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    let span = (hi - lo + 1) as u64;
    lo + (z % span) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            assert!(rng.rn2(10) < 10);
        }
    }

    #[test]
    fn test_range_inclusive() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(-3, 3);
            assert!((-3..=3).contains(&v));
        }
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.range(5, 2), 5);
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);
        for _ in 0..100 {
            assert_eq!(rng1.rn2(100), rng2.rn2(100));
        }
    }

    #[test]
    fn test_zero_inputs() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.rn2(0), 0);
        assert_eq!(rng.rnd(0), 0);
    }

    #[test]
    fn test_serde_carries_only_the_seed() {
        let mut rng = GameRng::new(9);
        rng.rn2(100);

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();

        // The restored stream restarts from the seed, not from where the
        // original left off.
        assert_eq!(restored.seed(), 9);
        let mut fresh = GameRng::new(9);
        assert_eq!(restored.rn2(1000), fresh.rn2(1000));
    }

    #[test]
    fn test_geometry_hash_is_stable() {
        let a = geometry_hash(&[3, 4, 10, 6]);
        let b = geometry_hash(&[3, 4, 10, 6]);
        assert_eq!(a, b);
        assert_ne!(a, geometry_hash(&[4, 3, 10, 6]));
    }

    #[test]
    fn test_sample_in_range_bounds_and_determinism() {
        for s in 0..200u64 {
            let v = sample_in_range(s, s.wrapping_mul(7), 2, 8);
            assert!((2..=8).contains(&v));
            assert_eq!(v, sample_in_range(s, s.wrapping_mul(7), 2, 8));
        }
        assert_eq!(sample_in_range(1, 2, 5, 5), 5);
    }

    #[test]
    fn test_sample_in_range_covers_span() {
        // A handful of seeds should between them hit every value of a
        // small range.
        let mut seen = [false; 7];
        for s in 0..64u64 {
            let v = sample_in_range(s, 999, 2, 8);
            seen[(v - 2) as usize] = true;
        }
        assert!(seen.iter().all(|&b| b));
    }
}
