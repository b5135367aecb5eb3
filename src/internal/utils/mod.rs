use rand::{rngs::StdRng, Rng, SeedableRng};

mod node;

pub(crate) use node::{Link, Node, NodeArena, NodeId};

/// The head sentinel always occupies the first arena slot.
pub(crate) const HEAD: NodeId = NodeId(0);

/// The tail sentinel always occupies the second arena slot.
pub(crate) const TAIL: NodeId = NodeId(1);

/// Level count used by [Config::default](crate::Config::default).
pub const DEFAULT_MAX_LEVELS: usize = 1 << 4;

/// Largest level count a list accepts.
pub const LEVEL_LIMIT: usize = 1 << 6;

/// Samples the level a freshly inserted node is linked up to.
pub trait GeneratesLevel {
    /// Returns a level in `0..=max_level`.
    fn gen_level(&mut self, max_level: usize) -> usize;
}

/// Fair coin flips: the level is raised once per heads and sampling stops at
/// the first tails or at `max_level`, giving a geometric distribution with an
/// expected level of about one.
#[derive(Debug, Clone)]
pub struct CoinFlip<R = StdRng> {
    rng: R,
}

impl CoinFlip<StdRng> {
    pub fn from_entropy() -> Self {
        CoinFlip {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        CoinFlip {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> CoinFlip<R> {
    pub fn with_rng(rng: R) -> Self {
        CoinFlip { rng }
    }
}

impl<R: Rng> GeneratesLevel for CoinFlip<R> {
    fn gen_level(&mut self, max_level: usize) -> usize {
        let mut level = 0;

        while level < max_level && self.rng.gen_bool(0.5) {
            level += 1;
        }

        level
    }
}

impl<F> GeneratesLevel for F
where
    F: FnMut(usize) -> usize,
{
    fn gen_level(&mut self, max_level: usize) -> usize {
        core::cmp::min(self(max_level), max_level)
    }
}

#[cfg(test)]
mod utils_test {
    use super::*;

    #[test]
    fn test_coin_flip_bounds() {
        let mut gen = CoinFlip::seeded(17);

        for max_level in 1..8 {
            for _ in 0..1_000 {
                assert!(gen.gen_level(max_level) <= max_level);
            }
        }
    }

    #[test]
    fn test_coin_flip_is_reproducible() {
        let mut a = CoinFlip::seeded(99);
        let mut b = CoinFlip::seeded(99);

        let a = (0..256).map(|_| a.gen_level(16)).collect::<Vec<_>>();
        let b = (0..256).map(|_| b.gen_level(16)).collect::<Vec<_>>();

        assert_eq!(a, b);
    }

    #[test]
    fn test_coin_flip_distribution() {
        let mut gen = CoinFlip::seeded(3);
        let n = 100_000;
        let mut counts = [0usize; 17];

        for _ in 0..n {
            counts[gen.gen_level(16)] += 1;
        }

        let mean = counts
            .iter()
            .enumerate()
            .map(|(level, count)| level * count)
            .sum::<usize>() as f64
            / n as f64;

        println!("counts: {:?}, mean: {}", counts, mean);

        // geometric with p = 0.5: half the draws stay at level 0
        assert!((0.45..0.55).contains(&(counts[0] as f64 / n as f64)));
        assert!((0.9..1.1).contains(&mean));
    }

    #[test]
    fn test_closure_generator_is_clamped() {
        let mut always_high = |_max: usize| 100usize;

        assert_eq!(always_high.gen_level(4), 4);
    }
}
