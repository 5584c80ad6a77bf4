//! Injectable randomness.
//!
//! Every simulated value in the service is drawn through the [`Sampler`]
//! trait so tests can substitute a deterministic source
//! ([`ScriptedSampler`](crate::mock::ScriptedSampler)) or a seeded
//! [`RandomSampler`].

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

/// Source of uniformly distributed values.
pub trait Sampler: Send {
    /// A float drawn uniformly from `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// An integer drawn uniformly from `[low, high]`.
    fn integer(&mut self, low: i64, high: i64) -> i64;

    /// An index drawn uniformly from `0..len`. Returns 0 when `len` is 0.
    fn index(&mut self, len: usize) -> usize;

    /// Pick one of `options` uniformly.
    ///
    /// `options` must not be empty.
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        debug_assert!(!options.is_empty());
        let i = self.index(options.len()).min(options.len().saturating_sub(1));
        options[i]
    }
}

/// A sampler shared between request handlers and providers.
pub type SharedSampler = Arc<Mutex<Box<dyn Sampler>>>;

/// Wrap `sampler` for sharing across tasks.
pub fn shared<S: Sampler + 'static>(sampler: S) -> SharedSampler {
    let boxed: Box<dyn Sampler> = Box::new(sampler);
    Arc::new(Mutex::new(boxed))
}

/// [`Sampler`] backed by `rand`'s standard generator.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// Seed from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sampler for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded if `seed` is given, OS-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl Sampler for RandomSampler {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn integer(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut sampler = RandomSampler::seeded(7);
        for _ in 0..1000 {
            let v = sampler.uniform(0.85, 1.15);
            assert!((0.85..=1.15).contains(&v));
        }
    }

    #[test]
    fn test_integer_inclusive_bounds_reached() {
        let mut sampler = RandomSampler::seeded(11);
        let draws: Vec<i64> = (0..2000).map(|_| sampler.integer(20, 30)).collect();
        assert!(draws.iter().all(|v| (20..=30).contains(v)));
        assert!(draws.contains(&20));
        assert!(draws.contains(&30));
    }

    #[test]
    fn test_degenerate_ranges() {
        let mut sampler = RandomSampler::seeded(1);
        assert_eq!(sampler.uniform(5.0, 5.0), 5.0);
        assert_eq!(sampler.integer(3, 3), 3);
        assert_eq!(sampler.index(0), 0);
        assert_eq!(sampler.index(1), 0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomSampler::seeded(42);
        let mut b = RandomSampler::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.uniform(0.0, 100.0), b.uniform(0.0, 100.0));
        }
    }

    #[test]
    fn test_choose_returns_member() {
        let options = ["Sunny", "Cloudy", "Light rain"];
        let mut sampler = RandomSampler::seeded(3);
        for _ in 0..50 {
            assert!(options.contains(&sampler.choose(&options)));
        }
    }

    #[tokio::test]
    async fn test_shared_sampler_locks() {
        let sampler = shared(RandomSampler::seeded(5));
        let value = sampler.lock().await.integer(1, 6);
        assert!((1..=6).contains(&value));
    }
}
