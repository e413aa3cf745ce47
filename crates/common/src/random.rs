//! Injectable random sources.
//!
//! Stock-outs, client balances and purchase amounts are all random draws.
//! Services take an `Arc<dyn RandomSource>` so tests can swap the thread RNG
//! for a seeded or scripted one.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource: Send + Sync {
    /// Returns a value uniformly drawn from `[0, upper)`, or 0 when `upper == 0`.
    fn below(&self, upper: u64) -> u64;

    /// Returns a value uniformly drawn from `[low, high)`, or `low` for an empty range.
    fn between(&self, low: u64, high: u64) -> u64 {
        low + self.below(high.saturating_sub(low))
    }
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Reproducible source for statistical tests.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..upper)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Each draw is reduced modulo the requested bound, so a script of `[0]`
/// always picks the first option.
#[derive(Debug)]
pub struct ScriptedRandom {
    draws: Mutex<VecDeque<u64>>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = u64>) -> Self {
        let mut draws: VecDeque<u64> = draws.into_iter().collect();
        if draws.is_empty() {
            draws.push_back(0);
        }
        Self {
            draws: Mutex::new(draws),
        }
    }

    /// A source that always returns the same value.
    pub fn constant(value: u64) -> Self {
        Self::new([value])
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&self, upper: u64) -> u64 {
        let mut draws = self.draws.lock().unwrap_or_else(|e| e.into_inner());
        let Some(next) = draws.pop_front() else {
            return 0;
        };
        draws.push_back(next);
        if upper == 0 { 0 } else { next % upper }
    }
}
