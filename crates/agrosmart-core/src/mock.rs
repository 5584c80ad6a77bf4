//! Deterministic sampler for testing.
//!
//! [`ScriptedSampler`] replays a fixed list of values so that tests can
//! pin the outcome of otherwise random computations.
//!
//! # Example
//!
//! ```
//! use agrosmart_core::mock::ScriptedSampler;
//! use agrosmart_core::Sampler;
//!
//! let mut sampler = ScriptedSampler::new([0.9, 1.05, 80.0]);
//! assert_eq!(sampler.uniform(0.85, 1.15), 0.9);
//! assert_eq!(sampler.uniform(0.9, 1.1), 1.05);
//! assert_eq!(sampler.remaining(), 1);
//! ```

use std::collections::VecDeque;

use crate::sampler::Sampler;

/// A [`Sampler`] that returns scripted values in order.
///
/// - Values are clamped into the requested range.
/// - Once the script runs out, every draw returns the lower bound.
/// - For [`index`](Sampler::index) the value is truncated to an integer.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSampler {
    values: VecDeque<f64>,
    draws: usize,
}

impl ScriptedSampler {
    /// Create a sampler that will replay `values`.
    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
            draws: 0,
        }
    }

    /// Append a value to the script.
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    fn next(&mut self) -> Option<f64> {
        self.draws += 1;
        self.values.pop_front()
    }
}

impl Sampler for ScriptedSampler {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        match self.next() {
            Some(v) => v.max(low).min(high),
            None => low,
        }
    }

    fn integer(&mut self, low: i64, high: i64) -> i64 {
        match self.next() {
            Some(v) => (v.round() as i64).max(low).min(high),
            None => low,
        }
    }

    fn index(&mut self, len: usize) -> usize {
        match self.next() {
            Some(v) if len > 0 => (v.max(0.0) as usize).min(len - 1),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_replayed_in_order() {
        let mut sampler = ScriptedSampler::new([1.0, 2.0, 3.0]);
        assert_eq!(sampler.uniform(0.0, 10.0), 1.0);
        assert_eq!(sampler.integer(0, 10), 2);
        assert_eq!(sampler.index(5), 3);
        assert_eq!(sampler.draws(), 3);
    }

    #[test]
    fn test_values_clamped() {
        let mut sampler = ScriptedSampler::new([50.0, -4.0, 9.0]);
        assert_eq!(sampler.uniform(0.0, 10.0), 10.0);
        assert_eq!(sampler.integer(20, 30), 20);
        assert_eq!(sampler.index(4), 3);
    }

    #[test]
    fn test_exhausted_returns_low() {
        let mut sampler = ScriptedSampler::default();
        assert_eq!(sampler.uniform(78.0, 92.0), 78.0);
        assert_eq!(sampler.integer(20, 30), 20);
        assert_eq!(sampler.index(4), 0);
        assert_eq!(sampler.remaining(), 0);
    }

    #[test]
    fn test_push_extends_script() {
        let mut sampler = ScriptedSampler::new([1.0]);
        sampler.push(2.0);
        assert_eq!(sampler.remaining(), 2);
    }
}
