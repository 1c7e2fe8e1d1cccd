//! # Log-Uniform Candidate Sampler
//!
//! Vocabulary ids are ranked by descending frequency, so a Zipfian
//! distribution over ids approximates the unigram distribution without a
//! lookup table:
//!
//! ```text
//! P(k) = (ln(k + 2) - ln(k + 1)) / ln(range + 1)
//! ```

use rand::Rng;

use crate::errors::{SCResult, SkipchipperError};

/// Samples negative candidates from ``[0, range)`` with a log-uniform distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogUniformSampler {
    range: usize,
    log_range: f64,
}

impl LogUniformSampler {
    /// Create a sampler over ``[0, range)``; `range` must be ``>= 1``.
    pub fn new(range: usize) -> SCResult<Self> {
        if range < 1 {
            return Err(SkipchipperError::invalid_config(
                "range",
                "must be >= 1",
            ));
        }
        Ok(Self {
            range,
            log_range: ((range + 1) as f64).ln(),
        })
    }

    /// The sampled range.
    pub fn range(&self) -> usize {
        self.range
    }

    /// The probability of drawing `k`.
    pub fn probability(
        &self,
        k: usize,
    ) -> f64 {
        if k >= self.range {
            return 0.0;
        }
        let k = k as f64;
        ((k + 2.0) / (k + 1.0)).ln() / self.log_range
    }

    /// Draw one candidate.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> usize {
        let u: f64 = rng.random();
        let k = ((u * self.log_range).exp() - 1.0) as usize;
        k.min(self.range - 1)
    }

    /// Draw `n` candidates, with replacement.
    pub fn sample_n<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_probabilities_sum_to_one() {
        let sampler = LogUniformSampler::new(50).unwrap();
        let total: f64 = (0..50).map(|k| sampler.probability(k)).sum();
        assert!((total - 1.0).abs() < 1e-9, "{total}");
        assert_eq!(sampler.probability(50), 0.0);
        assert!(sampler.probability(0) > sampler.probability(1));
    }

    #[test]
    fn test_bad_range() {
        assert!(LogUniformSampler::new(0).is_err());

        let one = LogUniformSampler::new(1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(one.sample_n(20, &mut rng).iter().all(|&k| k == 0));
    }

    #[test]
    fn test_empirical_distribution() {
        let sampler = LogUniformSampler::new(10).unwrap();
        let mut rng = StdRng::seed_from_u64(21);

        let n = 50_000;
        let mut hist = [0usize; 10];
        for k in sampler.sample_n(n, &mut rng) {
            hist[k] += 1;
        }
        for (k, &count) in hist.iter().enumerate() {
            let observed = count as f64 / n as f64;
            let expected = sampler.probability(k);
            assert!((observed - expected).abs() < 0.01, "k={k}: {observed} vs {expected}");
        }
    }
}
