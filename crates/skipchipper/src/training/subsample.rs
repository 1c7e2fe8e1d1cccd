//! # Frequent Token Subsampling

use rand::Rng;

use crate::{
    errors::SCResult,
    training::options::validate_threshold,
    types::{CountType, TokenType, token_index},
    vocab::FrequencyTable,
};

/// Per-id drop probabilities.
///
/// ``p_drop(w) = max(0, 1 - sqrt(t / f(w)))``; ids with relative frequency
/// ``f(w) <= t`` have a drop probability of exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    threshold: f64,
    probs: Vec<f64>,
}

impl DropTable {
    /// Compute the drop table.
    ///
    /// ## Arguments
    /// * `threshold` - the subsampling threshold `t`; must be positive.
    /// * `freqs` - the per-id frequency table.
    pub fn new<C: CountType>(
        threshold: f64,
        freqs: &FrequencyTable<C>,
    ) -> SCResult<Self> {
        validate_threshold(threshold)?;
        let probs = freqs
            .relative_frequencies()
            .into_iter()
            .map(|f| Self::drop_probability(threshold, f))
            .collect();
        Ok(Self { threshold, probs })
    }

    /// The drop probability for a relative frequency.
    pub fn drop_probability(
        threshold: f64,
        freq: f64,
    ) -> f64 {
        // f == 0 gives t/f == inf, clamped to 0 below.
        (1.0 - (threshold / freq).sqrt()).max(0.0)
    }

    /// The threshold the table was built with.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The drop probability of every id, indexed by id.
    pub fn probabilities(&self) -> &[f64] {
        &self.probs
    }

    /// The drop probability of `token`; zero for ids outside the table.
    pub fn get<T: TokenType>(
        &self,
        token: T,
    ) -> f64 {
        self.probs.get(token_index(token)).copied().unwrap_or(0.0)
    }
}

/// Randomly removes occurrences of high-frequency tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Subsampler {
    table: DropTable,
}

impl From<DropTable> for Subsampler {
    fn from(table: DropTable) -> Self {
        Self { table }
    }
}

impl Subsampler {
    /// Build a subsampler for a frequency table.
    pub fn new<C: CountType>(
        threshold: f64,
        freqs: &FrequencyTable<C>,
    ) -> SCResult<Self> {
        DropTable::new(threshold, freqs).map(Self::from)
    }

    /// The drop table.
    pub fn table(&self) -> &DropTable {
        &self.table
    }

    /// Subsample a token stream.
    ///
    /// Draws exactly one uniform ``u`` in ``[0, 1)`` per stream element, in
    /// stream order; an occurrence of `w` is kept iff ``u > p_drop(w)``.
    /// Ids with ``p_drop == 0`` are always kept.
    ///
    /// ## Returns
    /// The surviving tokens, in their original order.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, stream, rng)))]
    pub fn subsample<T, R>(
        &self,
        stream: &[T],
        rng: &mut R,
    ) -> Vec<T>
    where
        T: TokenType,
        R: Rng + ?Sized,
    {
        let mut kept = Vec::with_capacity(stream.len());
        for &token in stream {
            let u: f64 = rng.random();
            let p = self.table.get(token);
            if p <= 0.0 || u > p {
                kept.push(token);
            }
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::errors::SkipchipperError;

    #[test]
    fn test_drop_probability() {
        assert_eq!(DropTable::drop_probability(1e-5, 1e-5), 0.0);
        assert_eq!(DropTable::drop_probability(1e-5, 1e-6), 0.0);
        assert_eq!(DropTable::drop_probability(1e-5, 0.0), 0.0);

        let p = DropTable::drop_probability(1e-4, 4e-4);
        assert!((p - 0.5).abs() < 1e-12, "{p}");

        let p = DropTable::drop_probability(1e-5, 0.1);
        assert!((p - (1.0 - 1e-4f64.sqrt())).abs() < 1e-12, "{p}");
    }

    #[test]
    fn test_drop_table() {
        let freqs: FrequencyTable<u32> = FrequencyTable::from_counts(vec![90, 9, 1]);
        let table = DropTable::new(0.1, &freqs).unwrap();

        assert_eq!(table.threshold(), 0.1);
        assert_eq!(table.probabilities().len(), 3);
        assert!(table.get(0u32) > 0.6);
        assert_eq!(table.get(1u32), 0.0);
        assert_eq!(table.get(2u32), 0.0);
        assert_eq!(table.get(17u32), 0.0);
    }

    #[test]
    fn test_bad_threshold() {
        let freqs: FrequencyTable<u32> = FrequencyTable::from_counts(vec![1]);
        assert!(matches!(
            Subsampler::new(0.0, &freqs),
            Err(SkipchipperError::InvalidConfig {
                name: "subsample_threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_at_threshold_never_dropped() {
        // id 0 sits at exactly the threshold frequency.
        let freqs: FrequencyTable<u32> = FrequencyTable::from_counts(vec![1, 9_999]);
        let subsampler = Subsampler::new(1e-4, &freqs).unwrap();
        assert_eq!(subsampler.table().get(0u32), 0.0);

        let stream = vec![0u32; 10_000];
        let mut rng = StdRng::seed_from_u64(17);
        assert_eq!(subsampler.subsample(&stream, &mut rng), stream);
    }

    #[test]
    fn test_four_times_threshold_drops_half() {
        let freqs: FrequencyTable<u32> = FrequencyTable::from_counts(vec![4, 9_996]);
        let subsampler = Subsampler::new(1e-4, &freqs).unwrap();

        let stream = vec![0u32; 20_000];
        let mut rng = StdRng::seed_from_u64(42);
        let kept = subsampler.subsample(&stream, &mut rng);

        let drop_rate = 1.0 - kept.len() as f64 / stream.len() as f64;
        assert!((drop_rate - 0.5).abs() < 0.03, "drop rate {drop_rate}");
    }

    #[test]
    fn test_preserves_order_and_is_reproducible() {
        let freqs: FrequencyTable<u32> = FrequencyTable::from_counts(vec![500, 300, 150, 50]);
        let subsampler = Subsampler::new(0.1, &freqs).unwrap();

        let stream: Vec<u32> = (0..1000).map(|i| [0, 1, 0, 2, 0, 3, 1, 0][i % 8]).collect();

        let a = subsampler.subsample(&stream, &mut StdRng::seed_from_u64(3));
        let b = subsampler.subsample(&stream, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert!(a.len() < stream.len());

        // `a` is a subsequence of `stream`.
        let mut it = stream.iter();
        assert!(a.iter().all(|x| it.any(|y| y == x)));

        // id 3 is below threshold; every occurrence survives.
        let threes = |s: &[u32]| s.iter().filter(|&&t| t == 3).count();
        assert_eq!(threes(&a), threes(&stream));
    }

    #[test]
    fn test_one_draw_per_element() {
        let freqs: FrequencyTable<u32> = FrequencyTable::from_counts(vec![1, 1]);
        let subsampler = Subsampler::new(1.0, &freqs).unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        let _ = subsampler.subsample(&[0u32, 1, 0, 1, 1], &mut rng);
        let after: u64 = rng.random();

        let mut expected = StdRng::seed_from_u64(9);
        for _ in 0..5 {
            let _: f64 = expected.random();
        }
        assert_eq!(after, expected.random::<u64>());
    }
}
