//! # Vocabulary Builder

use compact_str::CompactString;

use crate::{
    errors::{SCResult, SkipchipperError},
    types::{CountType, SCHashMap, StringChunkType, TokenType, hash_map_with_capacity},
    vocab::{FrequencyTable, WordVocab},
};

/// Options for [`VocabBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabBuilderOptions {
    /// Tokens seen fewer than `min_count` times are left out of the vocabulary.
    ///
    /// The default, ``1``, keeps every token.
    pub min_count: u64,
}

impl Default for VocabBuilderOptions {
    fn default() -> Self {
        Self { min_count: 1 }
    }
}

impl VocabBuilderOptions {
    /// Set the minimum count for a token to enter the vocabulary.
    pub fn with_min_count(
        self,
        min_count: u64,
    ) -> Self {
        Self { min_count }
    }

    /// Initializes a [`VocabBuilder`] from these options.
    pub fn init<K, C>(self) -> VocabBuilder<K, C>
    where
        K: StringChunkType,
        C: CountType,
    {
        VocabBuilder::new(self)
    }
}

/// Frequency-ranked vocabulary builder.
///
/// Counts tokens in first-seen order; [`VocabBuilder::build`] ranks them by
/// descending count, breaking ties by first appearance, so the same input
/// always yields the same ids.
///
/// # Parameters
/// * `K` - the type used to store tokens while counting.
/// * `C` - the type used to store counts.
#[derive(Debug, Clone)]
pub struct VocabBuilder<K = CompactString, C = u32>
where
    K: StringChunkType,
    C: CountType,
{
    /// The builder options.
    pub options: VocabBuilderOptions,

    /// Slot index of each token in `slots`.
    index: SCHashMap<K, usize>,

    /// ``(token, count)`` in first-seen order.
    slots: Vec<(K, C)>,
}

impl<K, C> Default for VocabBuilder<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    fn default() -> Self {
        Self::new(VocabBuilderOptions::default())
    }
}

impl<K, C> VocabBuilder<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Create a new builder.
    pub fn new(options: VocabBuilderOptions) -> Self {
        Self {
            options,
            index: hash_map_with_capacity(10_000),
            slots: Vec::with_capacity(10_000),
        }
    }

    /// The number of distinct tokens seen so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Has nothing been counted yet?
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The current count for `token`.
    pub fn count(
        &self,
        token: &str,
    ) -> C {
        self.index
            .get(token)
            .map(|&slot| self.slots[slot].1)
            .unwrap_or_else(C::zero)
    }

    /// Count a single token occurrence.
    pub fn update_from_token(
        &mut self,
        token: &str,
    ) {
        match self.index.get(token) {
            Some(&slot) => self.slots[slot].1 += C::one(),
            None => {
                let k: K = token.into();
                self.index.insert(k.clone(), self.slots.len());
                self.slots.push((k, C::one()));
            }
        }
    }

    /// Count a sequence of token occurrences.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens)))]
    pub fn update_from_tokens<I>(
        &mut self,
        tokens: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in tokens {
            self.update_from_token(token.as_ref());
        }
    }

    /// Count the whitespace-separated tokens of each sample.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            for token in sample.as_ref().split_whitespace() {
                self.update_from_token(token);
            }
        }
    }

    /// Rank the counted tokens into a vocabulary.
    ///
    /// ## Returns
    /// The ``(vocab, frequency table)`` pair; the table is indexed by id.
    ///
    /// Fails with [`SkipchipperError::EmptyInput`] if no token survives
    /// `min_count`; or [`SkipchipperError::InvalidConfig`] if the
    /// vocabulary does not fit in `T`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn build<T: TokenType>(self) -> SCResult<(WordVocab<T>, FrequencyTable<C>)> {
        let min_count = self.options.min_count;
        let observed = self.slots.len();

        let mut ranked: Vec<(K, C)> = self
            .slots
            .into_iter()
            .filter(|(_, c)| c.to_u64().unwrap_or(u64::MAX) >= min_count)
            .collect();

        if ranked.is_empty() {
            return Err(SkipchipperError::EmptyInput);
        }

        // Stable; ties keep first-seen order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        log::info!(
            "Built vocabulary: {} tokens ({} observed, min_count={})",
            ranked.len(),
            observed,
            min_count
        );

        let (tokens, counts): (Vec<K>, Vec<C>) = ranked.into_iter().unzip();
        let vocab = WordVocab::from_ranked_tokens(tokens)?;
        Ok((vocab, FrequencyTable::from_counts(counts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SCHashSet;

    fn build_from(tokens: &[&str]) -> SCResult<(WordVocab<u32>, FrequencyTable<u32>)> {
        let mut builder: VocabBuilder = VocabBuilder::default();
        builder.update_from_tokens(tokens);
        builder.build()
    }

    #[test]
    fn test_ranked_by_frequency() {
        let (vocab, freqs) = build_from(&["b", "a", "c", "a", "b", "a"]).unwrap();

        assert_eq!(vocab.tokens().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(freqs.counts(), &[3, 2, 1]);
        assert_eq!(freqs.total(), 6);
    }

    #[test]
    fn test_ties_break_by_first_seen() {
        let (vocab, _) = build_from(&["z", "y", "x", "y", "z", "x"]).unwrap();
        assert_eq!(vocab.tokens().collect::<Vec<_>>(), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_empty_input() {
        let err = build_from(&[]).unwrap_err();
        assert!(matches!(err, SkipchipperError::EmptyInput));
    }

    #[test]
    fn test_min_count() {
        let mut builder: VocabBuilder<String, u64> =
            VocabBuilderOptions::default().with_min_count(2).init();
        builder.update_from_samples(["a b a c", "b d a"]);

        assert_eq!(builder.len(), 4);
        assert_eq!(builder.count("a"), 3);
        assert_eq!(builder.count("q"), 0);

        let (vocab, freqs) = builder.build::<u16>().unwrap();
        assert_eq!(vocab.tokens().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(freqs.counts(), &[3, 2]);

        let mut builder: VocabBuilder<String, u64> =
            VocabBuilderOptions::default().with_min_count(5).init();
        builder.update_from_samples(["a b a c"]);
        assert!(matches!(
            builder.build::<u16>(),
            Err(SkipchipperError::EmptyInput)
        ));
    }

    #[test]
    fn test_deterministic() {
        let tokens = ["to", "be", "or", "not", "to", "be", "that", "is"];
        let (a, fa) = build_from(&tokens).unwrap();
        let (b, fb) = build_from(&tokens).unwrap();
        assert_eq!(a, b);
        assert_eq!(fa, fb);
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(200))]

        #[test]
        fn prop_vocab_is_frequency_ranked_bijection(
            tokens in proptest::collection::vec("[a-f]{1,2}", 1..200)
        ) {
            let refs: Vec<&str> = tokens.iter().map(|s| s.as_str()).collect();
            let (vocab, freqs) = build_from(&refs).unwrap();

            let distinct: SCHashSet<&str> = refs.iter().copied().collect();
            proptest::prop_assert_eq!(vocab.len(), distinct.len());
            proptest::prop_assert_eq!(freqs.total(), refs.len() as u64);

            for (id, token) in vocab.iter() {
                proptest::prop_assert_eq!(vocab.token_to_id(token), Some(id));
                let expected = refs.iter().filter(|&&t| t == token).count() as u32;
                proptest::prop_assert_eq!(freqs.count(id), expected);
            }

            let counts = freqs.counts();
            proptest::prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));

            let max = *counts.iter().max().unwrap();
            proptest::prop_assert_eq!(counts[0], max);
        }
    }
}
