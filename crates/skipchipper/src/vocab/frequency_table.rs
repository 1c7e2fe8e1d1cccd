//! # Frequency Table

use crate::{
    errors::{SCResult, SkipchipperError},
    types::{CountType, TokenType, token_index},
};

/// Occurrence counts per vocabulary id.
///
/// Indexed by id; the relative frequency of an id is its count over the
/// total length of the token stream the counts were taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<C: CountType = u32> {
    counts: Vec<C>,
    total: u64,
}

impl<C: CountType> FrequencyTable<C> {
    /// Build a table from per-id counts.
    ///
    /// ## Arguments
    /// * `counts` - the count for each id, indexed by id.
    pub fn from_counts(counts: Vec<C>) -> Self {
        let total = counts.iter().map(|c| c.to_u64().unwrap_or(0)).sum();
        Self { counts, total }
    }

    /// Count a token stream.
    ///
    /// ## Arguments
    /// * `stream` - the token stream.
    /// * `vocab_size` - the number of ids in the vocabulary.
    ///
    /// ## Returns
    /// The table, or [`SkipchipperError::InvalidConfig`] if a token lies outside
    /// ``[0, vocab_size)``.
    pub fn from_token_stream<T: TokenType>(
        stream: &[T],
        vocab_size: usize,
    ) -> SCResult<Self> {
        let mut counts = vec![C::zero(); vocab_size];
        for &token in stream {
            let idx = token_index(token);
            let Some(slot) = counts.get_mut(idx) else {
                return Err(SkipchipperError::invalid_config(
                    "stream",
                    format!("token {token} is outside the vocabulary (size {vocab_size})"),
                ));
            };
            *slot += C::one();
        }
        Ok(Self::from_counts(counts))
    }

    /// The number of ids in the table.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The per-id counts.
    pub fn counts(&self) -> &[C] {
        &self.counts
    }

    /// The count for `token`; zero for ids outside the table.
    pub fn count<T: TokenType>(
        &self,
        token: T,
    ) -> C {
        self.counts
            .get(token_index(token))
            .copied()
            .unwrap_or_else(C::zero)
    }

    /// The total number of occurrences.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The relative frequency of `token`: ``count / total``.
    pub fn relative_frequency<T: TokenType>(
        &self,
        token: T,
    ) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(token).to_f64().unwrap_or(0.0) / self.total as f64
    }

    /// The relative frequency of every id, indexed by id.
    pub fn relative_frequencies(&self) -> Vec<f64> {
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|c| {
                if self.total == 0 {
                    0.0
                } else {
                    c.to_f64().unwrap_or(0.0) / total
                }
            })
            .collect()
    }
}
