//! # Skip-Gram Dataset

use compact_str::CompactString;
use rand::Rng;

use crate::{
    errors::{SCResult, SkipchipperError},
    training::{BatchIter, SkipGramOptions, Subsampler},
    types::{CountType, TokenType},
    vocab::{FrequencyTable, VocabBuilder, WordVocab},
};

/// The prepared inputs for skip-gram training.
///
/// Holds the vocabulary, the full token stream, its frequency table, and
/// the subsampled training stream that epochs are drawn from.
///
/// # Parameters
/// * `T` - the vocabulary id type.
/// * `C` - the count type of the frequency table.
#[derive(Debug, Clone)]
pub struct SkipGramDataset<T: TokenType = u32, C: CountType = u32> {
    options: SkipGramOptions,
    vocab: WordVocab<T>,
    freqs: FrequencyTable<C>,
    token_stream: Vec<T>,
    train_stream: Vec<T>,
}

impl<T: TokenType, C: CountType> SkipGramDataset<T, C> {
    /// Build a dataset from raw tokens.
    ///
    /// Every distinct token enters the vocabulary; frequency filtering is
    /// expected to happen upstream (or use [`SkipGramDataset::from_token_stream`]).
    ///
    /// ## Arguments
    /// * `tokens` - the raw token sequence, in corpus order.
    /// * `options` - the pipeline options.
    /// * `rng` - the random source for subsampling.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(tokens, rng)))]
    pub fn from_tokens<S, R>(
        tokens: &[S],
        options: SkipGramOptions,
        rng: &mut R,
    ) -> SCResult<Self>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        options.validate()?;

        let mut builder: VocabBuilder<CompactString, C> = VocabBuilder::default();
        builder.update_from_tokens(tokens);
        let (vocab, freqs) = builder.build::<T>()?;

        let token_stream = vocab.encode(tokens)?;
        Self::from_parts(options, vocab, freqs, token_stream, rng)
    }

    /// Build a dataset from an already encoded token stream.
    ///
    /// ## Arguments
    /// * `vocab` - the vocabulary the stream was encoded with.
    /// * `token_stream` - the encoded corpus.
    /// * `options` - the pipeline options.
    /// * `rng` - the random source for subsampling.
    pub fn from_token_stream<R>(
        vocab: WordVocab<T>,
        token_stream: Vec<T>,
        options: SkipGramOptions,
        rng: &mut R,
    ) -> SCResult<Self>
    where
        R: Rng + ?Sized,
    {
        options.validate()?;
        if token_stream.is_empty() {
            return Err(SkipchipperError::EmptyInput);
        }
        let freqs = FrequencyTable::from_token_stream(&token_stream, vocab.len())?;
        Self::from_parts(options, vocab, freqs, token_stream, rng)
    }

    fn from_parts<R>(
        options: SkipGramOptions,
        vocab: WordVocab<T>,
        freqs: FrequencyTable<C>,
        token_stream: Vec<T>,
        rng: &mut R,
    ) -> SCResult<Self>
    where
        R: Rng + ?Sized,
    {
        let subsampler = Subsampler::new(options.subsample_threshold, &freqs)?;
        let train_stream = subsampler.subsample(&token_stream, rng);

        log::info!(
            "Subsampled token stream: {} -> {} tokens (threshold={:e}, vocab={})",
            token_stream.len(),
            train_stream.len(),
            options.subsample_threshold,
            vocab.len()
        );
        if train_stream.len() < options.batch_size {
            log::warn!(
                "Training stream ({} tokens) is shorter than one batch ({}); epochs will be empty",
                train_stream.len(),
                options.batch_size
            );
        }

        Ok(Self {
            options,
            vocab,
            freqs,
            token_stream,
            train_stream,
        })
    }

    /// The pipeline options.
    pub fn options(&self) -> &SkipGramOptions {
        &self.options
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &WordVocab<T> {
        &self.vocab
    }

    /// The frequency table of the full token stream.
    pub fn frequencies(&self) -> &FrequencyTable<C> {
        &self.freqs
    }

    /// The full (pre-subsampling) token stream.
    pub fn token_stream(&self) -> &[T] {
        &self.token_stream
    }

    /// The subsampled training stream.
    pub fn train_stream(&self) -> &[T] {
        &self.train_stream
    }

    /// The number of batches in each epoch.
    pub fn n_batches(&self) -> usize {
        self.train_stream.len() / self.options.batch_size
    }

    /// Start an epoch.
    ///
    /// ## Arguments
    /// * `rng` - the random source for window draws; pass ``&mut rng``.
    pub fn epoch_batches<R: Rng>(
        &self,
        rng: R,
    ) -> SCResult<BatchIter<'_, T, R>> {
        BatchIter::new(
            &self.train_stream,
            self.options.batch_size,
            self.options.window_size,
            rng,
        )
    }
}
