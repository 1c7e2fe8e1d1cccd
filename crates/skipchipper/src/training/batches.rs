//! # Skip-Gram Batches

use core::{iter::FusedIterator, slice::ChunksExact};

use rand::Rng;

use crate::{
    errors::SCResult,
    training::{
        options::{validate_batch_size, validate_window_size},
        window::context_window,
    },
    types::TokenType,
};

/// A batch of ``(center, context)`` training rows.
///
/// `centers` and `contexts` always have the same length; row `i` is
/// ``(centers[i], contexts[i])``.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch<T: TokenType> {
    /// The center (input) ids.
    pub centers: Vec<T>,

    /// The context (label) ids.
    pub contexts: Vec<T>,
}

impl<T: TokenType> Batch<T> {
    /// Create an empty batch with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            centers: Vec::with_capacity(capacity),
            contexts: Vec::with_capacity(capacity),
        }
    }

    /// Append a row.
    pub fn push(
        &mut self,
        center: T,
        context: T,
    ) {
        self.centers.push(center);
        self.contexts.push(context);
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Iterate over ``(center, context)`` rows.
    pub fn rows(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.centers
            .iter()
            .copied()
            .zip(self.contexts.iter().copied())
    }
}

/// A lazy, single-epoch cursor over the batches of a training stream.
///
/// The stream is truncated to ``n_batches * batch_size`` tokens; the trailing
/// remainder is not used. Each contiguous `batch_size` chunk becomes one
/// [`Batch`]: for every position in the chunk, one [`context_window`] draw,
/// and one row per returned context id, in order.
///
/// Only one chunk's rows are materialized at a time. Build a fresh
/// iterator for each epoch. After the first error, the iterator is exhausted.
pub struct BatchIter<'a, T, R>
where
    T: TokenType,
    R: Rng,
{
    chunks: ChunksExact<'a, T>,
    window_size: usize,
    n_batches: usize,
    rng: R,
    failed: bool,
}

impl<'a, T, R> BatchIter<'a, T, R>
where
    T: TokenType,
    R: Rng,
{
    /// Create a batch iterator.
    ///
    /// ## Arguments
    /// * `stream` - the training stream.
    /// * `batch_size` - stream tokens per batch; must be ``>= 1``.
    /// * `window_size` - the maximum window reach; must be ``>= 1``.
    /// * `rng` - the random source; pass ``&mut rng`` to keep ownership.
    pub fn new(
        stream: &'a [T],
        batch_size: usize,
        window_size: usize,
        rng: R,
    ) -> SCResult<Self> {
        validate_batch_size(batch_size)?;
        validate_window_size(window_size)?;

        Ok(Self {
            chunks: stream.chunks_exact(batch_size),
            window_size,
            n_batches: stream.len() / batch_size,
            rng,
            failed: false,
        })
    }

    /// The total number of batches in the epoch.
    pub fn n_batches(&self) -> usize {
        self.n_batches
    }

    /// The trailing stream tokens that do not fill a batch.
    pub fn dropped(&self) -> &'a [T] {
        self.chunks.remainder()
    }

    fn build_batch(
        &mut self,
        chunk: &[T],
    ) -> SCResult<Batch<T>> {
        let mut batch = Batch::with_capacity(chunk.len() * self.window_size);
        for (ii, &center) in chunk.iter().enumerate() {
            for context in context_window(chunk, ii, self.window_size, &mut self.rng)? {
                batch.push(center, context);
            }
        }
        Ok(batch)
    }
}

impl<T, R> Iterator for BatchIter<'_, T, R>
where
    T: TokenType,
    R: Rng,
{
    type Item = SCResult<Batch<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let chunk = self.chunks.next()?;
        let result = self.build_batch(chunk);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.chunks.len()))
        }
    }
}

impl<T, R> FusedIterator for BatchIter<'_, T, R>
where
    T: TokenType,
    R: Rng,
{
}
