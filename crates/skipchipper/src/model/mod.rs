//! # Embedding Models
//!
//! The numeric side of skip-gram training sits behind [`SkipGramModel`]:
//! an embedding lookup plus a sampled loss over ``(center, context)`` rows.
//! Any array library can implement it; [`NegativeSamplingModel`] is a
//! plain CPU implementation trained with SGD.
//!
//! Nearest-neighbor diagnostics over the learned embeddings live in
//! [`nearest_neighbors`].

mod candidate_sampler;
mod embedding_matrix;
mod negative_sampling;
mod similarity;

use rand::Rng;

#[doc(inline)]
pub use candidate_sampler::LogUniformSampler;
#[doc(inline)]
pub use embedding_matrix::{EmbeddingMatrix, dot};
#[doc(inline)]
pub use negative_sampling::{
    DEFAULT_EMBEDDING_DIM,
    DEFAULT_LEARNING_RATE,
    DEFAULT_N_SAMPLED,
    ModelOptions,
    NegativeSamplingModel,
    embed_lookup,
    sampled_loss,
};
#[doc(inline)]
pub use similarity::{cosine_similarities, nearest_neighbors};

use crate::{errors::SCResult, training::Batch, types::TokenType};

/// A trainable skip-gram embedding model.
pub trait SkipGramModel<T: TokenType> {
    /// The number of rows in the embedding matrix.
    fn vocab_size(&self) -> usize;

    /// The embedding width.
    fn embedding_dim(&self) -> usize;

    /// The learned ``vocab_size x embedding_dim`` embedding matrix.
    fn embeddings(&self) -> &EmbeddingMatrix;

    /// Look up the embeddings of `ids`.
    fn embed_lookup(
        &self,
        ids: &[T],
    ) -> SCResult<EmbeddingMatrix>;

    /// The mean sampled loss of predicting `labels` from `inputs`,
    /// without updating the model.
    ///
    /// ## Arguments
    /// * `inputs` - one embedding row per label, usually from [`SkipGramModel::embed_lookup`].
    /// * `labels` - the true context ids.
    /// * `rng` - the random source for negative candidates.
    fn sampled_loss<R: Rng + ?Sized>(
        &self,
        inputs: &EmbeddingMatrix,
        labels: &[T],
        rng: &mut R,
    ) -> SCResult<f32>;

    /// Take one optimization step on `batch`.
    ///
    /// ## Returns
    /// The mean loss over the batch rows, measured before the update.
    fn train_step<R: Rng + ?Sized>(
        &mut self,
        batch: &Batch<T>,
        rng: &mut R,
    ) -> SCResult<f32>;
}
