//! # Negative Sampling Model

use rand::Rng;

use crate::{
    errors::{SCResult, SkipchipperError},
    model::{EmbeddingMatrix, LogUniformSampler, SkipGramModel, dot},
    training::Batch,
    types::{TokenType, token_index},
};

/// Default embedding width.
pub const DEFAULT_EMBEDDING_DIM: usize = 200;

/// Default number of negative candidates per batch.
pub const DEFAULT_N_SAMPLED: usize = 100;

/// Default SGD learning rate.
pub const DEFAULT_LEARNING_RATE: f32 = 0.025;

/// Options for [`NegativeSamplingModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    /// The embedding width.
    pub embedding_dim: usize,

    /// The number of negative candidates drawn per batch.
    pub n_sampled: usize,

    /// The SGD learning rate.
    pub learning_rate: f32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            n_sampled: DEFAULT_N_SAMPLED,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

impl ModelOptions {
    /// Sets the embedding width.
    pub fn with_embedding_dim(
        self,
        embedding_dim: usize,
    ) -> Self {
        Self {
            embedding_dim,
            ..self
        }
    }

    /// Sets the number of negative candidates per batch.
    pub fn with_n_sampled(
        self,
        n_sampled: usize,
    ) -> Self {
        Self { n_sampled, ..self }
    }

    /// Sets the learning rate.
    pub fn with_learning_rate(
        self,
        learning_rate: f32,
    ) -> Self {
        Self {
            learning_rate,
            ..self
        }
    }

    /// Check that every option is in range.
    pub fn validate(&self) -> SCResult<()> {
        if self.embedding_dim < 1 {
            return Err(SkipchipperError::invalid_config(
                "embedding_dim",
                "must be >= 1",
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(SkipchipperError::invalid_config(
                "learning_rate",
                format!("must be a positive number, got {}", self.learning_rate),
            ));
        }
        Ok(())
    }
}

fn to_indices<T: TokenType>(
    name: &'static str,
    ids: &[T],
    limit: usize,
) -> SCResult<Vec<usize>> {
    ids.iter()
        .map(|&id| {
            let idx = token_index(id);
            if idx < limit {
                Ok(idx)
            } else {
                Err(SkipchipperError::invalid_config(
                    name,
                    format!("id {id} is outside the vocabulary (size {limit})"),
                ))
            }
        })
        .collect()
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// ``ln(1 + e^x)``, stable for large ``|x|``.
#[inline]
fn softplus(x: f32) -> f32 {
    if x > 20.0 {
        x
    } else if x < -20.0 {
        x.exp()
    } else {
        x.exp().ln_1p()
    }
}

/// Look up the rows of `matrix` for `ids`.
///
/// Fails with [`SkipchipperError::InvalidConfig`] for ids outside the matrix.
pub fn embed_lookup<T: TokenType>(
    matrix: &EmbeddingMatrix,
    ids: &[T],
) -> SCResult<EmbeddingMatrix> {
    let ids = to_indices("ids", ids, matrix.rows())?;
    Ok(matrix.gather(&ids))
}

fn row_loss(
    weights: &EmbeddingMatrix,
    bias: &[f32],
    h: &[f32],
    label: usize,
    negatives: &[usize],
) -> f32 {
    let mut loss = softplus(-(dot(weights.row(label), h) + bias[label]));
    for &neg in negatives {
        if neg == label {
            continue;
        }
        loss += softplus(dot(weights.row(neg), h) + bias[neg]);
    }
    loss
}

/// The mean negative-sampling loss of `labels` given `inputs`.
///
/// `n_sampled` candidates are drawn once from a [`LogUniformSampler`] over
/// ``[0, vocab_size)`` and shared by every row; a candidate equal to a
/// row's label is skipped for that row. Each row contributes
/// ``-ln σ(w_y·h + b_y) - Σ ln σ(-(w_n·h + b_n))``.
///
/// ## Arguments
/// * `weights` - the ``vocab_size x dim`` output weights.
/// * `bias` - the ``vocab_size`` output biases.
/// * `labels` - the true ids, one per input row.
/// * `inputs` - the ``labels.len() x dim`` input embeddings.
/// * `n_sampled` - the number of negative candidates.
/// * `vocab_size` - the candidate range.
/// * `rng` - the random source for candidates.
pub fn sampled_loss<T, R>(
    weights: &EmbeddingMatrix,
    bias: &[f32],
    labels: &[T],
    inputs: &EmbeddingMatrix,
    n_sampled: usize,
    vocab_size: usize,
    rng: &mut R,
) -> SCResult<f32>
where
    T: TokenType,
    R: Rng + ?Sized,
{
    if inputs.rows() != labels.len() || inputs.dim() != weights.dim() {
        return Err(SkipchipperError::invalid_config(
            "inputs",
            format!(
                "shape {}x{} does not match {} labels of width {}",
                inputs.rows(),
                inputs.dim(),
                labels.len(),
                weights.dim()
            ),
        ));
    }
    if vocab_size > weights.rows() || vocab_size > bias.len() {
        return Err(SkipchipperError::invalid_config(
            "vocab_size",
            format!(
                "({vocab_size}) exceeds the output layer ({} weights, {} biases)",
                weights.rows(),
                bias.len()
            ),
        ));
    }
    let labels = to_indices("labels", labels, vocab_size)?;

    let sampler = LogUniformSampler::new(vocab_size)?;
    let negatives = sampler.sample_n(n_sampled, rng);

    if labels.is_empty() {
        return Ok(0.0);
    }
    let total: f32 = labels
        .iter()
        .enumerate()
        .map(|(i, &y)| row_loss(weights, bias, inputs.row(i), y, &negatives))
        .sum();
    Ok(total / labels.len() as f32)
}

/// A skip-gram model trained by SGD on a negative-sampling loss.
///
/// Holds an input embedding matrix, initialized ``U(-1, 1)``, and an output
/// layer of weights, initialized ``U(-0.1, 0.1)``, with zero biases.
#[derive(Debug, Clone)]
pub struct NegativeSamplingModel {
    options: ModelOptions,
    embedding: EmbeddingMatrix,
    weights: EmbeddingMatrix,
    bias: Vec<f32>,
    sampler: LogUniformSampler,
}

impl NegativeSamplingModel {
    /// Initialize a model.
    ///
    /// ## Arguments
    /// * `vocab_size` - the number of vocabulary ids; must be ``>= 1``.
    /// * `options` - the model options.
    /// * `rng` - the random source for initialization.
    pub fn new<R: Rng + ?Sized>(
        vocab_size: usize,
        options: ModelOptions,
        rng: &mut R,
    ) -> SCResult<Self> {
        options.validate()?;
        let sampler = LogUniformSampler::new(vocab_size)
            .map_err(|_| SkipchipperError::invalid_config("vocab_size", "must be >= 1"))?;

        let dim = options.embedding_dim;
        let embedding = EmbeddingMatrix::random_uniform(vocab_size, dim, -1.0, 1.0, rng);
        let weights = EmbeddingMatrix::random_uniform(vocab_size, dim, -0.1, 0.1, rng);

        log::debug!(
            "Initialized negative sampling model: vocab={vocab_size}, dim={dim}, n_sampled={}",
            options.n_sampled
        );

        Ok(Self {
            options,
            embedding,
            weights,
            bias: vec![0.0; vocab_size],
            sampler,
        })
    }

    /// The model options.
    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// The number of vocabulary ids.
    pub fn vocab_size(&self) -> usize {
        self.embedding.rows()
    }

    /// The embedding width.
    pub fn embedding_dim(&self) -> usize {
        self.embedding.dim()
    }

    /// The input embedding matrix.
    pub fn embeddings(&self) -> &EmbeddingMatrix {
        &self.embedding
    }

    /// The output layer weights.
    pub fn weights(&self) -> &EmbeddingMatrix {
        &self.weights
    }

    /// The output layer biases.
    pub fn bias(&self) -> &[f32] {
        &self.bias
    }

    /// Apply one logistic update to output row `target`; accumulate the
    /// input gradient into `grad_h` and return the row's loss term.
    fn update_target(
        &mut self,
        target: usize,
        positive: bool,
        h: &[f32],
        grad_h: &mut [f32],
    ) -> f32 {
        let lr = self.options.learning_rate;
        let w = self.weights.row_mut(target);
        let logit = dot(w, h) + self.bias[target];

        let label = if positive { 1.0 } else { 0.0 };
        let g = sigmoid(logit) - label;

        for ((wi, &hi), gh) in w.iter_mut().zip(h).zip(grad_h.iter_mut()) {
            *gh += g * *wi;
            *wi -= lr * g * hi;
        }
        self.bias[target] -= lr * g;

        if positive {
            softplus(-logit)
        } else {
            softplus(logit)
        }
    }
}

impl<T: TokenType> SkipGramModel<T> for NegativeSamplingModel {
    fn vocab_size(&self) -> usize {
        self.embedding.rows()
    }

    fn embedding_dim(&self) -> usize {
        self.embedding.dim()
    }

    fn embeddings(&self) -> &EmbeddingMatrix {
        &self.embedding
    }

    fn embed_lookup(
        &self,
        ids: &[T],
    ) -> SCResult<EmbeddingMatrix> {
        embed_lookup(&self.embedding, ids)
    }

    fn sampled_loss<R: Rng + ?Sized>(
        &self,
        inputs: &EmbeddingMatrix,
        labels: &[T],
        rng: &mut R,
    ) -> SCResult<f32> {
        sampled_loss(
            &self.weights,
            &self.bias,
            labels,
            inputs,
            self.options.n_sampled,
            self.embedding.rows(),
            rng,
        )
    }

    fn train_step<R: Rng + ?Sized>(
        &mut self,
        batch: &Batch<T>,
        rng: &mut R,
    ) -> SCResult<f32> {
        let vocab_size = self.embedding.rows();
        let centers = to_indices("centers", &batch.centers, vocab_size)?;
        let contexts = to_indices("contexts", &batch.contexts, vocab_size)?;
        if centers.is_empty() {
            return Ok(0.0);
        }

        let negatives = self.sampler.sample_n(self.options.n_sampled, rng);
        let lr = self.options.learning_rate;

        let dim = self.embedding.dim();
        let mut h = vec![0.0; dim];
        let mut grad_h = vec![0.0; dim];
        let mut total = 0.0;

        for (&center, &context) in centers.iter().zip(&contexts) {
            h.copy_from_slice(self.embedding.row(center));
            grad_h.fill(0.0);

            total += self.update_target(context, true, &h, &mut grad_h);
            for &neg in &negatives {
                if neg == context {
                    continue;
                }
                total += self.update_target(neg, false, &h, &mut grad_h);
            }

            for (e, g) in self.embedding.row_mut(center).iter_mut().zip(&grad_h) {
                *e -= lr * g;
            }
        }

        Ok(total / centers.len() as f32)
    }
}
