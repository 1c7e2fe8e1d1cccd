//! # Skip-Gram Training Loop

use std::time::Instant;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};

use crate::{
    errors::{SCResult, SkipchipperError},
    model::{SkipGramModel, nearest_neighbors},
    training::SkipGramDataset,
    types::{CountType, TokenType, token_index},
    vocab::WordVocab,
};

/// The offset of the "rare word" validation range.
const RARE_VALIDATION_OFFSET: usize = 1000;

/// Options for [`SkipGramTrainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerOptions {
    /// Report the moving-average loss every `report_every` steps; ``0`` disables.
    pub report_every: usize,

    /// Report validation nearest neighbors every `eval_every` steps; ``0`` disables.
    pub eval_every: usize,

    /// The number of neighbors reported per validation id.
    pub top_k: usize,

    /// The number of validation ids.
    pub valid_size: usize,

    /// The width of each validation id range.
    pub valid_window: usize,
}

impl Default for TrainerOptions {
    fn default() -> Self {
        Self {
            report_every: 100,
            eval_every: 1000,
            top_k: 8,
            valid_size: 16,
            valid_window: 100,
        }
    }
}

impl TrainerOptions {
    /// Sets the loss report interval.
    pub fn with_report_every(
        self,
        report_every: usize,
    ) -> Self {
        Self {
            report_every,
            ..self
        }
    }

    /// Sets the nearest-neighbor report interval.
    pub fn with_eval_every(
        self,
        eval_every: usize,
    ) -> Self {
        Self { eval_every, ..self }
    }

    /// Sets the number of neighbors per validation id.
    pub fn with_top_k(
        self,
        top_k: usize,
    ) -> Self {
        Self { top_k, ..self }
    }

    /// Sets the number of validation ids.
    pub fn with_valid_size(
        self,
        valid_size: usize,
    ) -> Self {
        Self { valid_size, ..self }
    }

    /// Sets the width of each validation id range.
    pub fn with_valid_window(
        self,
        valid_window: usize,
    ) -> Self {
        Self {
            valid_window,
            ..self
        }
    }
}

/// A moving-average loss report.
#[derive(Debug, Clone, PartialEq)]
pub struct LossReport {
    /// The epoch, counting from 1.
    pub epoch: usize,

    /// The global step, counting from 1.
    pub step: usize,

    /// The mean batch loss since the previous report.
    pub avg_loss: f32,

    /// The mean wall time per batch since the previous report.
    pub secs_per_batch: f64,
}

/// Nearest neighbors of the validation ids at a given step.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborReport<T: TokenType> {
    /// The global step.
    pub step: usize,

    /// ``(validation id, nearest ids)``, nearest first.
    pub neighbors: Vec<(T, Vec<T>)>,
}

/// The summary of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport<T: TokenType> {
    /// The number of epochs run.
    pub epochs: usize,

    /// The total number of batches trained on.
    pub steps: usize,

    /// The validation ids used for neighbor reports.
    pub validation_ids: Vec<T>,

    /// Periodic loss reports.
    pub loss_history: Vec<LossReport>,

    /// Periodic neighbor reports.
    pub neighbor_history: Vec<NeighborReport<T>>,

    /// Neighbors of the validation ids after the last step.
    pub final_neighbors: NeighborReport<T>,
}

impl<T: TokenType> TrainReport<T> {
    /// The most recent moving-average loss, if any was reported.
    pub fn last_loss(&self) -> Option<f32> {
        self.loss_history.last().map(|r| r.avg_loss)
    }
}

/// Sample the diagnostic validation ids.
///
/// Half are drawn without replacement from the most frequent ids,
/// ``[0, valid_window)``; half from a rarer range,
/// ``[1000, 1000 + valid_window)``. Both ranges are clipped to the
/// vocabulary; when the rare range is empty, the frequent range supplies
/// as many ids as it can.
pub fn sample_validation_ids<T, R>(
    vocab_size: usize,
    valid_size: usize,
    valid_window: usize,
    rng: &mut R,
) -> Vec<T>
where
    T: TokenType,
    R: Rng + ?Sized,
{
    let low_len = valid_window.min(vocab_size);
    let high_len = vocab_size
        .saturating_sub(RARE_VALIDATION_OFFSET)
        .min(valid_window);

    let n_high = (valid_size / 2).min(high_len);
    let n_low = (valid_size - n_high).min(low_len);

    let low = index::sample(rng, low_len, n_low).into_iter();
    let high = index::sample(rng, high_len, n_high)
        .into_iter()
        .map(|i| i + RARE_VALIDATION_OFFSET);

    low.chain(high).filter_map(T::from_usize).collect()
}

/// Runs skip-gram training epochs over a [`SkipGramDataset`].
#[derive(Debug, Clone, Default)]
pub struct SkipGramTrainer {
    /// The trainer options.
    pub options: TrainerOptions,
}

impl SkipGramTrainer {
    /// Create a trainer.
    pub fn new(options: TrainerOptions) -> Self {
        Self { options }
    }

    /// Train `model` for the dataset's configured number of epochs.
    ///
    /// Each epoch builds a fresh [`super::BatchIter`] drawing window reaches
    /// from `rng`; the model's negative candidates come from a separate
    /// generator seeded from `rng` once, up front.
    ///
    /// Any error aborts the run.
    ///
    /// ## Arguments
    /// * `model` - the model to train.
    /// * `dataset` - the prepared dataset.
    /// * `rng` - the random source.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn train<T, C, M, R>(
        &self,
        model: &mut M,
        dataset: &SkipGramDataset<T, C>,
        rng: &mut R,
    ) -> SCResult<TrainReport<T>>
    where
        T: TokenType,
        C: CountType,
        M: SkipGramModel<T>,
        R: Rng + ?Sized,
    {
        let vocab = dataset.vocab();
        if model.vocab_size() != vocab.len() {
            return Err(SkipchipperError::invalid_config(
                "model",
                format!(
                    "vocab size ({}) does not match the dataset vocabulary ({})",
                    model.vocab_size(),
                    vocab.len()
                ),
            ));
        }

        let mut model_rng = StdRng::seed_from_u64(rng.random());
        let validation_ids: Vec<T> = sample_validation_ids(
            vocab.len(),
            self.options.valid_size,
            self.options.valid_window,
            rng,
        );

        let epochs = dataset.options().epochs;
        log::info!(
            "Training: {} epochs x {} batches (batch_size={}, window_size={})",
            epochs,
            dataset.n_batches(),
            dataset.options().batch_size,
            dataset.options().window_size
        );

        let mut loss_history = Vec::new();
        let mut neighbor_history = Vec::new();

        let mut step = 0;
        let mut loss_sum = 0.0f64;
        let mut loss_steps = 0usize;
        let mut t0 = Instant::now();

        for epoch in 1..=epochs {
            log::debug!("Epoch {epoch}/{epochs}");
            for batch in dataset.epoch_batches(&mut *rng)? {
                let batch = batch?;
                let loss = model.train_step(&batch, &mut model_rng)?;

                step += 1;
                loss_sum += loss as f64;
                loss_steps += 1;

                if self.options.report_every > 0 && step % self.options.report_every == 0 {
                    let report = LossReport {
                        epoch,
                        step,
                        avg_loss: (loss_sum / loss_steps as f64) as f32,
                        secs_per_batch: t0.elapsed().as_secs_f64() / loss_steps as f64,
                    };
                    log::info!(
                        "Epoch {}/{} Iteration: {} Avg. Training loss: {:.4} {:.4} sec/batch",
                        epoch,
                        epochs,
                        step,
                        report.avg_loss,
                        report.secs_per_batch
                    );
                    loss_history.push(report);

                    loss_sum = 0.0;
                    loss_steps = 0;
                    t0 = Instant::now();
                }

                if self.options.eval_every > 0 && step % self.options.eval_every == 0 {
                    neighbor_history.push(self.nearest_report(model, vocab, &validation_ids, step));
                }
            }
        }

        let final_neighbors = self.nearest_report(model, vocab, &validation_ids, step);
        log::info!("Finished training: {step} steps");

        Ok(TrainReport {
            epochs,
            steps: step,
            validation_ids,
            loss_history,
            neighbor_history,
            final_neighbors,
        })
    }

    /// Find and log the nearest neighbors of `ids` in the model's embeddings.
    pub fn nearest_report<T, M>(
        &self,
        model: &M,
        vocab: &WordVocab<T>,
        ids: &[T],
        step: usize,
    ) -> NeighborReport<T>
    where
        T: TokenType,
        M: SkipGramModel<T>,
    {
        let normalized = model.embeddings().normalized();

        let neighbors: Vec<(T, Vec<T>)> = ids
            .iter()
            .filter(|&&id| token_index(id) < normalized.rows())
            .map(|&id| {
                let nearest: Vec<T> =
                    nearest_neighbors(&normalized, token_index(id), self.options.top_k)
                        .into_iter()
                        .filter_map(|(i, _)| T::from_usize(i))
                        .collect();

                log::info!(
                    "Nearest to {}: {}",
                    vocab.id_to_token(id).unwrap_or("<unk>"),
                    vocab.decode(&nearest).join(", ")
                );
                (id, nearest)
            })
            .collect();

        NeighborReport { step, neighbors }
    }
}
