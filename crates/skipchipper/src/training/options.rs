//! # Skip-Gram Pipeline Options

use rand::{SeedableRng, rngs::StdRng};

use crate::errors::{SCResult, SkipchipperError};

/// Default subsampling threshold.
pub const DEFAULT_SUBSAMPLE_THRESHOLD: f64 = 1e-5;

/// Default maximum window reach.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default number of stream tokens per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default number of training epochs.
pub const DEFAULT_EPOCHS: usize = 10;

/// Options for the skip-gram data pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipGramOptions {
    /// The subsampling threshold `t`.
    ///
    /// Tokens with relative frequency above `t` are randomly dropped
    /// with probability ``1 - sqrt(t / f)``.
    pub subsample_threshold: f64,

    /// The maximum window reach `C`.
    pub window_size: usize,

    /// The number of training-stream tokens per batch.
    ///
    /// Note: this counts center tokens, not ``(center, context)`` rows.
    pub batch_size: usize,

    /// The number of training epochs.
    pub epochs: usize,

    /// Random seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SkipGramOptions {
    fn default() -> Self {
        Self {
            subsample_threshold: DEFAULT_SUBSAMPLE_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            epochs: DEFAULT_EPOCHS,
            seed: None,
        }
    }
}

impl SkipGramOptions {
    /// Sets the subsampling threshold.
    pub fn with_subsample_threshold(
        self,
        subsample_threshold: f64,
    ) -> Self {
        Self {
            subsample_threshold,
            ..self
        }
    }

    /// Sets the maximum window reach.
    pub fn with_window_size(
        self,
        window_size: usize,
    ) -> Self {
        Self {
            window_size,
            ..self
        }
    }

    /// Sets the batch size.
    pub fn with_batch_size(
        self,
        batch_size: usize,
    ) -> Self {
        Self { batch_size, ..self }
    }

    /// Sets the number of epochs.
    pub fn with_epochs(
        self,
        epochs: usize,
    ) -> Self {
        Self { epochs, ..self }
    }

    /// Sets the random seed.
    pub fn with_seed(
        self,
        seed: Option<u64>,
    ) -> Self {
        Self { seed, ..self }
    }

    /// Check that every knob is in range.
    ///
    /// ## Returns
    /// [`SkipchipperError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> SCResult<()> {
        validate_threshold(self.subsample_threshold)?;
        validate_window_size(self.window_size)?;
        validate_batch_size(self.batch_size)?;
        Ok(())
    }

    /// Build the random source for a run.
    ///
    /// Seeded runs are reproducible.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> SCResult<()> {
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(SkipchipperError::invalid_config(
            "subsample_threshold",
            format!("must be a positive number, got {threshold}"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_window_size(window_size: usize) -> SCResult<()> {
    if window_size < 1 {
        return Err(SkipchipperError::invalid_config(
            "window_size",
            "must be >= 1",
        ));
    }
    Ok(())
}

pub(crate) fn validate_batch_size(batch_size: usize) -> SCResult<()> {
    if batch_size < 1 {
        return Err(SkipchipperError::invalid_config(
            "batch_size",
            "must be >= 1",
        ));
    }
    Ok(())
}
