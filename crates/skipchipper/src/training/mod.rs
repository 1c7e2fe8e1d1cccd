//! # Skip-Gram Training
//!
//! The data pipeline, in order:
//! * [`Subsampler`] - drops frequent tokens from the token stream.
//! * [`context_window`] - draws a window reach per center and collects its
//!   distinct context ids.
//! * [`BatchIter`] - walks the training stream in `batch_size` chunks,
//!   yielding one [`Batch`] of ``(center, context)`` rows per chunk.
//!
//! [`SkipGramDataset`] ties these together over a [`crate::vocab::WordVocab`],
//! and [`SkipGramTrainer`] runs epochs of batches through a
//! [`crate::model::SkipGramModel`], reporting loss and nearest neighbors.
//!
//! ```rust
//! use rand::{SeedableRng, rngs::StdRng};
//! use skipchipper::training::BatchIter;
//!
//! let stream: Vec<u32> = vec![1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 6];
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let mut batches = BatchIter::new(&stream, 5, 2, &mut rng)?;
//! assert_eq!(batches.n_batches(), 2);
//! assert_eq!(batches.dropped(), &[6]);
//!
//! let batch = batches.next().unwrap()?;
//! assert_eq!(batch.centers.len(), batch.contexts.len());
//! # Ok::<(), skipchipper::SkipchipperError>(())
//! ```

mod batches;
mod dataset;
mod options;
mod subsample;
mod trainer;
mod window;

#[doc(inline)]
pub use batches::{Batch, BatchIter};
#[doc(inline)]
pub use dataset::SkipGramDataset;
#[doc(inline)]
pub use options::{
    DEFAULT_BATCH_SIZE,
    DEFAULT_EPOCHS,
    DEFAULT_SUBSAMPLE_THRESHOLD,
    DEFAULT_WINDOW_SIZE,
    SkipGramOptions,
};
#[doc(inline)]
pub use subsample::{DropTable, Subsampler};
#[doc(inline)]
pub use trainer::{
    LossReport,
    NeighborReport,
    SkipGramTrainer,
    TrainReport,
    TrainerOptions,
    sample_validation_ids,
};
#[doc(inline)]
pub use window::{context_window, window_contexts};
