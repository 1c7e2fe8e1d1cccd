//! # `skipchipper` Skip-Gram Embedding Pipeline
//!
//! This crate builds the data pipeline for training skip-gram word embeddings,
//! and the training loop contract around it.
//!
//! See:
//! * [`vocab`] to count tokens and build a frequency-ranked [`vocab::WordVocab`].
//! * [`training`] to subsample token streams, generate `(center, context)` batches,
//!   and drive training epochs.
//! * [`model`] for the narrow embedding/loss interface and a reference CPU model.
//!
//! The pipeline is:
//!
//! ```text
//! tokens -> VocabBuilder -> token stream -> Subsampler -> training stream
//!        -> BatchIter (context_window per center) -> Batch -> SkipGramModel
//! ```
//!
//! All randomness is drawn from an explicitly passed [`rand::Rng`];
//! seed it (see [`training::SkipGramOptions::rng`]) for reproducible runs.
//!
//! ## Example
//!
//! ```rust
//! use skipchipper::{
//!     model::{ModelOptions, NegativeSamplingModel},
//!     training::{SkipGramDataset, SkipGramOptions, SkipGramTrainer, TrainerOptions},
//! };
//!
//! let text = "the quick brown fox jumps over the lazy dog the end";
//! let tokens: Vec<&str> = text.split_whitespace().collect();
//!
//! let options = SkipGramOptions::default()
//!     .with_subsample_threshold(1.0)
//!     .with_batch_size(4)
//!     .with_window_size(2)
//!     .with_epochs(2)
//!     .with_seed(Some(42));
//! let mut rng = options.rng();
//!
//! let dataset: SkipGramDataset<u32> = SkipGramDataset::from_tokens(&tokens, options, &mut rng)?;
//!
//! let mut model = NegativeSamplingModel::new(
//!     dataset.vocab().len(),
//!     ModelOptions::default().with_embedding_dim(8).with_n_sampled(2),
//!     &mut rng,
//! )?;
//!
//! let report = SkipGramTrainer::new(TrainerOptions::default().with_valid_size(2))
//!     .train(&mut model, &dataset, &mut rng)?;
//! assert_eq!(report.epochs, 2);
//! # Ok::<(), skipchipper::SkipchipperError>(())
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod errors;
pub mod model;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{SCResult, SkipchipperError};
#[doc(inline)]
pub use types::{CountType, TokenType};
