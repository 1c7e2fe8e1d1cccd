//! # Word Vocabularies
//!
//! A [`WordVocab`] is a bijection between tokens and dense ids in ``[0, V)``;
//! ids are assigned in descending order of corpus frequency, so id ``0``
//! is the most frequent token.
//!
//! Vocabularies are built by a [`VocabBuilder`], which also produces the
//! per-id [`FrequencyTable`] used by the subsampler.
//!
//! ```rust
//! use skipchipper::vocab::VocabBuilder;
//!
//! let mut builder: VocabBuilder = VocabBuilder::default();
//! builder.update_from_samples(["the cat and the hat", "the end"]);
//!
//! let (vocab, freqs) = builder.build::<u32>()?;
//! assert_eq!(vocab.id_to_token(0), Some("the"));
//! assert_eq!(freqs.count(0u32), 3);
//!
//! let stream = vocab.encode(&["the", "hat"])?;
//! assert_eq!(vocab.decode(&stream), vec!["the", "hat"]);
//! # Ok::<(), skipchipper::SkipchipperError>(())
//! ```

mod frequency_table;
mod vocab_builder;
mod word_vocab;

#[doc(inline)]
pub use frequency_table::FrequencyTable;
#[doc(inline)]
pub use vocab_builder::{VocabBuilder, VocabBuilderOptions};
#[doc(inline)]
pub use word_vocab::WordVocab;
