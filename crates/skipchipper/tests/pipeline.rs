#![allow(missing_docs)]

use rand::{SeedableRng, rngs::StdRng};
use skipchipper::{
    SkipchipperError,
    model::{ModelOptions, NegativeSamplingModel, SkipGramModel},
    training::{BatchIter, SkipGramDataset, SkipGramOptions, SkipGramTrainer, TrainerOptions},
    vocab::{VocabBuilder, VocabBuilderOptions, WordVocab},
};

const SAMPLES: &[&str] = &[
    "the quick brown fox jumps over the lazy dog",
    "the lazy dog sleeps while the quick fox runs",
    "a brown dog and a brown fox play in the sun",
    "the sun rises over the quiet hills",
];

fn build_vocab(min_count: u64) -> WordVocab<u32> {
    let mut builder: VocabBuilder = VocabBuilderOptions::default()
        .with_min_count(min_count)
        .init();
    builder.update_from_samples(SAMPLES);
    let (vocab, _freqs) = builder.build().unwrap();
    vocab
}

#[test]
fn test_two_batches_of_neighbors() {
    let stream: Vec<u32> = vec![1, 2, 3, 4, 5, 1, 2, 3, 4, 5];
    let mut rng = StdRng::seed_from_u64(7);

    let batches: Vec<_> = BatchIter::new(&stream, 5, 2, &mut rng)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(batches.len(), 2);

    for (chunk, batch) in stream.chunks_exact(5).zip(&batches) {
        assert!(!batch.is_empty());
        for (center, context) in batch.rows() {
            assert_ne!(center, context);

            let idx = chunk.iter().position(|&t| t == center).unwrap();
            let lo = idx.saturating_sub(2);
            let hi = (idx + 3).min(chunk.len());
            assert!(chunk[lo..hi].contains(&context));
        }
    }
}

#[test]
fn test_vocab_is_reproducible() {
    let a = build_vocab(1);
    let b = build_vocab(1);
    assert_eq!(a.tokens().collect::<Vec<_>>(), b.tokens().collect::<Vec<_>>());

    // "the" is by far the most frequent token.
    assert_eq!(a.token_to_id("the"), Some(0));
    assert_eq!(a.decode(&a.encode(&["fox", "dog"]).unwrap()), vec!["fox", "dog"]);
}

#[test]
fn test_min_count_filters_rare_tokens() {
    let vocab = build_vocab(3);
    assert!(vocab.token_to_id("the").is_some());
    assert!(vocab.token_to_id("hills").is_none());

    assert!(matches!(
        vocab.encode(&["hills"]),
        Err(SkipchipperError::UnknownToken(t)) if t == "hills"
    ));
    assert_eq!(vocab.encode_lossy(&["hills", "the"]), vec![0]);
}

#[test]
fn test_end_to_end_training() {
    let tokens: Vec<&str> = SAMPLES
        .iter()
        .cycle()
        .take(40)
        .flat_map(|s| s.split_whitespace())
        .collect();

    let options = SkipGramOptions::default()
        .with_subsample_threshold(0.05)
        .with_batch_size(16)
        .with_window_size(3)
        .with_epochs(2)
        .with_seed(Some(1234));
    let mut rng = options.rng();

    let dataset: SkipGramDataset = SkipGramDataset::from_tokens(&tokens, options, &mut rng).unwrap();
    assert_eq!(dataset.token_stream().len(), tokens.len());
    assert!(dataset.train_stream().len() < dataset.token_stream().len());
    assert!(dataset.n_batches() > 0);

    let mut model = NegativeSamplingModel::new(
        dataset.vocab().len(),
        ModelOptions::default()
            .with_embedding_dim(16)
            .with_n_sampled(4),
        &mut rng,
    )
    .unwrap();
    assert_eq!(SkipGramModel::<u32>::embedding_dim(&model), 16);

    let report = SkipGramTrainer::new(
        TrainerOptions::default()
            .with_report_every(5)
            .with_top_k(4)
            .with_valid_size(6),
    )
    .train(&mut model, &dataset, &mut rng)
    .unwrap();

    assert_eq!(report.steps, 2 * dataset.n_batches());
    assert_eq!(report.final_neighbors.neighbors.len(), 6);
    for (id, nearest) in &report.final_neighbors.neighbors {
        assert_eq!(nearest.len(), 4);
        assert!(!nearest.contains(id));
    }
}

#[test]
fn test_seeded_runs_match() {
    let tokens: Vec<&str> = SAMPLES.iter().flat_map(|s| s.split_whitespace()).collect();
    let options = SkipGramOptions::default()
        .with_subsample_threshold(0.02)
        .with_batch_size(8)
        .with_seed(Some(99));

    let run = || {
        let mut rng = options.rng();
        let dataset: SkipGramDataset =
            SkipGramDataset::from_tokens(&tokens, options.clone(), &mut rng).unwrap();
        let batches: Vec<_> = dataset
            .epoch_batches(&mut rng)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        (dataset.train_stream().to_vec(), batches)
    };

    assert_eq!(run(), run());
}
