use skipchipper::{
    model::{DEFAULT_EMBEDDING_DIM, DEFAULT_LEARNING_RATE, DEFAULT_N_SAMPLED, ModelOptions},
    training::{
        DEFAULT_BATCH_SIZE,
        DEFAULT_EPOCHS,
        DEFAULT_SUBSAMPLE_THRESHOLD,
        DEFAULT_WINDOW_SIZE,
        SkipGramOptions,
        TrainerOptions,
    },
};

/// Data pipeline arg group.
#[derive(clap::Args, Debug)]
pub struct PipelineArgs {
    /// Subsampling threshold `t`; frequent words are dropped with `1 - sqrt(t / f)`.
    #[arg(long, default_value_t = DEFAULT_SUBSAMPLE_THRESHOLD)]
    pub subsample_threshold: f64,

    /// Maximum window reach around each center word.
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Words per batch.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Passes over the training stream.
    #[arg(long, default_value_t = DEFAULT_EPOCHS)]
    pub epochs: usize,

    /// Random seed; unseeded runs draw from the OS.
    #[arg(long, default_value = None)]
    pub seed: Option<u64>,
}

impl PipelineArgs {
    pub fn options(&self) -> SkipGramOptions {
        SkipGramOptions::default()
            .with_subsample_threshold(self.subsample_threshold)
            .with_window_size(self.window_size)
            .with_batch_size(self.batch_size)
            .with_epochs(self.epochs)
            .with_seed(self.seed)
    }
}

/// Model arg group.
#[derive(clap::Args, Debug)]
pub struct ModelArgs {
    /// Embedding dimension.
    #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIM)]
    pub embedding_dim: usize,

    /// Negative samples per batch.
    #[arg(long, default_value_t = DEFAULT_N_SAMPLED)]
    pub n_sampled: usize,

    /// SGD learning rate.
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    pub learning_rate: f32,
}

impl ModelArgs {
    pub fn options(&self) -> ModelOptions {
        ModelOptions::default()
            .with_embedding_dim(self.embedding_dim)
            .with_n_sampled(self.n_sampled)
            .with_learning_rate(self.learning_rate)
    }
}

/// Training loop arg group.
#[derive(clap::Args, Debug)]
pub struct TrainerArgs {
    /// Steps between loss reports; 0 disables.
    #[arg(long, default_value_t = TrainerOptions::default().report_every)]
    pub report_every: usize,

    /// Steps between nearest-neighbor reports; 0 disables.
    #[arg(long, default_value_t = TrainerOptions::default().eval_every)]
    pub eval_every: usize,

    /// Neighbors shown per validation word.
    #[arg(long, default_value_t = TrainerOptions::default().top_k)]
    pub top_k: usize,

    /// Number of validation words.
    #[arg(long, default_value_t = TrainerOptions::default().valid_size)]
    pub valid_size: usize,

    /// Width of each validation id range.
    #[arg(long, default_value_t = TrainerOptions::default().valid_window)]
    pub valid_window: usize,
}

impl TrainerArgs {
    pub fn options(&self) -> TrainerOptions {
        TrainerOptions::default()
            .with_report_every(self.report_every)
            .with_eval_every(self.eval_every)
            .with_top_k(self.top_k)
            .with_valid_size(self.valid_size)
            .with_valid_window(self.valid_window)
    }
}
