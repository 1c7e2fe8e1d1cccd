use crate::commands::{batches::BatchesArgs, train::TrainArgs, vocab::VocabArgs};

pub mod args;
pub mod batches;
pub mod train;
pub mod vocab;

/// Subcommands for skipchipper-cli
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train skip-gram embeddings on text files.
    Train(TrainArgs),

    /// Build and print the frequency-ranked vocabulary.
    Vocab(VocabArgs),

    /// Print per-epoch batch statistics.
    Batches(BatchesArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Vocab(cmd) => cmd.run(),
            Commands::Batches(cmd) => cmd.run(),
        }
    }
}
