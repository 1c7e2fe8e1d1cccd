use std::io::Write;

use skipchipper::{model::NegativeSamplingModel, training::SkipGramTrainer};

use crate::{
    commands::args::{ModelArgs, PipelineArgs, TrainerArgs},
    corpus::CorpusArgs,
    input_output::OutputArgs,
    logging::LogArgs,
};

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(flatten)]
    model: ModelArgs,

    #[command(flatten)]
    trainer: TrainerArgs,

    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl TrainArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let options = self.pipeline.options();
        let mut rng = options.rng();

        let corpus = self.corpus.load()?;

        let mut vocab_out = Vec::new();
        corpus.write_vocab(&mut vocab_out)?;

        let dataset = corpus.into_dataset(options, &mut rng)?;

        let mut model =
            NegativeSamplingModel::new(dataset.vocab().len(), self.model.options(), &mut rng)?;

        log::info!("Training embeddings...");
        let report =
            SkipGramTrainer::new(self.trainer.options()).train(&mut model, &dataset, &mut rng)?;

        log::info!(
            "Trained {} steps over {} epochs; final avg. loss: {}",
            report.steps,
            report.epochs,
            report
                .last_loss()
                .map_or_else(|| "n/a".to_string(), |l| format!("{l:.4}"))
        );

        if let Some(path) = &self.output.output {
            log::info!("output: {}", path);
        }
        let mut writer = self.output.open_writer()?;
        writer.write_all(&vocab_out)?;
        writer.flush()?;

        Ok(())
    }
}
