use std::io::Write;

use crate::{
    commands::args::PipelineArgs,
    corpus::CorpusArgs,
    input_output::OutputArgs,
    logging::LogArgs,
};

/// Args for the batches command.
#[derive(clap::Args, Debug)]
pub struct BatchesArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl BatchesArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let options = self.pipeline.options();
        let mut rng = options.rng();
        let epochs = options.epochs;

        let dataset = self.corpus.load()?.into_dataset(options, &mut rng)?;

        let mut writer = self.output.open_writer()?;
        writeln!(writer, "epoch\tbatches\trows\tdropped")?;
        for epoch in 1..=epochs {
            let batches = dataset.epoch_batches(&mut rng)?;
            let dropped = batches.dropped().len();

            let mut n_batches = 0;
            let mut rows = 0;
            for batch in batches {
                n_batches += 1;
                rows += batch?.len();
            }
            log::debug!("Epoch {epoch}/{epochs}: {n_batches} batches, {rows} rows");
            writeln!(writer, "{epoch}\t{n_batches}\t{rows}\t{dropped}")?;
        }
        writer.flush()?;

        Ok(())
    }
}
