use stderrlog::Timestamp;

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Turn debugging information on (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, default_value = None)]
    verbose: Option<u8>,

    /// Enable timestamped logging.
    #[clap(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The verbosity level; `default` unless `-v` was given.
    fn level(
        &self,
        default: u8,
    ) -> u8 {
        if let Some(verbose) = self.verbose
            && verbose > 0
        {
            verbose
        } else {
            default
        }
    }

    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let log_level = match self.level(default) {
            0 => stderrlog::LogLevelNum::Off,
            1 => stderrlog::LogLevelNum::Error,
            2 => stderrlog::LogLevelNum::Warn,
            3 => stderrlog::LogLevelNum::Info,
            4 => stderrlog::LogLevelNum::Debug,
            _ => stderrlog::LogLevelNum::Trace,
        };

        stderrlog::new()
            .module("skipchipper")
            .module("skipchipper_cli")
            .quiet(self.quiet)
            .verbosity(log_level)
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level() {
        let args = LogArgs {
            quiet: false,
            verbose: None,
            ts: false,
        };
        assert_eq!(args.level(3), 3);

        let args = LogArgs {
            verbose: Some(0),
            ..args
        };
        assert_eq!(args.level(3), 3);

        let args = LogArgs {
            verbose: Some(4),
            ..args
        };
        assert_eq!(args.level(3), 4);
    }
}
