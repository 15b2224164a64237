use crate::cli::Cli;
use crate::error::{CliError, Result};
use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{Layer, filter::LevelFilter, fmt, prelude::*, registry::LookupSpan};

/// Least verbose level ever written to `--log-file`.
const FILE_LEVEL_FLOOR: LevelFilter = LevelFilter::DEBUG;

/// How the terminal and the optional log file are shared between logs and progress bars.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub console_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub show_progress: bool,
}

impl LogSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(
            cli.verbose,
            cli.quiet,
            cli.log_file.clone(),
            std::io::stderr().is_terminal(),
        )
    }

    fn new(verbosity: u8, quiet: bool, log_file: Option<PathBuf>, interactive: bool) -> Self {
        let console_level = if quiet {
            LevelFilter::OFF
        } else {
            match verbosity {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        Self {
            console_level,
            log_file,
            show_progress: interactive && !quiet,
        }
    }

    /// The file keeps DEBUG detail even when the console is quiet.
    pub fn file_level(&self) -> LevelFilter {
        self.console_level.max(FILE_LEVEL_FLOOR)
    }

    /// Installs the global subscriber: a compact stderr layer and, if requested, a plain file layer.
    pub fn init(&self) -> Result<()> {
        let file_layer = match &self.log_file {
            Some(path) => Some(file_layer(File::create(path)?, self.file_level())),
            None => None,
        };
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .compact()
            .with_filter(self.console_level);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .try_init()
            .map_err(|e| CliError::Other(e.into()))
    }
}

fn file_layer<S>(file: File, level: LevelFilter) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(level)
}
