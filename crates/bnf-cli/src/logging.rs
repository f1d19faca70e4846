//! `tracing` subscriber for the `bnf-aggregator` binary.
//!
//! Workspace crates log at the level picked on the command line and all
//! other crates stay at `warn`. Without an explicit level, `RUST_LOG` wins.
//! Excluded records and unused cost multipliers surface at `warn`, stage
//! progress at `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter, format::FmtSpan};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const WORKSPACE_TARGETS: [&str; 6] = [
    "bnf_cli",
    "bnf_core",
    "bnf_ingest",
    "bnf_model",
    "bnf_output",
    "bnf_presets",
];

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Read `RUST_LOG` before falling back to `level_filter`.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Events are appended here rather than written to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// Newline-delimited JSON with span close events.
    Json,
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails when the log file cannot be opened for appending.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let events = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            event_layer(config, Mutex::new(file))
        }
        None => event_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(events)
        .with(env_filter(config))
        .init();
    Ok(())
}

fn event_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer().with_writer(writer).with_target(false);
    match config.format {
        LogFormat::Json => base.json().with_span_events(FmtSpan::CLOSE).boxed(),
        LogFormat::Compact => base
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        LogFormat::Pretty => base.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// `warn` for everything, `level_filter` for the workspace crates.
pub fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(WORKSPACE_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    let from_env = config
        .use_env_filter
        .then(|| EnvFilter::try_from_default_env().ok())
        .flatten();
    from_env.unwrap_or_else(|| EnvFilter::new(default_directives(config.level_filter)))
}
