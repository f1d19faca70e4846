//! CLI argument definitions for the BNF code aggregator.

use std::path::PathBuf;

use bnf_output::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bnf-aggregator",
    version,
    about = "BNF code aggregator - Summarise prescribing cost by drug category",
    long_about = "Summarise a prescribing extract into a provider x category grid.\n\n\
                  Records are matched to categories by BNF code prefix, restricted to an\n\
                  allow-list of commissioner/provider codes, and missing combinations are\n\
                  filled with zero."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate a prescribing extract against a codelist.
    Aggregate(AggregateArgs),

    /// List the bundled codelist presets.
    Presets,
}

#[derive(Args)]
pub struct AggregateArgs {
    /// Prescribing extract (CSV).
    #[arg(long = "prescribing", value_name = "CSV")]
    pub prescribing: PathBuf,

    /// Codelist mapping categories to BNF code prefixes (CSV).
    #[arg(long = "codelist", value_name = "CSV", conflicts_with = "preset")]
    pub codelist: Option<PathBuf>,

    /// Use a bundled codelist instead of --codelist (see `presets`).
    #[arg(long = "preset", value_name = "NAME")]
    pub preset: Option<String>,

    /// Replace summed cost by items x multiplier for configured categories.
    #[arg(long = "apply-cost-override")]
    pub apply_cost_override: bool,

    /// Settings file with the provider allow-list and cost multipliers (TOML).
    ///
    /// Defaults to the bundled reference settings.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Write the summary grid to this file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Export format for --output (or stdout with --no-table).
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Skip the terminal table.
    #[arg(long = "no-table")]
    pub no_table: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Csv => Self::Csv,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
