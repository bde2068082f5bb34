//! CLI argument definitions for the pipeline runner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use mrdc_model::DatasetKind;

#[derive(Parser)]
#[command(
    name = "mrdc",
    version,
    about = "Retail data centralisation - normalize tabular sources into destination tables",
    long_about = "Extract tabular records from CSV, JSON or HTTP sources, normalize them\n\
                  per dataset kind (users, cards, stores, products, orders, date-times)\n\
                  and load the result into a destination table."
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
    /// Run one dataset end-to-end: extract, normalize, load.
    Run(RunArgs),

    /// List the supported dataset kinds and their contracts.
    Datasets,
}

#[derive(Args)]
pub struct RunArgs {
    /// Dataset kind to normalize.
    #[arg(long = "kind", value_enum)]
    pub kind: KindArg,

    /// Read the source from a CSV file.
    #[arg(long = "csv", value_name = "PATH", group = "source")]
    pub csv: Option<PathBuf>,

    /// Read the source from a JSON file (array of objects).
    #[arg(long = "json", value_name = "PATH", group = "source")]
    pub json: Option<PathBuf>,

    /// Fetch the source from an HTTP endpoint returning JSON.
    #[arg(long = "url", value_name = "URL", group = "source")]
    pub url: Option<String>,

    /// API key sent as `x-api-key` with `--url`.
    #[arg(long = "api-key", value_name = "KEY", requires = "url")]
    pub api_key: Option<String>,

    /// Directory the destination CSV tables are written to.
    #[arg(long = "out", value_name = "DIR", default_value = "output")]
    pub out: PathBuf,

    /// Override the destination table name.
    #[arg(long = "target", value_name = "NAME")]
    pub target: Option<String>,

    /// Destination credentials YAML (host, user, password, database,
    /// port). Validated and logged; the shipped destination is
    /// file-based.
    #[arg(long = "creds", value_name = "PATH")]
    pub creds: Option<PathBuf>,

    /// Extract and normalize without writing the destination.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Dataset kind choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Users,
    Cards,
    Stores,
    Products,
    Orders,
    DateTimes,
}

impl From<KindArg> for DatasetKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Users => DatasetKind::Users,
            KindArg::Cards => DatasetKind::Cards,
            KindArg::Stores => DatasetKind::Stores,
            KindArg::Products => DatasetKind::Products,
            KindArg::Orders => DatasetKind::Orders,
            KindArg::DateTimes => DatasetKind::DateTimes,
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
