//! CLI argument definitions for `sauti-grid`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sauti-grid",
    version,
    about = "Browse Sauti East Africa market prices from the terminal",
    long_about = "Filter and page through Sauti market price data.\n\n\
                  The session (filters, cursor and the last page of rows) is kept in a\n\
                  state directory and restored by every command."
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

    /// Configuration file (default: config.toml in the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Bearer token for the API (default: read from the configured environment variable).
    #[arg(long = "token", value_name = "TOKEN", global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the current filters, page and cached rows.
    Show,

    /// Change filters and fetch the first page.
    Update(FilterArgs),

    /// Fetch the next page.
    Next,

    /// Fetch the previous page.
    Prev,

    /// Forget the stored session and return to default filters.
    Reset,

    /// Resolve a download link for every row matching the filters.
    Export(FilterArgs),

    /// Write the cached page of rows as CSV.
    PageCsv(PageCsvArgs),

    /// List the available filter options.
    Options,
}

/// Filter changes. A dimension flag replaces that dimension's selection;
/// dimensions not mentioned keep theirs.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Country code (repeatable), e.g. KEN.
    #[arg(short = 'c', long = "country", value_name = "CODE")]
    pub countries: Vec<String>,

    /// Market name (repeatable).
    #[arg(short = 'm', long = "market", value_name = "NAME")]
    pub markets: Vec<String>,

    /// Data source (repeatable).
    #[arg(short = 's', long = "source", value_name = "NAME")]
    pub sources: Vec<String>,

    /// Product category (repeatable).
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Product aggregator (repeatable).
    #[arg(long = "aggregator", value_name = "NAME")]
    pub aggregators: Vec<String>,

    /// Product (repeatable).
    #[arg(short = 'p', long = "product", value_name = "NAME")]
    pub products: Vec<String>,

    /// Clear every dimension selection before applying the flags above.
    #[arg(long = "clear-filters")]
    pub clear_filters: bool,

    /// Three-letter currency code.
    #[arg(long = "currency", value_name = "CODE")]
    pub currency: Option<String>,

    /// Range start (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE", requires = "to")]
    pub from: Option<String>,

    /// Range end (YYYY-MM-DD), no later than today.
    #[arg(long = "to", value_name = "DATE", requires = "from")]
    pub to: Option<String>,

    /// Remove the date range.
    #[arg(long = "clear-dates", conflicts_with_all = ["from", "to"])]
    pub clear_dates: bool,
}

#[derive(Args)]
pub struct PageCsvArgs {
    /// Output file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
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
