//! CLI argument definitions for perfchart.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Fetch one timeframe and render the comparison |
//! | `assets` | Show what is being compared |
//! | `watch` | Switch timeframes interactively from stdin |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--backend-url` | `$PERFCHART_BACKEND_URL` or `http://localhost:8000` | Backend origin |
//! | `--timeout-ms` | `$PERFCHART_TIMEOUT_MS` or `3000` | Request timeout in ms |
//! | `--demo` | `false` | Use deterministic offline data |
//! | `--rows` | `10` | Most recent points shown in table output |
//!
//! # Examples
//!
//! ```bash
//! perfchart show --timeframe 6M
//! perfchart show --timeframe ALL --format json --pretty
//! perfchart --demo --demo-latency-ms 800 watch
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use perfchart_core::Timeframe;

/// Crypto basket vs. 60/40 portfolio cumulative returns.
#[derive(Debug, Parser)]
#[command(
    name = "perfchart",
    author,
    version,
    about = "Compare crypto and 60/40 portfolio cumulative returns",
    long_about = "perfchart fetches crypto basket and 60/40 portfolio performance from the \
backend for a reporting window (1M, 6M, 1Y, ALL), aligns the two series, and renders \
the comparison with the latest cumulative return of each side.\n\
\n\
Use 'perfchart <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Backend origin; overrides PERFCHART_BACKEND_URL.
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Request timeout in milliseconds; overrides PERFCHART_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Serve deterministic synthetic data instead of calling the backend.
    #[arg(long, global = true, default_value_t = false)]
    pub demo: bool,

    /// Simulated 1Y round trip for --demo; other windows scale with lookback.
    #[arg(long, global = true, default_value_t = 0)]
    pub demo_latency_ms: u64,

    /// Number of most recent aligned points in table output.
    #[arg(long, global = true, default_value_t = 10)]
    pub rows: usize,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary line plus a table of the latest points.
    Table,
    /// Single JSON object with the full aligned series.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one timeframe and render the comparison.
    ///
    /// # Examples
    ///
    ///   perfchart show
    ///   perfchart show --timeframe 1M --rows 30
    Show(ShowArgs),

    /// Show names and descriptions of the compared assets.
    Assets,

    /// Interactively switch timeframes.
    ///
    /// Reads one command per line from stdin: 1M, 6M, 1Y, ALL select a
    /// window, r or retry re-issues the current request, q or quit exits.
    /// Selections may be typed while a request is still in flight; only the
    /// latest one is ever rendered.
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Reporting window: 1M, 6M, 1Y, or ALL.
    #[arg(long, short, default_value_t = Timeframe::OneYear)]
    pub timeframe: Timeframe,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Window loaded on startup.
    #[arg(long, short, default_value_t = Timeframe::OneYear)]
    pub timeframe: Timeframe,
}
