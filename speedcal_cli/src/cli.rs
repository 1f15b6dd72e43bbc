//! CLI argument definitions and shared statics.

use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use speedcal_config::{LOG_LEVELS, OutputFormat};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "speedcal", version, about = "Speedometer calibration curve tools")]
pub struct Cli {
    /// Path to config TOML (built-in defaults when omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit JSON lines instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        ignore_case = true,
        value_parser = PossibleValuesParser::new(LOG_LEVELS)
    )]
    pub log_level: Option<String>,

    /// Command to execute (default: sweep)
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum FormatArg {
    Text,
    Jsonl,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Jsonl => OutputFormat::Jsonl,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SweepArgs {
    /// First speed (overrides sweep.start)
    #[arg(long, value_name = "SPEED")]
    pub start: Option<f64>,
    /// Exclusive upper speed (overrides sweep.end)
    #[arg(long, value_name = "SPEED")]
    pub end: Option<f64>,
    /// Speed increment (overrides sweep.step)
    #[arg(long, value_name = "SPEED")]
    pub step: Option<f64>,
    /// Sensor Hz per unit of speed (overrides sweep.hz_per_unit)
    #[arg(long, value_name = "HZ")]
    pub hz_per_unit: Option<f64>,
    /// Report format (overrides --json and output.format)
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,
    /// Fail with exit code 3 if any row's output period rises
    #[arg(long, action = ArgAction::SetTrue)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep a speed range through the calibration curve
    Sweep(SweepArgs),
    /// Convert a single period or frequency
    Convert {
        /// Input period in seconds
        #[arg(
            long,
            value_name = "SECONDS",
            conflicts_with = "frequency",
            required_unless_present = "frequency"
        )]
        period: Option<f64>,
        /// Input frequency in Hz
        #[arg(long, value_name = "HZ")]
        frequency: Option<f64>,
    },
    /// Print the built-in calibration table
    Table,
}
