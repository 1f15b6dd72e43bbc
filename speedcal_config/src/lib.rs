#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the speedometer calibration tools.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Every section is optional; the defaults reproduce the stock sweep
//!   (1..300 km/h in 1 km/h steps at 0.73 Hz per km/h).
//! - The calibration table itself is built into `speedcal_core` and is not
//!   configurable here.
use eyre::WrapErr;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SweepCfg {
    /// First speed of the sweep (inclusive)
    pub start: f64,
    /// Upper bound of the sweep (exclusive)
    pub end: f64,
    /// Increment between consecutive speeds
    pub step: f64,
    /// Sensor frequency produced per unit of speed (Hz per km/h)
    pub hz_per_unit: f64,
    /// Seed for the "previous output period" used by the first delta
    pub initial_last_period: f64,
}

impl Default for SweepCfg {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 300.0,
            step: 1.0,
            hz_per_unit: 0.73,
            initial_last_period: 1000.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExtrapolationMode {
    /// Extend the nearest segment's slope past the table ends
    #[default]
    Linear,
    /// Hold the first/last calibrated output outside the table
    Clamp,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ConversionCfg {
    pub extrapolation: ExtrapolationMode,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Csv,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OutputCfg {
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub sweep: SweepCfg,
    pub conversion: ConversionCfg,
    pub output: OutputCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file. Validation is left to the caller.
pub fn load_file(path: &std::path::Path) -> eyre::Result<Config> {
    let text =
        std::fs::read_to_string(path).wrap_err_with(|| format!("read config {path:?}"))?;
    load_toml(&text).wrap_err_with(|| format!("invalid configuration in {path:?}"))
}

/// Accepted `logging.level` / `--log-level` values.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const ROTATIONS: [&str; 3] = ["never", "daily", "hourly"];

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Sweep
        let s = &self.sweep;
        if !s.start.is_finite() {
            eyre::bail!("sweep.start must be finite");
        }
        if !s.end.is_finite() {
            eyre::bail!("sweep.end must be finite");
        }
        if !(s.step.is_finite() && s.step > 0.0) {
            eyre::bail!("sweep.step must be > 0");
        }
        if s.start <= 0.0 {
            eyre::bail!("sweep.start must be > 0 (speed maps to a period)");
        }
        if s.end < s.start {
            eyre::bail!("sweep.end must be >= sweep.start");
        }
        if ((s.end - s.start) / s.step) > 1_000_000.0 {
            eyre::bail!("sweep is unreasonably long (>1e6 rows)");
        }
        if !(s.hz_per_unit.is_finite() && s.hz_per_unit > 0.0) {
            eyre::bail!("sweep.hz_per_unit must be > 0");
        }
        if !s.initial_last_period.is_finite() {
            eyre::bail!("sweep.initial_last_period must be finite");
        }

        // Logging
        if let Some(level) = &self.logging.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.level must be one of error|warn|info|debug|trace");
        }
        if let Some(rot) = &self.logging.rotation
            && !ROTATIONS.contains(&rot.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }
        if matches!(&self.logging.file, Some(f) if f.trim().is_empty()) {
            eyre::bail!("logging.file must not be empty when set");
        }

        // Conversion/output: serde restricts to known variants

        Ok(())
    }
}
