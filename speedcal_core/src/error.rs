use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("calibration table needs at least two points, got {0}")]
    TooFewPoints(usize),
    #[error("calibration point {index} is not finite")]
    NonFinitePoint { index: usize },
    #[error("calibration input must be strictly increasing (index {index}: {prev} -> {next})")]
    NonIncreasingInput { index: usize, prev: f64, next: f64 },
    #[error("input period must be positive and finite, got {0}")]
    InvalidPeriod(f64),
    #[error("converted output frequency {output_hz} Hz is not positive (input {input_hz} Hz)")]
    DegenerateOutput { input_hz: f64, output_hz: f64 },
    #[error("output period rose at {violations} sweep rows (first at speed {first_speed})")]
    NonMonotonic { violations: usize, first_speed: f64 },
    #[error("invalid sweep: {0}")]
    InvalidSweep(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
