#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Speedometer calibration core (no I/O).
//!
//! ## Architecture
//!
//! - **Table**: ordered `(input Hz, output Hz)` points (`table` module)
//! - **Interpolation**: period → frequency → piecewise-linear map → period
//!   (`interpolate` module)
//! - **Sweep**: speed range driver with monotonicity tracking (`sweep` module)
//! - **Conversions**: `From` impls for `speedcal_config` types
//!
//! Everything here is pure; an [`Interpolator`] can be shared freely between
//! threads.

pub mod conversions;
pub mod error;
pub mod interpolate;
pub mod sweep;
pub mod table;
pub mod util;

pub use error::CalibrationError;
pub use interpolate::{Extrapolation, Interpolator, segment_for};
pub use sweep::{Sweep, SweepCfg, SweepRow, SweepSummary, run_sweep, summarize};
pub use table::{CalPoint, CalibrationTable, SPEEDO_POINTS};
