//! Speed sweep driver.
//!
//! Walks a range of speeds, converts each speed's sensor period through an
//! [`Interpolator`], and reports the corrected period alongside the change
//! from the previous row. Output periods are expected to fall as speed rises;
//! a row whose period exceeds the previous one is flagged as a violation but
//! the sweep carries on.

use crate::error::CalibrationError;
use crate::interpolate::Interpolator;
use crate::util::{hz_from_period, hz_from_speed, period_from_hz, speed_from_hz};
use eyre::WrapErr;

#[derive(Debug, Clone)]
pub struct SweepCfg {
    /// First speed (inclusive)
    pub start: f64,
    /// Upper bound (exclusive)
    pub end: f64,
    pub step: f64,
    /// Sensor Hz per unit of speed
    pub hz_per_unit: f64,
    /// Previous-period seed for the first row's delta
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

impl SweepCfg {
    fn check(&self) -> Result<(), CalibrationError> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(CalibrationError::InvalidSweep("bounds must be finite"));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CalibrationError::InvalidSweep("step must be > 0"));
        }
        if !(self.hz_per_unit.is_finite() && self.hz_per_unit > 0.0) {
            return Err(CalibrationError::InvalidSweep("hz_per_unit must be > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRow {
    /// Nominal speed fed into the sensor model
    pub speed: f64,
    /// Corrected speed read back from the output period
    pub recovered_speed: f64,
    pub input_period: f64,
    pub output_period: f64,
    /// Previous output period minus this one
    pub delta: f64,
    /// Output period rose compared to the previous row
    pub violation: bool,
}

/// Iterator over the rows of a sweep.
///
/// Yields `Err` for a speed whose conversion fails; the previous-period
/// tracking is left untouched in that case.
pub struct Sweep<'a> {
    interp: &'a Interpolator,
    cfg: SweepCfg,
    k: u64,
    last_period: f64,
}

impl<'a> Sweep<'a> {
    pub fn new(interp: &'a Interpolator, cfg: SweepCfg) -> Result<Self, CalibrationError> {
        cfg.check()?;
        let last_period = cfg.initial_last_period;
        Ok(Self {
            interp,
            cfg,
            k: 0,
            last_period,
        })
    }

    fn row_for(&mut self, speed: f64) -> Result<SweepRow, CalibrationError> {
        let input_period = period_from_hz(hz_from_speed(speed, self.cfg.hz_per_unit));
        let output_period = self.interp.convert_period(input_period)?;
        let delta = self.last_period - output_period;
        let violation = output_period > self.last_period;
        self.last_period = output_period;
        Ok(SweepRow {
            speed,
            recovered_speed: speed_from_hz(hz_from_period(output_period), self.cfg.hz_per_unit),
            input_period,
            output_period,
            delta,
            violation,
        })
    }
}

impl Iterator for Sweep<'_> {
    type Item = Result<SweepRow, CalibrationError>;

    fn next(&mut self) -> Option<Self::Item> {
        // start + k*step rather than repeated addition so long sweeps don't drift
        let speed = self.cfg.start + (self.k as f64) * self.cfg.step;
        if speed >= self.cfg.end {
            return None;
        }
        self.k += 1;
        Some(self.row_for(speed))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepSummary {
    pub rows: usize,
    pub violations: usize,
    pub first_violation_speed: Option<f64>,
}

impl SweepSummary {
    pub fn record(&mut self, row: &SweepRow) {
        self.rows += 1;
        if row.violation {
            self.violations += 1;
            self.first_violation_speed.get_or_insert(row.speed);
        }
    }

    pub fn is_monotonic(&self) -> bool {
        self.violations == 0
    }

    /// Turn flagged rows into a hard error, for callers that treat a rising
    /// output period as table corruption.
    pub fn ensure_monotonic(&self) -> Result<(), CalibrationError> {
        match self.first_violation_speed {
            Some(first_speed) => Err(CalibrationError::NonMonotonic {
                violations: self.violations,
                first_speed,
            }),
            None => Ok(()),
        }
    }
}

pub fn summarize(rows: &[SweepRow]) -> SweepSummary {
    let mut s = SweepSummary::default();
    for r in rows {
        s.record(r);
    }
    s
}

/// Run a whole sweep, stopping at the first conversion failure.
pub fn run_sweep(
    interp: &Interpolator,
    cfg: SweepCfg,
) -> crate::error::Result<(Vec<SweepRow>, SweepSummary)> {
    let mut rows = Vec::new();
    for item in Sweep::new(interp, cfg)? {
        let row = item.wrap_err_with(|| format!("sweep failed after {} rows", rows.len()))?;
        rows.push(row);
    }
    let summary = summarize(&rows);
    Ok((rows, summary))
}
