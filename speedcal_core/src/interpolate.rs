//! Period-to-period conversion through the calibration table.
//!
//! The input period is turned into a frequency, mapped through the
//! piecewise-linear curve, and turned back into a period. Inside the table the
//! result lies exactly on the segment joining the two enclosing points.
//! Outside it the behavior follows [`Extrapolation`].

use crate::error::CalibrationError;
use crate::table::CalibrationTable;
use crate::util::{hz_from_period, period_from_hz};

/// What to do with inputs outside the table's points.
///
/// The segment between an anchor and the first measured point always follows
/// its line; `Clamp` only holds values beyond the first and last points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extrapolation {
    /// Continue the nearest segment's line (no clamping).
    #[default]
    Linear,
    /// Hold the output of the nearest end point.
    Clamp,
}

/// Index `i` of the upper point of the segment used for `input_hz`: the
/// smallest `i >= 1` with `input_hz < points[i].input_hz`, or the last index
/// when there is none. Inputs equal to a breakpoint select the segment above.
pub fn segment_for(table: &CalibrationTable, input_hz: f64) -> usize {
    let pts = table.points();
    let above = pts[1..].partition_point(|p| p.input_hz <= input_hz);
    (above + 1).min(pts.len() - 1)
}

/// Stateless converter over an immutable table.
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    table: CalibrationTable,
    extrapolation: Extrapolation,
}

impl Interpolator {
    pub fn new(table: CalibrationTable) -> Self {
        Self {
            table,
            extrapolation: Extrapolation::Linear,
        }
    }

    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// True when `input_hz` lies outside the measured input range, including
    /// the stretch covered only by the table's anchor.
    pub fn is_extrapolating(&self, input_hz: f64) -> bool {
        let (lo, hi) = self.table.calibrated_range();
        input_hz < lo || input_hz > hi
    }

    /// Map an input frequency to the corrected output frequency.
    pub fn convert_frequency(&self, input_hz: f64) -> f64 {
        let pts = self.table.points();
        if self.extrapolation == Extrapolation::Clamp {
            let first = pts[0];
            let last = pts[pts.len() - 1];
            if input_hz <= first.input_hz {
                return first.output_hz;
            }
            if input_hz >= last.input_hz {
                return last.output_hz;
            }
        }
        let i = segment_for(&self.table, input_hz);
        let lo = pts[i - 1];
        let hi = pts[i];
        let dx = hi.input_hz - lo.input_hz;
        let dy = hi.output_hz - lo.output_hz;
        (input_hz - lo.input_hz) / dx * dy + lo.output_hz
    }

    /// Convert an input period (seconds) into the corrected output period.
    ///
    /// Errors:
    /// - `InvalidPeriod` for zero, negative or non-finite periods.
    /// - `DegenerateOutput` when the mapped frequency is not a positive normal
    ///   number (only reachable through extrapolation, a custom table, or
    ///   periods so long their frequency underflows), since it has no
    ///   representable period.
    pub fn convert_period(&self, input_period: f64) -> Result<f64, CalibrationError> {
        if !(input_period.is_finite() && input_period > 0.0) {
            return Err(CalibrationError::InvalidPeriod(input_period));
        }
        let input_hz = hz_from_period(input_period);
        if self.is_extrapolating(input_hz) {
            tracing::debug!(
                input_hz,
                mode = ?self.extrapolation,
                "input outside calibrated range"
            );
        }
        let output_hz = self.convert_frequency(input_hz);
        // subnormal frequencies would overflow the reciprocal
        if !(output_hz.is_normal() && output_hz > 0.0) {
            return Err(CalibrationError::DegenerateOutput {
                input_hz,
                output_hz,
            });
        }
        Ok(period_from_hz(output_hz))
    }
}
