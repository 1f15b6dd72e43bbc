//! Piecewise-linear calibration table.

use crate::error::CalibrationError;

/// A known (input frequency, output frequency) correspondence, both in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalPoint {
    pub input_hz: f64,
    pub output_hz: f64,
}

impl CalPoint {
    pub const fn new(input_hz: f64, output_hz: f64) -> Self {
        Self {
            input_hz,
            output_hz,
        }
    }

    /// Slope of the segment running from `self` to `next`.
    #[inline]
    pub fn slope_to(&self, next: &CalPoint) -> f64 {
        (next.output_hz - self.output_hz) / (next.input_hz - self.input_hz)
    }
}

/// Built-in speedometer correction curve.
pub const SPEEDO_POINTS: [CalPoint; 4] = [
    CalPoint::new(0.0, 0.0),
    CalPoint::new(35.46, 29.55),
    CalPoint::new(62.48, 56.23),
    CalPoint::new(106.6, 91.68),
];

/// Ordered, immutable set of calibration points.
///
/// Construction guarantees at least two points, all finite, with strictly
/// increasing `input_hz`. Output values may be non-monotonic; see
/// [`CalibrationTable::is_monotonic_output`].
///
/// An anchored table treats its first point as a lower anchor (the stock
/// table's origin) rather than a measurement: it still bounds the lowest
/// segment, but the calibrated range starts at the second point.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    points: Vec<CalPoint>,
    anchored: bool,
}

impl CalibrationTable {
    pub fn new(points: Vec<CalPoint>) -> Result<Self, CalibrationError> {
        if points.len() < 2 {
            return Err(CalibrationError::TooFewPoints(points.len()));
        }
        for (index, p) in points.iter().enumerate() {
            if !(p.input_hz.is_finite() && p.output_hz.is_finite()) {
                return Err(CalibrationError::NonFinitePoint { index });
            }
        }
        for (i, w) in points.windows(2).enumerate() {
            if w[1].input_hz <= w[0].input_hz {
                return Err(CalibrationError::NonIncreasingInput {
                    index: i + 1,
                    prev: w[0].input_hz,
                    next: w[1].input_hz,
                });
            }
        }
        Ok(Self {
            points,
            anchored: false,
        })
    }

    /// Mark the first point as a lower anchor. Needs two measured points
    /// besides the anchor.
    pub fn with_anchor(mut self) -> Result<Self, CalibrationError> {
        if self.points.len() < 3 {
            return Err(CalibrationError::TooFewPoints(self.points.len()));
        }
        self.anchored = true;
        Ok(self)
    }

    /// The built-in four-point speedometer table, anchored at the origin.
    pub fn speedometer() -> Self {
        Self {
            points: SPEEDO_POINTS.to_vec(),
            anchored: true,
        }
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn points(&self) -> &[CalPoint] {
        &self.points
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// `(first, last)` measured input frequency; skips the anchor.
    pub fn calibrated_range(&self) -> (f64, f64) {
        let first = self.points[usize::from(self.anchored)].input_hz;
        let last = self.points[self.points.len() - 1].input_hz;
        (first, last)
    }

    /// Slope of every segment, lowest segment first.
    pub fn slopes(&self) -> Vec<f64> {
        self.points.windows(2).map(|w| w[0].slope_to(&w[1])).collect()
    }

    /// True when every segment has a strictly positive slope, i.e. a higher
    /// input frequency always maps to a higher output frequency.
    pub fn is_monotonic_output(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[1].output_hz > w[0].output_hz)
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::speedometer()
    }
}
