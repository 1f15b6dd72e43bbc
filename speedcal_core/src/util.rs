//! Period/frequency helpers shared by the interpolator and the sweep.
//!
//! These are plain reciprocals and do not validate their input.

/// Frequency in Hz of a signal with the given period in seconds.
#[inline]
pub fn hz_from_period(period_s: f64) -> f64 {
    1.0 / period_s
}

/// Period in seconds of a signal with the given frequency in Hz.
#[inline]
pub fn period_from_hz(hz: f64) -> f64 {
    1.0 / hz
}

/// Sensor frequency for a speed, given the sensor's Hz-per-unit factor.
#[inline]
pub fn hz_from_speed(speed: f64, hz_per_unit: f64) -> f64 {
    speed * hz_per_unit
}

/// Speed for a sensor frequency, given the sensor's Hz-per-unit factor.
#[inline]
pub fn speed_from_hz(hz: f64, hz_per_unit: f64) -> f64 {
    hz / hz_per_unit
}
