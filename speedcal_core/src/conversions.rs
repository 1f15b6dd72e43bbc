//! `From` implementations bridging `speedcal_config` types to `speedcal_core` types.

use crate::interpolate::{Extrapolation, Interpolator};
use crate::sweep::SweepCfg;
use crate::table::CalibrationTable;

// ── SweepCfg ─────────────────────────────────────────────────────────────────

impl From<&speedcal_config::SweepCfg> for SweepCfg {
    fn from(c: &speedcal_config::SweepCfg) -> Self {
        Self {
            start: c.start,
            end: c.end,
            step: c.step,
            hz_per_unit: c.hz_per_unit,
            initial_last_period: c.initial_last_period,
        }
    }
}

// ── Extrapolation ────────────────────────────────────────────────────────────

impl From<speedcal_config::ExtrapolationMode> for Extrapolation {
    fn from(m: speedcal_config::ExtrapolationMode) -> Self {
        match m {
            speedcal_config::ExtrapolationMode::Linear => Self::Linear,
            speedcal_config::ExtrapolationMode::Clamp => Self::Clamp,
        }
    }
}

// ── Interpolator ─────────────────────────────────────────────────────────────

/// Built-in table with the configured extrapolation policy.
impl From<&speedcal_config::ConversionCfg> for Interpolator {
    fn from(c: &speedcal_config::ConversionCfg) -> Self {
        Interpolator::new(CalibrationTable::speedometer())
            .with_extrapolation(c.extrapolation.into())
    }
}
