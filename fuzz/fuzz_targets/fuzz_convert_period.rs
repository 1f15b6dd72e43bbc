#![no_main]
use libfuzzer_sys::fuzz_target;
use speedcal_core::{CalibrationError, Interpolator};

fuzz_target!(|period: f64| {
    let interp = Interpolator::default();
    match interp.convert_period(period) {
        Ok(out) => assert!(out.is_finite() && out > 0.0),
        Err(CalibrationError::InvalidPeriod(_)) => assert!(!(period.is_finite() && period > 0.0)),
        Err(CalibrationError::DegenerateOutput { .. }) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
});
