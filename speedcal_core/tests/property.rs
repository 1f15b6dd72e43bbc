use proptest::prelude::*;
use speedcal_core::util::{hz_from_period, period_from_hz};
use speedcal_core::{CalibrationTable, Interpolator};

fn out_hz(interp: &Interpolator, input_hz: f64) -> f64 {
    hz_from_period(interp.convert_period(period_from_hz(input_hz)).unwrap())
}

// Segments of the built-in table as half-open input ranges, the outer ones
// extended into extrapolation territory.
const SEGMENTS: [(f64, f64); 3] = [(0.5, 35.46), (35.46, 62.48), (62.48, 250.0)];

proptest! {
    #[test]
    fn linear_within_a_segment(seg in 0usize..3, t1 in 0.0f64..1.0, t2 in 0.0f64..1.0) {
        let (lo, hi) = SEGMENTS[seg];
        let span = hi - lo;
        // keep a little away from the upper breakpoint so both points share a segment
        let a = lo + t1 * span * 0.999;
        let b = lo + t2 * span * 0.999;
        let c = (a + b) / 2.0;
        let interp = Interpolator::default();
        let mid = (out_hz(&interp, a) + out_hz(&interp, b)) / 2.0;
        prop_assert!((out_hz(&interp, c) - mid).abs() < 1e-8, "a={} b={}", a, b);
    }

    #[test]
    fn continuous_at_breakpoints(which in 0usize..2, eps in 1e-9f64..1e-3) {
        let x = [35.46, 62.48][which];
        let interp = Interpolator::default();
        let below = out_hz(&interp, x - eps);
        let above = out_hz(&interp, x + eps);
        let max_slope = CalibrationTable::speedometer()
            .slopes()
            .into_iter()
            .fold(0.0f64, f64::max);
        prop_assert!((above - below).abs() <= 2.0 * max_slope * eps + 1e-9);
    }

    #[test]
    fn output_period_falls_as_input_frequency_rises(a in 0.1f64..400.0, d in 1e-3f64..50.0) {
        let interp = Interpolator::default();
        let p1 = interp.convert_period(period_from_hz(a)).unwrap();
        let p2 = interp.convert_period(period_from_hz(a + d)).unwrap();
        prop_assert!(p2 < p1);
    }
}
