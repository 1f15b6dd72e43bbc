use rstest::rstest;
use speedcal_core::util::{hz_from_period, period_from_hz};
use speedcal_core::{CalPoint, CalibrationError, CalibrationTable, Extrapolation, Interpolator};

fn out_hz(interp: &Interpolator, input_hz: f64) -> f64 {
    hz_from_period(interp.convert_period(period_from_hz(input_hz)).unwrap())
}

#[rstest]
#[case(35.46, 29.55)]
#[case(62.48, 56.23)]
#[case(106.6, 91.68)]
fn calibration_points_reproduce_exactly(#[case] input_hz: f64, #[case] expected_hz: f64) {
    let interp = Interpolator::default();
    let got = out_hz(&interp, input_hz);
    assert!((got - expected_hz).abs() < 1e-9, "{input_hz} -> {got}");
}

#[test]
fn first_sweep_step_matches_hand_calculation() {
    // v = 1 km/h at 0.73 Hz per km/h, lowest segment anchored at (0, 0)
    let interp = Interpolator::default();
    let pin = 1.0 / 0.73;
    let pout = interp.convert_period(pin).unwrap();
    let expected_hz = 0.73 / 35.46 * 29.55;
    assert!((pin - 1.369_863).abs() < 1e-6);
    assert!((pout - 1.0 / expected_hz).abs() < 1e-12);
    assert!((pout - 1.643_836).abs() < 1e-6);
    let recovered = 1.0 / pout / 0.73;
    assert!((recovered - 0.8333).abs() < 1e-4);
}

#[test]
fn extrapolates_above_last_point_with_last_slope() {
    let interp = Interpolator::default();
    let slope = (91.68 - 56.23) / (106.6 - 62.48);
    let a = out_hz(&interp, 150.0);
    let b = out_hz(&interp, 200.0);
    assert!(((b - a) / 50.0 - slope).abs() < 1e-9);
    let expected = 56.23 + (150.0 - 62.48) * slope;
    assert!((a - expected).abs() < 1e-9);
    assert!(interp.is_extrapolating(150.0));
    assert!(!interp.is_extrapolating(100.0));
}

#[test]
fn extrapolates_below_first_point_with_first_slope() {
    let table = CalibrationTable::new(vec![
        CalPoint::new(10.0, 12.0),
        CalPoint::new(20.0, 20.0),
        CalPoint::new(30.0, 35.0),
    ])
    .unwrap();
    let interp = Interpolator::new(table);
    // slope 0.8 continued below 10 Hz
    assert!((out_hz(&interp, 5.0) - 8.0).abs() < 1e-9);
    assert!((out_hz(&interp, 1.0) - 4.8).abs() < 1e-9);
}

#[test]
fn clamp_policy_holds_ends() {
    let table = CalibrationTable::new(vec![
        CalPoint::new(10.0, 12.0),
        CalPoint::new(20.0, 20.0),
    ])
    .unwrap();
    let interp = Interpolator::new(table).with_extrapolation(Extrapolation::Clamp);
    assert!((out_hz(&interp, 2.0) - 12.0).abs() < 1e-9);
    assert!((out_hz(&interp, 99.0) - 20.0).abs() < 1e-9);
    assert!((out_hz(&interp, 15.0) - 16.0).abs() < 1e-9);
}

#[test]
fn zero_output_frequency_is_an_error() {
    // slope 1 through (10, 5): output reaches 0 Hz at 5 Hz input
    let table = CalibrationTable::new(vec![
        CalPoint::new(10.0, 5.0),
        CalPoint::new(20.0, 15.0),
    ])
    .unwrap();
    let interp = Interpolator::new(table);
    match interp.convert_period(period_from_hz(5.0)) {
        Err(CalibrationError::DegenerateOutput { output_hz, .. }) => {
            assert!(output_hz.abs() < 1e-12)
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(
        interp.convert_period(period_from_hz(4.0)),
        Err(CalibrationError::DegenerateOutput { .. })
    ));
}

#[rstest]
#[case(0.0)]
#[case(-0.5)]
#[case(f64::NAN)]
fn out_of_contract_periods_are_rejected(#[case] period: f64) {
    let err = Interpolator::default().convert_period(period).unwrap_err();
    assert!(matches!(err, CalibrationError::InvalidPeriod(_)));
    assert!(err.to_string().contains("positive and finite"));
}

#[test]
fn interpolator_is_shareable_across_threads() {
    let interp = std::sync::Arc::new(Interpolator::default());
    let handles: Vec<_> = (1..=4)
        .map(|k| {
            let interp = interp.clone();
            std::thread::spawn(move || interp.convert_period(1.0 / (k as f64 * 20.0)).unwrap())
        })
        .collect();
    let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (k, r) in results.iter().enumerate() {
        let expected = interp.convert_period(1.0 / ((k + 1) as f64 * 20.0)).unwrap();
        assert_eq!(*r, expected);
    }
}
