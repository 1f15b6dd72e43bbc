use speedcal_core::{
    CalPoint, CalibrationError, CalibrationTable, Interpolator, Sweep, SweepCfg, run_sweep,
    summarize,
};

#[test]
fn stock_sweep_is_monotonic() {
    let interp = Interpolator::default();
    let (rows, summary) = run_sweep(&interp, SweepCfg::default()).unwrap();
    assert_eq!(rows.len(), 299);
    assert_eq!(summary.rows, 299);
    assert!(summary.is_monotonic(), "violations: {summary:?}");
    assert!(summary.ensure_monotonic().is_ok());
    assert_eq!(rows.first().map(|r| r.speed), Some(1.0));
    assert_eq!(rows.last().map(|r| r.speed), Some(299.0));
}

#[test]
fn first_row_values() {
    let interp = Interpolator::default();
    let row = Sweep::new(&interp, SweepCfg::default())
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(format!("{:.6}", row.input_period), "1.369863");
    assert_eq!(format!("{:.6}", row.output_period), "1.643836");
    assert_eq!(format!("{:4.1}", row.recovered_speed), " 0.8");
}

#[test]
fn deltas_chain_between_rows() {
    let interp = Interpolator::default();
    let (rows, _) = run_sweep(&interp, SweepCfg::default()).unwrap();
    for w in rows.windows(2) {
        assert!((w[1].delta - (w[0].output_period - w[1].output_period)).abs() < 1e-15);
        assert!(w[1].delta > 0.0);
    }
}

#[test]
fn corrupted_table_is_flagged_but_not_fatal() {
    // Output dips between 40 and 60 Hz input
    let table = CalibrationTable::new(vec![
        CalPoint::new(0.0, 0.0),
        CalPoint::new(40.0, 40.0),
        CalPoint::new(60.0, 30.0),
        CalPoint::new(120.0, 100.0),
    ])
    .unwrap();
    let interp = Interpolator::new(table);
    let cfg = SweepCfg {
        end: 150.0,
        ..SweepCfg::default()
    };
    let (rows, summary) = run_sweep(&interp, cfg).unwrap();
    assert_eq!(rows.len(), 149);
    assert!(!summary.is_monotonic());
    // 55 km/h (40.15 Hz) is the first point past the peak but still above
    // 54 km/h's output; 56 km/h is the first to drop below its predecessor
    assert_eq!(summary.first_violation_speed, Some(56.0));
    assert_eq!(summary, summarize(&rows));
    match summary.ensure_monotonic() {
        Err(CalibrationError::NonMonotonic {
            violations,
            first_speed,
        }) => {
            assert_eq!(violations, summary.violations);
            assert_eq!(first_speed, 56.0);
        }
        other => panic!("unexpected: {other:?}"),
    }
    let flagged: Vec<_> = rows.iter().filter(|r| r.violation).collect();
    assert!(flagged.iter().all(|r| r.delta < 0.0));
}

#[test]
fn conversion_failure_stops_run_sweep() {
    let table = CalibrationTable::new(vec![
        CalPoint::new(10.0, 5.0),
        CalPoint::new(20.0, 15.0),
    ])
    .unwrap();
    let interp = Interpolator::new(table);
    let err = run_sweep(&interp, SweepCfg::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CalibrationError>(),
        Some(CalibrationError::DegenerateOutput { .. })
    ));
    assert!(format!("{err}").contains("sweep failed after 0 rows"));
}

#[test]
fn fractional_steps_do_not_drift() {
    let interp = Interpolator::default();
    let cfg = SweepCfg {
        start: 1.0,
        end: 2.0,
        step: 0.1,
        ..SweepCfg::default()
    };
    let speeds: Vec<f64> = Sweep::new(&interp, cfg)
        .unwrap()
        .map(|r| r.unwrap().speed)
        .collect();
    assert_eq!(speeds.len(), 10);
    assert!((speeds[9] - 1.9).abs() < 1e-12);
}
