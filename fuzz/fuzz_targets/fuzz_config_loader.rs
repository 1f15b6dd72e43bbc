#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse errors and validation errors are fine; panics are not.
    if let Ok(cfg) = toml::from_str::<speedcal_config::Config>(data) {
        if cfg.validate().is_ok() {
            // A validated config must yield a constructible sweep.
            let interp: speedcal_core::Interpolator = (&cfg.conversion).into();
            let sweep: speedcal_core::SweepCfg = (&cfg.sweep).into();
            assert!(speedcal_core::Sweep::new(&interp, sweep).is_ok());
        }
    }
});
