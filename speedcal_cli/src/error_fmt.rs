//! Human-readable error descriptions and structured JSON error formatting.

use speedcal_core::CalibrationError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(ce) = err.downcast_ref::<CalibrationError>() {
        return match ce {
            CalibrationError::InvalidPeriod(p) => format!(
                "What happened: Input period {p} is outside the converter's domain.\nLikely causes: A zero, negative or non-finite --period/--frequency was given.\nHow to fix: Pass a positive period in seconds or a positive frequency in Hz."
            ),
            CalibrationError::DegenerateOutput {
                input_hz,
                output_hz,
            } => format!(
                "What happened: {input_hz} Hz mapped to {output_hz} Hz, which has no period.\nLikely causes: The input lies far outside the calibrated range and linear extrapolation crossed zero.\nHow to fix: Stay within the calibrated range or set conversion.extrapolation = \"clamp\"."
            ),
            CalibrationError::NonMonotonic {
                violations,
                first_speed,
            } => format!(
                "What happened: The output period rose at {violations} sweep rows, first at speed {first_speed}.\nLikely causes: The calibration table has a falling segment (table corruption).\nHow to fix: Check the calibration points; rerun without --strict to see every flagged row."
            ),
            CalibrationError::InvalidSweep(msg) => format!(
                "What happened: Invalid sweep ({msg}).\nLikely causes: Out-of-range --start/--end/--step/--hz-per-unit or [sweep] values.\nHow to fix: Use finite bounds, a positive step and a positive hz_per_unit."
            ),
            CalibrationError::TooFewPoints(_)
            | CalibrationError::NonFinitePoint { .. }
            | CalibrationError::NonIncreasingInput { .. } => format!(
                "What happened: The calibration table is malformed ({ce}).\nLikely causes: A build with edited calibration points.\nHow to fix: Restore strictly increasing, finite input frequencies."
            ),
        };
    }

    if let Some(te) = err.downcast_ref::<toml::de::Error>() {
        return format!(
            "What happened: The config file could not be parsed.\nLikely causes: TOML syntax error or an unknown enum value.\nHow to fix: Fix the file and rerun. Details: {}",
            te.message()
        );
    }

    // String-based heuristics for errors coming from config loading/validation
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.starts_with("read config") {
        let cause = err.root_cause();
        return format!(
            "What happened: Could not read the config file ({msg}).\nLikely causes: Wrong --config path or missing permissions. Cause: {cause}\nHow to fix: Check the path, or omit --config to use built-in defaults."
        );
    }

    if lower.contains("must be") || lower.contains("unreasonably") {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML or on the command line.\nHow to fix: Edit the config or flags, then rerun."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 strict monotonicity failure, 4 conversion error, 1 otherwise.
/// (clap exits with 2 on usage errors before we get here.)
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<CalibrationError>() {
        Some(CalibrationError::NonMonotonic { .. }) => 3,
        Some(CalibrationError::InvalidPeriod(_) | CalibrationError::DegenerateOutput { .. }) => 4,
        _ => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<CalibrationError>() {
        Some(CalibrationError::InvalidPeriod(_)) => "InvalidPeriod",
        Some(CalibrationError::DegenerateOutput { .. }) => "DegenerateOutput",
        Some(CalibrationError::NonMonotonic { .. }) => "NonMonotonic",
        Some(CalibrationError::InvalidSweep(_)) => "InvalidSweep",
        Some(_) => "InvalidTable",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let details = match err.downcast_ref::<CalibrationError>() {
        Some(CalibrationError::InvalidPeriod(p)) => Some(json!({ "period": p })),
        Some(CalibrationError::DegenerateOutput {
            input_hz,
            output_hz,
        }) => Some(json!({ "input_hz": input_hz, "output_hz": output_hz })),
        Some(CalibrationError::NonMonotonic {
            violations,
            first_speed,
        }) => Some(json!({ "violations": violations, "first_speed": first_speed })),
        _ => None,
    };
    let msg = humanize(err);
    match details {
        Some(d) => json!({ "reason": reason_name(err), "details": d, "message": msg }),
        None => json!({ "reason": reason_name(err), "message": msg }),
    }
    .to_string()
}
