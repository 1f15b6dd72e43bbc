#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! `speedcal`: run the speedometer calibration curve from the command line.

mod cli;
mod error_fmt;
mod logging;
mod report;

use clap::Parser;
use cli::{Cli, Commands, JSON_MODE, SweepArgs};
use eyre::WrapErr;
use speedcal_config::{Config, OutputFormat};
use speedcal_core::util::{hz_from_period, period_from_hz};
use speedcal_core::{Interpolator, Sweep, SweepCfg, SweepSummary, segment_for};

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&e));
        } else {
            eprintln!("{}", error_fmt::humanize(&e));
        }
        std::process::exit(error_fmt::exit_code_for_error(&e));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => speedcal_config::load_file(path)?,
        None => Config::default(),
    };

    let cmd = cli
        .cmd
        .unwrap_or_else(|| Commands::Sweep(SweepArgs::default()));
    if let Commands::Sweep(args) = &cmd {
        apply_sweep_overrides(&mut cfg, args);
    }
    cfg.validate()?;

    let _log_guard = logging::init_tracing(cli.log_level.as_deref(), cli.json, &cfg.logging)?;
    let interp: Interpolator = (&cfg.conversion).into();

    match cmd {
        Commands::Sweep(args) => run_sweep(&cfg, &interp, &args, cli.json),
        Commands::Convert { period, frequency } => {
            let input_period = match (period, frequency) {
                (Some(p), _) => p,
                (None, Some(f)) => period_from_hz(f),
                (None, None) => eyre::bail!("either --period or --frequency is required"),
            };
            run_convert(&interp, input_period, cli.json)
        }
        Commands::Table => {
            print_table(&interp, cli.json);
            Ok(())
        }
    }
}

fn apply_sweep_overrides(cfg: &mut Config, args: &SweepArgs) {
    let s = &mut cfg.sweep;
    if let Some(v) = args.start {
        s.start = v;
    }
    if let Some(v) = args.end {
        s.end = v;
    }
    if let Some(v) = args.step {
        s.step = v;
    }
    if let Some(v) = args.hz_per_unit {
        s.hz_per_unit = v;
    }
}

fn run_sweep(
    cfg: &Config,
    interp: &Interpolator,
    args: &SweepArgs,
    json: bool,
) -> eyre::Result<()> {
    // --format beats --json beats [output] format
    let format = args
        .format
        .map(OutputFormat::from)
        .or(json.then_some(OutputFormat::Jsonl))
        .unwrap_or(cfg.output.format);
    let sweep_cfg: SweepCfg = (&cfg.sweep).into();
    tracing::info!(
        start = sweep_cfg.start,
        end = sweep_cfg.end,
        step = sweep_cfg.step,
        hz_per_unit = sweep_cfg.hz_per_unit,
        ?format,
        "sweep start"
    );

    let stdout = std::io::stdout();
    let mut sink = report::sink_for(format, stdout.lock());
    let mut summary = SweepSummary::default();
    for item in Sweep::new(interp, sweep_cfg)? {
        let row = item.wrap_err_with(|| format!("sweep failed after {} rows", summary.rows))?;
        if row.violation {
            tracing::warn!(
                speed = row.speed,
                output_period = row.output_period,
                delta = row.delta,
                "output period rose"
            );
        }
        sink.row(&row)?;
        summary.record(&row);
    }
    sink.finish(&summary)?;
    tracing::info!(
        rows = summary.rows,
        violations = summary.violations,
        "sweep complete"
    );

    if args.strict {
        summary.ensure_monotonic()?;
    }
    Ok(())
}

fn run_convert(interp: &Interpolator, input_period: f64, json: bool) -> eyre::Result<()> {
    let output_period = interp.convert_period(input_period)?;
    let input_hz = hz_from_period(input_period);
    let output_hz = hz_from_period(output_period);
    let segment = segment_for(interp.table(), input_hz);
    let extrapolated = interp.is_extrapolating(input_hz);
    tracing::debug!(input_period, output_period, segment, "converted");
    if json {
        println!(
            "{}",
            serde_json::json!({
                "input_period": input_period,
                "input_hz": input_hz,
                "output_period": output_period,
                "output_hz": output_hz,
                "segment": segment,
                "extrapolated": extrapolated,
            })
        );
    } else {
        let note = if extrapolated { " (extrapolated)" } else { "" };
        println!(
            "input: {input_period:.6} s ({input_hz:.4} Hz) -> output: {output_period:.6} s ({output_hz:.4} Hz), segment {segment}{note}"
        );
    }
    Ok(())
}

fn print_table(interp: &Interpolator, json: bool) {
    let table = interp.table();
    let slopes = table.slopes();
    if json {
        let points: Vec<_> = table
            .points()
            .iter()
            .map(|p| serde_json::json!({ "input_hz": p.input_hz, "output_hz": p.output_hz }))
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "points": points,
                "slopes": slopes,
                "extrapolation": format!("{:?}", interp.extrapolation()).to_lowercase(),
            })
        );
        return;
    }
    println!("{:>3}  {:>10}  {:>10}  {:>8}", "#", "input_hz", "output_hz", "slope");
    for (i, p) in table.points().iter().enumerate() {
        // slope of the segment ending at this point
        let slope = i
            .checked_sub(1)
            .and_then(|j| slopes.get(j))
            .map(|s| format!("{s:8.4}"))
            .unwrap_or_else(|| format!("{:>8}", "-"));
        println!("{i:>3}  {:>10.2}  {:>10.2}  {slope}", p.input_hz, p.output_hz);
    }
}
