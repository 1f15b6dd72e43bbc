//! Tracing subscriber setup: console (pretty or JSON) plus an optional file sink.

use speedcal_config::Logging;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default console level when neither the CLI nor the config sets one. Kept
/// at warn so stdout/stderr carry the report and nothing else.
const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber. The returned guard flushes the file sink
/// when dropped and must outlive every event the caller wants persisted.
pub fn init_tracing(
    cli_level: Option<&str>,
    json: bool,
    cfg: &Logging,
) -> eyre::Result<Option<WorkerGuard>> {
    let level = cli_level
        .or(cfg.level.as_deref())
        .unwrap_or(DEFAULT_LEVEL)
        .to_ascii_lowercase();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&level)
            .map_err(|e| eyre::eyre!("invalid log level {level:?}: {e}"))?,
    };

    let (pretty, json_layer) = if json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false);
        (None, Some(layer))
    } else {
        let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
        (Some(layer), None)
    };

    let mut guard = None;
    let file_layer = match cfg.file.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file has no file name: {path:?}"))?;
            let appender = match cfg.rotation.as_deref().map(str::to_ascii_lowercase).as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, g) = tracing_appender::non_blocking(appender);
            guard = Some(g);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("init tracing: {e}"))?;
    Ok(guard)
}
