//! Logging backends for the command-line tools.
//!
//! Library code only talks to the `log` facade. Binaries install one backend
//! at startup: [`init_with_level`] for plain stderr lines, or, with the
//! `tracing` feature, [`init_tracing`]. Both keep records from the
//! `pixel_perimeter*` crates and hide chatter from decoders and other
//! dependencies unless asked for.

use std::fmt::Display;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const WORKSPACE_TARGET: &str = "pixel_perimeter";

#[cfg(feature = "tracing")]
const DEFAULT_DIRECTIVES: &str =
    "warn,pixel_perimeter=info,pixel_perimeter_core=info,pixel_perimeter_raster=info";

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl StderrLogger {
    /// Dependency records pass only at `Trace`.
    fn accepts(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && (self.level == LevelFilter::Trace
                || metadata.target().starts_with(WORKSPACE_TARGET))
    }
}

/// `   0.012s DEBUG contour: message`, tagged with the innermost module.
fn format_line(elapsed_secs: f64, level: Level, target: &str, message: impl Display) -> String {
    let module = target.rsplit("::").next().unwrap_or(target);
    format!("{elapsed_secs:>8.3}s {level:<5} {module}: {message}")
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.accepts(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.accepts(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the given level filter.
///
/// Only the first call installs the logger; later calls are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` subscriber on stderr.
///
/// `RUST_LOG` takes precedence; otherwise the workspace crates log at `info`
/// and everything else at `warn`. With `json = true` events and closed spans
/// are emitted as flat JSON lines.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if json {
        let _ = builder.json().flatten_event(true).finish().try_init();
    } else {
        let _ = builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
