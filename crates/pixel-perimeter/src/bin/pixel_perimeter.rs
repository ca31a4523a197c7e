//! pixel-perimeter CLI: measure the Vossepoel perimeter of every external
//! contour in an image.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use pixel_perimeter::io::{MeasureConfig, MeasureIoError, PerimeterReport};
use pixel_perimeter::measure::{measure_path, MeasureError};
use pixel_perimeter::ImageMeasurement;

#[derive(Parser)]
#[command(name = "pixel-perimeter")]
#[command(about = "Estimate contour perimeters of the bright shapes in an image")]
#[command(version)]
struct Cli {
    /// Input image. Overrides `image_path` from `--config` (default `image.jpg`).
    image: Option<PathBuf>,

    /// JSON measurement config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON report to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Threshold the raw gray image without the 5x5 Gaussian blur.
    #[arg(long)]
    no_blur: bool,

    /// Measure contours on the rayon pool (feature `rayon`).
    #[arg(long)]
    parallel: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("cannot read image: {}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: MeasureError,
    },
    #[error("failed to load config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: MeasureIoError,
    },
    #[error("failed to write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: MeasureIoError,
    },
    #[error(transparent)]
    Measure(#[from] MeasureError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::UnreadableImage { .. } => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.into());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let CliError::UnreadableImage { source, .. } = &err {
                log::debug!("{source}");
            }
            eprintln!("Error: {err}");
            err.exit_code()
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) {
    let _ = tracing_log::LogTracer::init_with_filter(level);
    pixel_perimeter::core::init_tracing(false);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) {
    let _ = pixel_perimeter::core::init_with_level(level);
}

fn load_config(cli: &Cli) -> Result<MeasureConfig, CliError> {
    let mut cfg = match &cli.config {
        Some(path) => MeasureConfig::load_json(path).map_err(|source| CliError::Config {
            path: path.clone(),
            source,
        })?,
        None => MeasureConfig::default(),
    };
    if let Some(image) = &cli.image {
        cfg.image_path = image.to_string_lossy().into_owned();
    }
    if cli.no_blur {
        cfg.pipeline.blur = false;
    }
    if cli.parallel {
        cfg.pipeline.parallel = true;
    }
    Ok(cfg)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let cfg = load_config(cli)?;
    let report_path = cli
        .report
        .clone()
        .or_else(|| cfg.output_path.as_ref().map(|_| cfg.output_path()));
    let mut report = PerimeterReport::new(&cfg, cli.config.as_deref());

    let image_path = PathBuf::from(&cfg.image_path);
    log::info!("measuring {}", image_path.display());
    let result = measure_path(&image_path, &cfg.pipeline, &cfg.build_estimator());

    let measurement = match result {
        Ok(m) => m,
        Err(source) => {
            report.set_error(&source);
            if let Some(path) = &report_path {
                if let Err(err) = write_report(&report, path) {
                    log::error!("{err}");
                }
            }
            if source.is_unreadable_image() {
                return Err(CliError::UnreadableImage {
                    path: image_path,
                    source,
                });
            }
            return Err(source.into());
        }
    };

    print_measurement(&measurement);

    if let Some(path) = &report_path {
        report.set_measurement(&measurement);
        write_report(&report, path)?;
        log::info!("report written to {}", path.display());
    }
    Ok(())
}

fn write_report(report: &PerimeterReport, path: &Path) -> Result<(), CliError> {
    report.write_json(path).map_err(|source| CliError::Report {
        path: path.to_path_buf(),
        source,
    })
}

fn print_measurement(m: &ImageMeasurement) {
    let Some(summary) = &m.summary else {
        println!("No contours found.");
        return;
    };

    for (i, p) in summary.perimeters.iter().enumerate() {
        println!("Contour {i} perimeter (Vossepoel): {}", format_general(*p));
    }
    println!(
        "Total perimeter (sum of all contours): {}",
        format_general(summary.total)
    );
    println!(
        "Largest contour index: {} perimeter: {}",
        summary.largest.index,
        format_general(summary.largest.perimeter)
    );
}

/// Six significant digits with trailing zeros removed, like C's `%g`.
fn format_general(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let sci = format!("{v:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..6).contains(&exp) {
        let decimals = (5 - exp) as usize;
        trim_fraction(format!("{v:.decimals$}"))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa.to_string()),
            exp.abs()
        )
    }
}

fn trim_fraction(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
