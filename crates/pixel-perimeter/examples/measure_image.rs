use pixel_perimeter::io::{MeasureConfig, PerimeterReport};
use pixel_perimeter::measure;

#[cfg(feature = "tracing")]
use pixel_perimeter::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: measure_image <image_path> [config.json]");
        return Ok(());
    };
    let cfg = match std::env::args().nth(2) {
        Some(cfg_path) => MeasureConfig::load_json(cfg_path)?,
        None => MeasureConfig::default(),
    };

    let m = measure::measure_path(&path, &cfg.pipeline, &cfg.build_estimator())?;
    println!(
        "{} contours, otsu threshold {}",
        m.chains.len(),
        m.threshold
    );

    let mut report = PerimeterReport::new(&cfg, None);
    report.image_path = path;
    report.set_measurement(&m);
    report.write_json(cfg.output_path())?;
    println!("report written to {}", cfg.output_path().display());

    Ok(())
}
