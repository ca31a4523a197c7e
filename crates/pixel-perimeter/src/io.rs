//! JSON configuration and report helpers for perimeter measurement.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::{LargestChain, PerimeterEstimator, StepCounts, VossepoelCoefficients};
use crate::pipeline::{ImageMeasurement, PipelineParams};

#[derive(thiserror::Error, Debug)]
pub enum MeasureIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_image_path() -> String {
    "image.jpg".to_string()
}

/// Configuration for one measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureConfig {
    #[serde(default = "default_image_path")]
    pub image_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub pipeline: PipelineParams,
    #[serde(default)]
    pub coefficients: VossepoelCoefficients,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            image_path: default_image_path(),
            output_path: None,
            pipeline: PipelineParams::default(),
            coefficients: VossepoelCoefficients::default(),
        }
    }
}

impl MeasureConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MeasureIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), MeasureIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("perimeter_report.json"))
    }

    pub fn build_estimator(&self) -> PerimeterEstimator {
        PerimeterEstimator::new(self.coefficients)
    }
}

/// One traced contour in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourReport {
    pub index: usize,
    pub num_points: usize,
    pub counts: StepCounts,
    pub perimeter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerimeterReport {
    pub image_path: String,
    #[serde(default)]
    pub config_path: Option<String>,
    pub coefficients: VossepoelCoefficients,
    #[serde(default)]
    pub image_size: Option<[usize; 2]>,
    #[serde(default)]
    pub threshold: Option<u8>,
    #[serde(default)]
    pub contours: Vec<ContourReport>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub largest: Option<LargestChain>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PerimeterReport {
    /// Build an empty report for the given input.
    pub fn new(cfg: &MeasureConfig, config_path: Option<&Path>) -> Self {
        Self {
            image_path: cfg.image_path.clone(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            coefficients: cfg.coefficients,
            image_size: None,
            threshold: None,
            contours: Vec::new(),
            total: None,
            largest: None,
            error: None,
        }
    }

    /// Populate report fields from a finished measurement.
    pub fn set_measurement(&mut self, m: &ImageMeasurement) {
        self.image_size = Some([m.width, m.height]);
        self.threshold = Some(m.threshold);
        self.contours = m
            .chains
            .iter()
            .zip(&m.measurements)
            .enumerate()
            .map(|(index, (chain, meas))| ContourReport {
                index,
                num_points: chain.len(),
                counts: meas.counts,
                perimeter: meas.perimeter,
            })
            .collect();
        self.total = m.summary.as_ref().map(|s| s.total);
        self.largest = m.summary.as_ref().map(|s| s.largest);
        self.error = None;
    }

    /// Record a failure.
    pub fn set_error(&mut self, err: impl fmt::Display) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MeasureIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), MeasureIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
