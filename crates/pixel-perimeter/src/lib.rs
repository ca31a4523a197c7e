//! High-level facade crate for the `pixel-perimeter-*` workspace.
//!
//! This crate provides:
//! - re-exports of the estimator (`core`) and raster front end (`raster`)
//! - a decoder-independent pipeline from gray pixels to per-contour perimeters
//! - (feature-gated) helpers that load an image with the `image` crate and
//!   run the pipeline on it
//! - JSON config and report types used by the `pixel-perimeter` binary.
//!
//! ## Quickstart
//!
//! ```no_run
//! use pixel_perimeter::measure;
//! use pixel_perimeter::{PerimeterEstimator, PipelineParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let m = measure::measure_path(
//!     "shapes.png",
//!     &PipelineParams::default(),
//!     &PerimeterEstimator::default(),
//! )?;
//! if let Some(summary) = m.summary {
//!     println!("total {:.3}, largest #{}", summary.total, summary.largest.index);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `pixel_perimeter::core`: chains, chain codes, the Vossepoel estimator and batch reduction.
//! - `pixel_perimeter::raster`: blur, Otsu threshold and border following.
//! - `pixel_perimeter::pipeline`: gray view -> chains -> measurements.
//! - `pixel_perimeter::io`: `MeasureConfig` / `PerimeterReport` JSON files.
//! - `pixel_perimeter::measure` (feature `image`): the same from files or `image::GrayImage`.

pub use pixel_perimeter_core as core;
pub use pixel_perimeter_raster as raster;

pub use pixel_perimeter_core::{
    estimate_perimeter, reduce_batch, BatchSummary, Chain, LatticePoint, PerimeterEstimator,
    VossepoelCoefficients,
};

pub mod io;
pub mod pipeline;

pub use pipeline::{ImageMeasurement, PipelineParams};

#[cfg(feature = "image")]
pub mod measure;
