//! Gray image -> chains -> perimeters, independent of any image decoder.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::core::{summarize, BatchSummary, Chain, PerimeterEstimator, PerimeterMeasurement};
use crate::raster::{
    gaussian_blur_5x5, otsu_threshold, threshold_binary, trace_external_contours, GrayImageView,
};

fn default_blur() -> bool {
    true
}

/// Front-end settings for turning a gray image into chains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Apply the 5x5 Gaussian blur before thresholding.
    #[serde(default = "default_blur")]
    pub blur: bool,
    /// Drop traced chains with fewer points than this. `0` keeps everything,
    /// including single-pixel specks.
    #[serde(default)]
    pub min_chain_len: usize,
    /// Estimate chains on the rayon pool (needs the `rayon` feature).
    #[serde(default)]
    pub parallel: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            blur: default_blur(),
            min_chain_len: 0,
            parallel: false,
        }
    }
}

/// Foreground chains of one image.
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub threshold: u8,
    pub chains: Vec<Chain>,
}

/// Blur (optionally), Otsu-threshold and trace the outer border of every
/// top-level foreground component.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width, height = img.height))
)]
pub fn extract_chains(img: &GrayImageView<'_>, params: &PipelineParams) -> Segmentation {
    let blurred;
    let src = if params.blur {
        blurred = gaussian_blur_5x5(img);
        blurred.view()
    } else {
        *img
    };

    let threshold = otsu_threshold(&src);
    let mask = threshold_binary(&src, threshold);
    let mut chains = trace_external_contours(&mask);
    let traced = chains.len();
    chains.retain(|c| c.len() >= params.min_chain_len);
    log::debug!(
        "otsu threshold {threshold}, {} foreground pixels, {traced} contours ({} kept)",
        mask.count_foreground(),
        chains.len()
    );

    Segmentation { threshold, chains }
}

/// Per-chain measurements in input order.
pub fn measure_chains(
    chains: &[Chain],
    estimator: &PerimeterEstimator,
    parallel: bool,
) -> Vec<PerimeterMeasurement> {
    if parallel {
        return measure_parallel(chains, estimator);
    }
    chains.iter().map(|c| estimator.measure(c.points())).collect()
}

#[cfg(feature = "rayon")]
fn measure_parallel(chains: &[Chain], estimator: &PerimeterEstimator) -> Vec<PerimeterMeasurement> {
    use rayon::prelude::*;

    chains
        .par_iter()
        .map(|c| estimator.measure(c.points()))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn measure_parallel(chains: &[Chain], estimator: &PerimeterEstimator) -> Vec<PerimeterMeasurement> {
    log::warn!("built without the `rayon` feature, measuring sequentially");
    chains.iter().map(|c| estimator.measure(c.points())).collect()
}

/// Everything measured on one image.
#[derive(Clone, Debug)]
pub struct ImageMeasurement {
    pub width: usize,
    pub height: usize,
    pub threshold: u8,
    pub chains: Vec<Chain>,
    pub measurements: Vec<PerimeterMeasurement>,
    /// `None` when no contour was found.
    pub summary: Option<BatchSummary>,
}

/// Run the full pipeline on a gray image view.
pub fn measure_gray_view(
    img: &GrayImageView<'_>,
    params: &PipelineParams,
    estimator: &PerimeterEstimator,
) -> ImageMeasurement {
    let Segmentation { threshold, chains } = extract_chains(img, params);
    let measurements = measure_chains(&chains, estimator, params.parallel);
    let summary = summarize(measurements.iter().map(|m| m.perimeter).collect());
    ImageMeasurement {
        width: img.width,
        height: img.height,
        threshold,
        chains,
        measurements,
        summary,
    }
}
