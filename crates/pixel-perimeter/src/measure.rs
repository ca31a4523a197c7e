use std::path::Path;

use image::ImageReader;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::core::PerimeterEstimator;
use crate::pipeline::{measure_gray_view, ImageMeasurement, PipelineParams};
use crate::raster::{GrayImageView, RasterError};

/// Errors produced by the image-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum MeasureError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Raster(#[from] RasterError),
}

impl MeasureError {
    /// `true` when the input file could not be opened or decoded.
    pub fn is_unreadable_image(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Image(_))
    }
}

/// Open and decode an image, converting it to 8-bit luma.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, MeasureError> {
    Ok(ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_luma8())
}

/// Borrow an `image::GrayImage` as a raster view.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Blur, threshold, trace and measure an already decoded image.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, params, estimator),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn measure_image(
    img: &::image::GrayImage,
    params: &PipelineParams,
    estimator: &PerimeterEstimator,
) -> ImageMeasurement {
    measure_gray_view(&gray_view(img), params, estimator)
}

/// Load an image from disk and measure every external contour in it.
pub fn measure_path(
    path: impl AsRef<Path>,
    params: &PipelineParams,
    estimator: &PerimeterEstimator,
) -> Result<ImageMeasurement, MeasureError> {
    let path = path.as_ref();
    let img = load_gray(path)?;
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(measure_image(&img, params, estimator))
}

/// Measure a borrowed row-major grayscale buffer without copying it.
pub fn measure_from_gray_u8(
    width: usize,
    height: usize,
    pixels: &[u8],
    params: &PipelineParams,
    estimator: &PerimeterEstimator,
) -> Result<ImageMeasurement, MeasureError> {
    let view = GrayImageView::new(width, height, pixels)?;
    Ok(measure_gray_view(&view, params, estimator))
}
