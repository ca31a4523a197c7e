//! Raster front end that turns grayscale images into pixel-precise chains.
//!
//! The pieces mirror a classic contour pipeline:
//! 1. [`gaussian_blur_5x5`] suppresses pixel noise,
//! 2. [`otsu_threshold`] + [`threshold_binary`] produce a foreground mask,
//! 3. [`trace_external_contours`] follows the outer border of every
//!    top-level component without simplifying it.
//!
//! The resulting chains feed `pixel-perimeter-core` directly.
//!
//! ```
//! use pixel_perimeter_raster::{trace_external_contours, BinaryImage};
//!
//! let mask = BinaryImage::from_ascii(&[".##.", ".##."]);
//! let chains = trace_external_contours(&mask);
//! assert_eq!(chains.len(), 1);
//! assert_eq!(chains[0].len(), 4);
//! ```

mod blur;
mod contour;
mod image;
mod threshold;

pub use blur::gaussian_blur_5x5;
pub use contour::{trace_borders, trace_external_contours, TracedBorder};
pub use image::{BinaryImage, GrayImage, GrayImageView, RasterError};
pub use threshold::{histogram, otsu_threshold, otsu_threshold_from_histogram, threshold_binary};
