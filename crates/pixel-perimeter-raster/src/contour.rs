//! Pixel-precise contours of binary masks.
//!
//! Border following (Suzuki & Abe, 1985) is done by
//! `imageproc::contours::find_contours`. Every border pixel is emitted, with
//! no vertex simplification, so consecutive chain points (and the wraparound
//! pair) are always 8-adjacent.

#[cfg(feature = "tracing")]
use tracing::instrument;

use imageproc::contours::{find_contours, BorderType, Contour};
use pixel_perimeter_core::{Chain, LatticePoint};

use crate::image::BinaryImage;

/// One traced border.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracedBorder {
    pub chain: Chain,
    /// `true` for the border between a component and a hole inside it.
    pub is_hole: bool,
    /// Index (into the returned list) of the enclosing border, `None` when
    /// the border lies directly on the background around the image.
    pub parent: Option<usize>,
}

impl From<Contour<i32>> for TracedBorder {
    fn from(contour: Contour<i32>) -> Self {
        Self {
            chain: contour
                .points
                .iter()
                .map(|p| LatticePoint::new(p.x, p.y))
                .collect(),
            is_hole: contour.border_type == BorderType::Hole,
            parent: contour.parent,
        }
    }
}

/// Trace every outer and hole border of `mask`.
///
/// Borders are returned in the order their starting pixel is met by a
/// row-major scan.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(mask), fields(width = mask.width, height = mask.height))
)]
pub fn trace_borders(mask: &BinaryImage) -> Vec<TracedBorder> {
    let Some(luma) = mask.to_luma() else {
        log::warn!("mask {}x{} is too large to trace", mask.width, mask.height);
        return Vec::new();
    };
    let borders: Vec<TracedBorder> = find_contours::<i32>(&luma)
        .into_iter()
        .map(TracedBorder::from)
        .collect();

    log::debug!(
        "traced {} borders ({} holes)",
        borders.len(),
        borders.iter().filter(|b| b.is_hole).count()
    );
    borders
}

/// Outermost borders only: one chain per foreground component that is not
/// nested inside a hole of another component.
///
/// Chains come last-found first, i.e. in reverse row-major order of their
/// starting pixel, which is the order OpenCV's external retrieval mode
/// produces.
pub fn trace_external_contours(mask: &BinaryImage) -> Vec<Chain> {
    let mut chains: Vec<Chain> = trace_borders(mask)
        .into_iter()
        .filter(|b| !b.is_hole && b.parent.is_none())
        .map(|b| b.chain)
        .collect();
    chains.reverse();
    chains
}
