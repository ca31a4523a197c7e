//! Global Otsu thresholding.

use crate::image::{BinaryImage, GrayImageView};

/// 256-bin intensity histogram.
pub fn histogram(img: &GrayImageView<'_>) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for &v in img.data {
        hist[v as usize] += 1;
    }
    hist
}

/// Otsu threshold of a histogram.
///
/// The returned level `t` maximises the between-class variance of the split
/// `{..=t}` / `{t+1..}`. A single-valued histogram has no split at all and
/// returns `0`, so any nonzero uniform image is entirely foreground; a
/// two-valued histogram returns the midpoint.
pub fn otsu_threshold_from_histogram(hist: &[u32; 256]) -> u8 {
    let mut occupied = hist
        .iter()
        .enumerate()
        .filter(|&(_, &h)| h > 0)
        .map(|(i, _)| i as u8);
    let Some(min_v) = occupied.next() else {
        return 127;
    };
    let (max_v, nonzero_bins) = occupied.fold((min_v, 1u32), |(_, n), v| (v, n + 1));
    if nonzero_bins == 1 {
        return 0;
    }
    if nonzero_bins == 2 {
        return ((min_v as u16 + max_v as u16) / 2) as u8;
    }

    let total: f64 = hist.iter().map(|&h| h as f64).sum();
    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &h)| i as f64 * h as f64)
        .sum();

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = -1f64;
    let mut best_t = 127u8;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        sum_b += t as f64 * h as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t as u8;
        }
    }

    best_t
}

/// Otsu threshold over every pixel of `img`.
pub fn otsu_threshold(img: &GrayImageView<'_>) -> u8 {
    otsu_threshold_from_histogram(&histogram(img))
}

/// Binary threshold: pixels strictly brighter than `t` become foreground.
pub fn threshold_binary(img: &GrayImageView<'_>, t: u8) -> BinaryImage {
    BinaryImage {
        width: img.width,
        height: img.height,
        data: img
            .data
            .iter()
            .map(|&v| if v > t { 255 } else { 0 })
            .collect(),
    }
}
