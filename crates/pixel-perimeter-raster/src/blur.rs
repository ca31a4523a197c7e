//! Separable 5x5 Gaussian blur on 8-bit images.
//!
//! The 1D kernel is the binomial `[1, 4, 6, 4, 1] / 16`, which is the fixed
//! 5-tap Gaussian used when no explicit sigma is given. Borders are mirrored
//! without repeating the edge pixel (`dcb|abcd|cba`). Both passes run in
//! integer arithmetic; the result is rounded once at the end.

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::image::{GrayImage, GrayImageView};

const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];

/// Mirror `i` into `0..n` without duplicating the border sample.
#[inline]
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let mut i = i.rem_euclid(period);
    if i >= n {
        i = period - i;
    }
    i as usize
}

/// Blur `src` with the 5x5 binomial kernel.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn gaussian_blur_5x5(src: &GrayImageView<'_>) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let mut out = GrayImage::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    // horizontal, weights sum to 16
    let mut tmp = vec![0u32; w * h];
    for y in 0..h {
        let row = &src.data[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0u32;
            for (k, &kv) in KERNEL.iter().enumerate() {
                let xi = reflect_101(x as isize + k as isize - 2, w);
                acc += kv * row[xi] as u32;
            }
            tmp[y * w + x] = acc;
        }
    }

    // vertical, total weight 256
    for y in 0..h {
        let rows: [usize; 5] = std::array::from_fn(|k| reflect_101(y as isize + k as isize - 2, h));
        for x in 0..w {
            let mut acc = 0u32;
            for (k, &kv) in KERNEL.iter().enumerate() {
                acc += kv * tmp[rows[k] * w + x];
            }
            out.data[y * w + x] = ((acc + 128) >> 8).min(255) as u8;
        }
    }
    out
}
