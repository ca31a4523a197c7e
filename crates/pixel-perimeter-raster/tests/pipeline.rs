use approx::assert_relative_eq;
use pixel_perimeter_core::{estimate_perimeter, reduce_batch};
use pixel_perimeter_raster::{
    gaussian_blur_5x5, otsu_threshold, threshold_binary, trace_external_contours, GrayImage,
    GrayImageView, RasterError,
};

/// Dark background with a bright disc (r = 20) and a bright 30x30 square.
fn disc_and_square() -> GrayImage {
    let (w, h) = (120usize, 80usize);
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = (x as i64 - 30, y as i64 - 40);
            let v = if dx * dx + dy * dy <= 400 {
                220
            } else if (70..100).contains(&x) && (25..55).contains(&y) {
                200
            } else {
                30
            };
            img.data[y * w + x] = v;
        }
    }
    img
}

#[test]
fn blur_threshold_trace_estimate() {
    let img = disc_and_square();
    let blurred = gaussian_blur_5x5(&img.view());
    let t = otsu_threshold(&blurred.view());
    assert!((30..200).contains(&t), "threshold {t}");

    let mask = threshold_binary(&blurred.view(), t);
    let chains = trace_external_contours(&mask);
    assert_eq!(chains.len(), 2);

    // The disc is met first by the row-major scan, so it is listed last.
    let square = estimate_perimeter(chains[0].points());
    let disc = estimate_perimeter(chains[1].points());

    // Border pixel centres of a radius-20 disc lie about half a pixel inside.
    let expected_disc = 2.0 * std::f64::consts::PI * 19.5;
    assert_relative_eq!(disc, expected_disc, max_relative = 0.02);
    assert!((105.0..116.0).contains(&square), "square {square}");

    let summary = reduce_batch(&chains).expect("two chains");
    assert_eq!(summary.largest.index, 1);
    assert_relative_eq!(summary.total, disc + square, epsilon = 1e-9);
}

#[test]
fn uniform_bright_image_is_one_frame_contour() {
    let img = GrayImage {
        width: 16,
        height: 16,
        data: vec![128; 256],
    };
    let blurred = gaussian_blur_5x5(&img.view());
    let t = otsu_threshold(&blurred.view());
    assert_eq!(t, 0);
    let mask = threshold_binary(&blurred.view(), t);
    let chains = trace_external_contours(&mask);
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].len(), 60);
    // Four straight 15-pixel sides.
    assert_relative_eq!(
        estimate_perimeter(chains[0].points()),
        60.0 * 0.980 - 3.0 * 0.091,
        epsilon = 1e-9
    );
}

#[test]
fn black_image_yields_no_chains() {
    let img = GrayImage::new(16, 16);
    let blurred = gaussian_blur_5x5(&img.view());
    let mask = threshold_binary(&blurred.view(), otsu_threshold(&blurred.view()));
    assert!(reduce_batch(&trace_external_contours(&mask)).is_none());
}

#[test]
fn view_rejects_bad_buffers() {
    let data = [0u8; 10];
    assert_eq!(
        GrayImageView::new(4, 3, &data).unwrap_err(),
        RasterError::InvalidBuffer {
            expected: 12,
            got: 10
        }
    );
    assert_eq!(
        GrayImageView::new(usize::MAX, 2, &data).unwrap_err(),
        RasterError::InvalidDimensions {
            width: usize::MAX,
            height: 2
        }
    );
    assert!(GrayImageView::new(5, 2, &data).is_ok());
}
