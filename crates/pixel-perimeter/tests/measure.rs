use pixel_perimeter::measure::{
    gray_view, load_gray, measure_from_gray_u8, measure_image, MeasureError,
};
use pixel_perimeter::raster::RasterError;
use pixel_perimeter::{PerimeterEstimator, PipelineParams};

fn unblurred() -> PipelineParams {
    PipelineParams {
        blur: false,
        ..PipelineParams::default()
    }
}

#[test]
fn gray_view_borrows_the_image_buffer() {
    let img = image::GrayImage::from_fn(4, 3, |x, y| image::Luma([(x + 4 * y) as u8]));
    let view = gray_view(&img);
    assert_eq!((view.width, view.height), (4, 3));
    assert_eq!(view.get(3, 2), 11);
    assert_eq!(view.data.as_ptr(), img.as_raw().as_ptr());
}

#[test]
fn raw_buffer_and_image_paths_agree() {
    let (w, h) = (16usize, 10usize);
    let mut pixels = vec![0u8; w * h];
    for y in 3..7 {
        for x in 2..9 {
            pixels[y * w + x] = 200;
        }
    }
    let estimator = PerimeterEstimator::default();

    let from_raw = measure_from_gray_u8(w, h, &pixels, &unblurred(), &estimator).expect("raw");
    let img = image::GrayImage::from_raw(w as u32, h as u32, pixels.clone()).expect("image");
    let from_img = measure_image(&img, &unblurred(), &estimator);

    assert_eq!(from_raw.summary, from_img.summary);
    assert_eq!(from_raw.chains.len(), 1);
    // 7x4 block: 18 axis steps and 3 free-start corners.
    assert_eq!(from_raw.measurements[0].counts.axis_steps, 18);
    assert_eq!(from_raw.measurements[0].counts.corners, 3);
}

#[test]
fn raw_buffer_with_wrong_length_is_a_raster_error() {
    let err = measure_from_gray_u8(
        5,
        5,
        &[0u8; 24],
        &PipelineParams::default(),
        &PerimeterEstimator::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        MeasureError::Raster(RasterError::InvalidBuffer {
            expected: 25,
            got: 24
        })
    ));
    assert!(!err.is_unreadable_image());
}

#[test]
fn missing_file_is_unreadable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_gray(dir.path().join("missing.png")).unwrap_err();
    assert!(err.is_unreadable_image());
}
