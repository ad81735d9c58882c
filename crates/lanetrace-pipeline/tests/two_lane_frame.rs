//! Integration test: a synthetic two-lane frame through the full
//! pipeline, from raw detector segments to a composited image.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use lanetrace_pipeline::{
    BlendWeights, Dimensions, LaneConfig, RgbaImage, Segment, blend_overlay, process_frame,
};

const FRAME: Dimensions = Dimensions {
    width: 960,
    height: 540,
};

/// Segments resembling a dashed lane marking on each side of a 960x540
/// frame, plus a stray vertical detection. Left-side slopes cluster
/// around -0.72, right-side slopes around +0.70.
fn dashed_lane_segments() -> Vec<Segment> {
    vec![
        // Left boundary, bottom to top.
        Segment::new(180.0, 530.0, 280.0, 458.0),
        Segment::new(300.0, 444.0, 360.0, 401.0),
        Segment::new(380.0, 387.0, 410.0, 365.0),
        // Right boundary, bottom to top.
        Segment::new(780.0, 530.0, 690.0, 467.0),
        Segment::new(670.0, 453.0, 610.0, 411.0),
        Segment::new(590.0, 397.0, 560.0, 376.0),
        // Vertical noise (a pole, a shadow edge).
        Segment::new(480.0, 380.0, 480.0, 520.0),
    ]
}

#[test]
fn dashed_lane_frame_produces_two_boundary_lines() {
    let _ = env_logger::builder().is_test(true).try_init();

    let segments = dashed_lane_segments();
    let result = process_frame(&segments, FRAME, &LaneConfig::default()).expect("frame processes");

    assert_eq!(result.lines.count(), 2, "expected both boundaries fitted");

    let reference = result.lines.reference.unwrap();
    let other = result.lines.other.unwrap();

    // The longest segment is the first left-boundary dash, so the
    // reference family is the negative-slope side.
    assert!(reference.slope < 0.0);
    assert!(other.slope > 0.0);

    // Both lines run from the frame bottom to the highest detected
    // point, which is the top of the third left dash (y = 365).
    assert!((result.lines.top_y - 365.0).abs() < 1e-9);
    for line in result.lines.iter() {
        assert!((line.bottom.y - 540.0).abs() < 1e-9);
        assert!((line.top.y - 365.0).abs() < 1e-9);
        // Extrapolated endpoints satisfy the fitted line equation.
        assert!((line.y_at(line.bottom.x) - line.bottom.y).abs() < 1e-9);
        assert!((line.y_at(line.top.x) - line.top.y).abs() < 1e-9);
    }

    // The lane opens toward the bottom: at the bottom edge the left
    // line sits left of the right line, with a plausible lane width.
    assert!(reference.bottom.x < other.bottom.x);
    assert!(other.bottom.x - reference.bottom.x > 300.0);
}

#[test]
fn overlay_pixels_follow_the_fitted_lines() {
    let segments = dashed_lane_segments();
    let result = process_frame(&segments, FRAME, &LaneConfig::default()).expect("frame processes");

    let reference = result.lines.reference.unwrap();

    // Sample the reference line halfway up its span; the stroke center
    // there must carry the configured color.
    let mid_y = (result.lines.top_y + 540.0) / 2.0;
    let mid_x = reference.x_at(mid_y);
    let pixel = result.overlay.get_pixel(mid_x.round() as u32, mid_y.round() as u32);
    assert_eq!(pixel.0, [255, 0, 0, 255]);

    // The frame center between the two lines stays transparent.
    let pixel = result.overlay.get_pixel(480, 450);
    assert_eq!(pixel.0, [0, 0, 0, 0]);
}

#[test]
fn composite_keeps_road_visible_under_the_strokes() {
    let segments = dashed_lane_segments();
    let result = process_frame(&segments, FRAME, &LaneConfig::default()).expect("frame processes");

    // A mid-gray "road" frame.
    let road = RgbaImage::from_pixel(FRAME.width, FRAME.height, image::Rgba([100, 100, 100, 255]));
    let marked = blend_overlay(&road, &result.overlay, BlendWeights::default()).unwrap();

    assert_eq!(marked.dimensions(), (FRAME.width, FRAME.height));

    // Away from the lines: road dimmed by the frame weight, 100 * 0.8.
    assert_eq!(marked.get_pixel(480, 450).0, [80, 80, 80, 255]);

    // On a line: red channel saturates (100 * 0.8 + 255), others keep
    // only the dimmed road value.
    let reference = result.lines.reference.unwrap();
    let mid_y = (result.lines.top_y + 540.0) / 2.0;
    let mid_x = reference.x_at(mid_y);
    let on_line = marked.get_pixel(mid_x.round() as u32, mid_y.round() as u32);
    assert_eq!(on_line.0, [255, 80, 80, 255]);
}

#[test]
fn rerunning_the_frame_is_deterministic() {
    let segments = dashed_lane_segments();
    let config = LaneConfig::default();

    let first = process_frame(&segments, FRAME, &config).expect("first run");
    let second = process_frame(&segments, FRAME, &config).expect("second run");

    assert_eq!(first.lines, second.lines);
    assert_eq!(first.overlay.as_raw(), second.overlay.as_raw());
}
