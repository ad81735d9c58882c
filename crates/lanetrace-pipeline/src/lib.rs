//! lanetrace-pipeline: lane boundary extraction from detected line
//! segments (sans-IO).
//!
//! Takes the unordered, possibly noisy line segments an external
//! detector found in one frame and produces at most two long lane
//! boundary lines plus a rendered overlay:
//! longest-segment selection -> side classification -> per-side line
//! fitting -> extrapolation -> overlay rendering -> optional weighted
//! compositing.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! segment lists and raster buffers and returns structured data. All
//! file and CLI interaction lives in the `lanetrace` binary crate.
//!
//! Every frame is processed independently: no state crosses frame
//! boundaries, so frames may be handled on separate workers as long as
//! the external assembly step restores the original order.

pub mod classify;
pub mod composite;
pub mod fit;
pub mod render;
pub mod select;
pub mod types;

pub use classify::{SideClassification, classify_segments};
pub use composite::{BlendWeights, blend_overlay};
pub use fit::fit_lane_line;
pub use render::{draw_lane_lines, render_overlay};
pub use select::longest_segment;
pub use types::{
    Dimensions, FrameOverlay, LaneConfig, LaneError, LaneLine, LaneLines, Point, RgbaImage,
    Segment, Slope,
};

/// Find the two lane boundary lines for one frame.
///
/// Classifies the segments into two slope families and fits one
/// extrapolated line per family, spanning from the bottom of the frame
/// to the highest detected point. A side that cannot be fitted (no
/// segments landed on it, or every one of them was vertical) is
/// recorded as absent rather than failing the whole frame.
///
/// # Errors
///
/// Returns [`LaneError::EmptyFrame`] when `segments` is empty and
/// [`LaneError::NoFiniteSlope`] when no reference slope exists at all.
/// Use [`process_frame`] for the variant that degrades these to an
/// empty result instead.
pub fn find_lane_lines(
    segments: &[Segment],
    frame: Dimensions,
    config: &LaneConfig,
) -> Result<LaneLines, LaneError> {
    let classification = classify_segments(segments, config.slope_threshold)?;
    let frame_bottom = f64::from(frame.height);
    let top_y = classification.top_y;

    Ok(LaneLines {
        reference: fit_side(&classification.reference_side, frame_bottom, top_y, "reference"),
        other: fit_side(&classification.other_side, frame_bottom, top_y, "other"),
        top_y,
    })
}

/// Process one frame end to end: find the lane lines and render the
/// overlay.
///
/// This is the graceful-degradation entry point: a frame with no
/// segments, or with no usable reference slope, yields an **empty
/// overlay** (nothing drawn) instead of an error, and a side that
/// cannot be fitted is simply not drawn. A bad frame therefore costs at
/// most its own lane lines and never aborts the surrounding pipeline.
///
/// # Errors
///
/// Returns [`LaneError::InvalidDimensions`] when either frame dimension
/// is zero; that is a structural caller error, not a property of the
/// frame's content.
pub fn process_frame(
    segments: &[Segment],
    frame: Dimensions,
    config: &LaneConfig,
) -> Result<FrameOverlay, LaneError> {
    let lines = match find_lane_lines(segments, frame, config) {
        Ok(lines) => lines,
        Err(err @ (LaneError::EmptyFrame | LaneError::NoFiniteSlope)) => {
            log::warn!("no lane lines for this frame: {err}");
            LaneLines {
                reference: None,
                other: None,
                top_y: f64::from(frame.height),
            }
        }
        Err(err) => return Err(err),
    };

    let overlay = render::render_overlay(&lines, frame, config)?;
    Ok(FrameOverlay { lines, overlay })
}

fn fit_side(side: &[Segment], frame_bottom: f64, top_y: f64, label: &str) -> Option<LaneLine> {
    match fit::fit_lane_line(side, frame_bottom, top_y) {
        Ok(line) => Some(line),
        Err(err) => {
            log::debug!("skipping the {label} side: {err}");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FRAME: Dimensions = Dimensions {
        width: 960,
        height: 540,
    };

    /// The canonical two-boundary frame: one segment per side, slopes
    /// -2.5 and +2.5, both reaching up to y = 400.
    fn two_boundary_segments() -> Vec<Segment> {
        vec![
            Segment::new(100.0, 500.0, 140.0, 400.0),
            Segment::new(800.0, 500.0, 760.0, 400.0),
        ]
    }

    #[test]
    fn two_boundary_frame_fits_both_sides() {
        let lines =
            find_lane_lines(&two_boundary_segments(), FRAME, &LaneConfig::default()).unwrap();

        let reference = lines.reference.unwrap();
        let other = lines.other.unwrap();

        // Reference side: slope -2.5 through (120, 450); bottom x 84.
        assert!((reference.slope + 2.5).abs() < 1e-9);
        assert!((reference.bottom.x - 84.0).abs() < 1e-9);
        assert!((reference.bottom.y - 540.0).abs() < 1e-9);
        assert!((reference.top.x - 140.0).abs() < 1e-9);
        assert!((reference.top.y - 400.0).abs() < 1e-9);

        // Other side: slope +2.5 through (780, 450); bottom x 816.
        assert!((other.slope - 2.5).abs() < 1e-9);
        assert!((other.bottom.x - 816.0).abs() < 1e-9);
        assert!((other.top.x - 760.0).abs() < 1e-9);
        assert!((other.top.y - 400.0).abs() < 1e-9);

        assert!((lines.top_y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn each_fitted_line_extends_its_own_segment() {
        let segments = two_boundary_segments();
        let lines = find_lane_lines(&segments, FRAME, &LaneConfig::default()).unwrap();

        let reference = lines.reference.unwrap();
        assert!((reference.y_at(segments[0].x1) - segments[0].y1).abs() < 1e-9);
        assert!((reference.y_at(segments[0].x2) - segments[0].y2).abs() < 1e-9);

        let other = lines.other.unwrap();
        assert!((other.y_at(segments[1].x1) - segments[1].y1).abs() < 1e-9);
        assert!((other.y_at(segments[1].x2) - segments[1].y2).abs() < 1e-9);
    }

    #[test]
    fn identical_input_yields_bit_identical_lines() {
        let segments = two_boundary_segments();
        let config = LaneConfig::default();

        let first = find_lane_lines(&segments, FRAME, &config).unwrap();
        let second = find_lane_lines(&segments, FRAME, &config).unwrap();

        let endpoints = |lines: &LaneLines| -> Vec<u64> {
            lines
                .iter()
                .flat_map(|l| {
                    [
                        l.bottom.x.to_bits(),
                        l.bottom.y.to_bits(),
                        l.top.x.to_bits(),
                        l.top.y.to_bits(),
                    ]
                })
                .collect()
        };
        assert_eq!(endpoints(&first), endpoints(&second));
    }

    #[test]
    fn one_sided_frame_fits_one_line() {
        let segments = [Segment::new(100.0, 500.0, 140.0, 400.0)];
        let lines = find_lane_lines(&segments, FRAME, &LaneConfig::default()).unwrap();
        assert!(lines.reference.is_some());
        assert!(lines.other.is_none());
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn empty_frame_propagates_from_find() {
        let result = find_lane_lines(&[], FRAME, &LaneConfig::default());
        assert!(matches!(result, Err(LaneError::EmptyFrame)));
    }

    #[test]
    fn process_frame_degrades_empty_input_to_empty_overlay() {
        let result = process_frame(&[], FRAME, &LaneConfig::default()).unwrap();
        assert!(result.lines.is_empty());
        assert_eq!(result.overlay.width(), FRAME.width);
        assert_eq!(result.overlay.height(), FRAME.height);
        assert!(result.overlay.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn process_frame_degrades_all_vertical_input_to_empty_overlay() {
        let segments = [Segment::new(480.0, 100.0, 480.0, 500.0)];
        let result = process_frame(&segments, FRAME, &LaneConfig::default()).unwrap();
        assert!(result.lines.is_empty());
    }

    #[test]
    fn process_frame_rejects_zero_dimensions() {
        let result = process_frame(
            &two_boundary_segments(),
            Dimensions {
                width: 960,
                height: 0,
            },
            &LaneConfig::default(),
        );
        assert!(matches!(result, Err(LaneError::InvalidDimensions { .. })));
    }

    #[test]
    fn vertical_noise_does_not_disturb_the_fit() {
        let mut segments = two_boundary_segments();
        segments.push(Segment::new(480.0, 450.0, 480.0, 500.0));
        let lines = find_lane_lines(&segments, FRAME, &LaneConfig::default()).unwrap();
        assert_eq!(lines.count(), 2);
        for line in lines.iter() {
            assert!(line.bottom.x.is_finite());
            assert!(line.top.x.is_finite());
        }
    }
}
