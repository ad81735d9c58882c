//! Per-side line fitting and extrapolation.
//!
//! One representative straight line per side: the side's longest segment
//! supplies the slope, the intercept follows from point-slope form
//! through that segment's midpoint, and the line is extended to span
//! from the bottom edge of the frame up to the highest point any
//! detected segment reached.

use crate::select::longest_segment;
use crate::types::{LaneError, LaneLine, Point, Segment};

/// Fit one lane boundary line to a side's segments.
///
/// Selects the side's longest non-vertical segment, derives
/// `y = slope * x + intercept` through its midpoint, and solves the
/// equation for x at `frame_bottom_y` and at `top_y` to produce the two
/// extrapolated endpoints.
///
/// # Errors
///
/// Returns [`LaneError::EmptySide`] when the side has no segments; a
/// line extrapolated from nothing would sit at a meaningless position,
/// so the caller decides whether to skip the side or drop the frame.
/// Returns [`LaneError::NoFiniteSlope`] when every segment on the side
/// is vertical.
pub fn fit_lane_line(
    side: &[Segment],
    frame_bottom_y: f64,
    top_y: f64,
) -> Result<LaneLine, LaneError> {
    if side.is_empty() {
        return Err(LaneError::EmptySide);
    }

    let longest = longest_segment(side.iter().filter(|s| !s.slope().is_vertical()))
        .ok_or(LaneError::NoFiniteSlope)?;
    let Some(slope) = longest.slope().finite() else {
        return Err(LaneError::NoFiniteSlope);
    };

    let midpoint = longest.midpoint();
    let intercept = slope.mul_add(-midpoint.x, midpoint.y);
    let x_at = |y: f64| (y - intercept) / slope;

    Ok(LaneLine {
        slope,
        intercept,
        bottom: Point::new(x_at(frame_bottom_y), frame_bottom_y),
        top: Point::new(x_at(top_y), top_y),
    })
}
