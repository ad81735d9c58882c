//! Shared types for the lanetrace lane-finding pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference rendered
/// overlays without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point in image coordinates.
///
/// The y axis grows downward, matching raster conventions: the bottom of
/// a frame has the largest y value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Slope of a segment in pixel space.
///
/// Slope computation returns a tagged value instead of dividing through:
/// a segment with `x1 == x2` has no finite slope, and letting the
/// resulting NaN or infinity flow into later arithmetic corrupts every
/// derived coordinate. Callers match on the variant and handle
/// `Vertical` explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slope {
    /// Ordinary slope `(y2 - y1) / (x2 - x1)`.
    Finite(f64),
    /// The segment is vertical; no finite slope exists.
    Vertical,
}

impl Slope {
    /// Returns `true` for a vertical segment.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }

    /// The slope value, or `None` for a vertical segment.
    #[must_use]
    pub const fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(value) => Some(value),
            Self::Vertical => None,
        }
    }
}

/// A straight line piece detected by an external segment detector.
///
/// An immutable value type with four named coordinate fields. Detector
/// output is integer-valued in practice but all derived computation
/// (slope, midpoint, extrapolation) treats the coordinates as reals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// x coordinate of the first endpoint.
    pub x1: f64,
    /// y coordinate of the first endpoint.
    pub y1: f64,
    /// x coordinate of the second endpoint.
    pub x2: f64,
    /// y coordinate of the second endpoint.
    pub y2: f64,
}

impl Segment {
    /// Create a new segment from endpoint coordinates.
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The first endpoint.
    #[must_use]
    pub const fn start(self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// The second endpoint.
    #[must_use]
    pub const fn end(self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// The midpoint between the two endpoints.
    #[must_use]
    pub fn midpoint(self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Squared Euclidean length of the segment.
    ///
    /// Avoids the square root; only relative magnitude matters when
    /// ranking segments by length.
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.start().distance_squared(self.end())
    }

    /// The segment's slope, tagged as [`Slope::Vertical`] when the two
    /// endpoints share an x coordinate.
    #[must_use]
    pub fn slope(self) -> Slope {
        let dx = self.x2 - self.x1;
        if dx.abs() < f64::EPSILON {
            Slope::Vertical
        } else {
            Slope::Finite((self.y2 - self.y1) / dx)
        }
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// One extrapolated lane boundary line.
///
/// Derived per side from the side's longest segment: the slope and
/// midpoint fix the line equation `y = slope * x + intercept`, and the
/// two endpoints extend it from the bottom of the frame up to the
/// highest point any detected segment reached. Both endpoints satisfy
/// the line equation by construction.
///
/// Recomputed fresh for every frame; never persisted across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLine {
    /// Slope of the fitted line.
    pub slope: f64,
    /// y-axis intercept of the fitted line.
    pub intercept: f64,
    /// Endpoint at the bottom edge of the frame.
    pub bottom: Point,
    /// Endpoint at the upper extrapolation bound.
    pub top: Point,
}

impl LaneLine {
    /// Solve the line equation for x at the given y.
    #[must_use]
    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }

    /// Evaluate the line equation at the given x.
    #[must_use]
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// The fitted lane boundaries for one frame.
///
/// A side that could not be fitted (no segments landed on it, or every
/// one of them was vertical) is absent rather than fabricated; the
/// renderer simply skips it. Losing one or both lines degrades a single
/// frame's overlay and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneLines {
    /// The line fitted to the reference side (the slope family of the
    /// longest detected segment).
    pub reference: Option<LaneLine>,
    /// The line fitted to the other side.
    pub other: Option<LaneLine>,
    /// Upper extrapolation bound: the minimum y coordinate observed
    /// across all input segment endpoints.
    pub top_y: f64,
}

impl LaneLines {
    /// Iterate over the lines that were actually fitted.
    pub fn iter(&self) -> impl Iterator<Item = &LaneLine> {
        self.reference.iter().chain(self.other.iter())
    }

    /// Number of fitted lines (0, 1, or 2).
    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` when no line could be fitted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reference.is_none() && self.other.is_none()
    }
}

/// Result of processing one frame: the fitted lines plus the rendered
/// overlay, sized to the frame and ready for external compositing.
#[derive(Debug, Clone)]
pub struct FrameOverlay {
    /// The fitted lane boundary lines.
    pub lines: LaneLines,
    /// Transparent-background overlay with the lines stroked onto it.
    pub overlay: RgbaImage,
}

/// Configuration for lane finding and overlay rendering.
///
/// All parameters default to the reference pipeline's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    /// Maximum slope difference for a segment to join the reference
    /// segment's side.
    ///
    /// Slopes in pixel space cluster tightly per lane boundary and
    /// diverge sharply across boundaries, so a small constant separates
    /// them well. The value is an empirically tuned heuristic, not a
    /// structural constant.
    pub slope_threshold: f64,

    /// RGBA stroke color for the rendered lane lines.
    pub line_color: [u8; 4],

    /// Stroke width for the rendered lane lines in pixels.
    pub line_width: f32,
}

impl LaneConfig {
    /// Default slope-similarity threshold.
    pub const DEFAULT_SLOPE_THRESHOLD: f64 = 0.15;
    /// Default stroke color: pure red, fully opaque.
    pub const DEFAULT_LINE_COLOR: [u8; 4] = [255, 0, 0, 255];
    /// Default stroke width in pixels.
    pub const DEFAULT_LINE_WIDTH: f32 = 10.0;
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            slope_threshold: Self::DEFAULT_SLOPE_THRESHOLD,
            line_color: Self::DEFAULT_LINE_COLOR,
            line_width: Self::DEFAULT_LINE_WIDTH,
        }
    }
}

/// Errors that can occur while finding or rendering lane lines.
///
/// Everything here is per-frame and locally recoverable: a frame that
/// produces one of these degrades to a partial or empty overlay and does
/// not abort the surrounding pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum LaneError {
    /// No segments were supplied for the frame.
    #[error("no line segments were supplied for the frame")]
    EmptyFrame,

    /// A side group contained no segments after classification.
    #[error("no segments were assigned to this side of the lane")]
    EmptySide,

    /// Every candidate segment is vertical, so no slope can be derived.
    #[error("every candidate segment is vertical; a finite slope is required")]
    NoFiniteSlope,

    /// A zero-area canvas was requested.
    #[error("frame dimensions must be nonzero, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The compositor was given an overlay whose size differs from the
    /// frame's.
    #[error(
        "overlay is {overlay_width}x{overlay_height} but frame is {frame_width}x{frame_height}"
    )]
    DimensionMismatch {
        /// Overlay width.
        overlay_width: u32,
        /// Overlay height.
        overlay_height: u32,
        /// Frame width.
        frame_width: u32,
        /// Frame height.
        frame_height: u32,
    },
}
