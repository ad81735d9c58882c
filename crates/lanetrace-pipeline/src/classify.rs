//! Side classification: partition segments into two slope families.
//!
//! The longest detected segment seeds a reference slope. Every segment
//! whose own slope lies within the configured threshold of the reference
//! joins the reference side; the rest form the other side. The side
//! labels carry no left/right meaning, only "same slope family as the
//! longest segment" versus "not".
//!
//! While scanning, the minimum y coordinate over all endpoints is
//! tracked; it becomes the upper extrapolation bound for both fitted
//! lines, tying the visible lane length to what the detector actually
//! returned rather than to a fixed region-of-interest apex.

use log::debug;

use crate::select::longest_segment;
use crate::types::{LaneError, Segment, Slope};

/// Segments partitioned into two slope families.
///
/// The two sides partition the non-vertical input exactly: no segment
/// appears on both sides, none is dropped, none is duplicated. Vertical
/// segments belong to neither family; they are excluded from the length
/// competition and from every slope comparison, and only counted.
#[derive(Debug, Clone, PartialEq)]
pub struct SideClassification {
    /// Segments in the reference segment's slope family, the reference
    /// segment itself included.
    pub reference_side: Vec<Segment>,
    /// Segments outside the reference slope family.
    pub other_side: Vec<Segment>,
    /// Minimum y coordinate over all input endpoints, vertical segments
    /// included: the highest point the detector reached.
    pub top_y: f64,
    /// Number of vertical segments excluded from classification.
    pub skipped_vertical: usize,
}

/// Partition `segments` into two groups by slope similarity to the
/// longest segment.
///
/// A segment joins the reference side when
/// `|slope_ref - slope| < slope_threshold`, and the other side
/// otherwise. Vertical segments have no slope to compare and are
/// skipped.
///
/// # Errors
///
/// Returns [`LaneError::EmptyFrame`] if `segments` is empty.
/// Returns [`LaneError::NoFiniteSlope`] if every segment is vertical,
/// since no reference slope can be derived.
pub fn classify_segments(
    segments: &[Segment],
    slope_threshold: f64,
) -> Result<SideClassification, LaneError> {
    if segments.is_empty() {
        return Err(LaneError::EmptyFrame);
    }

    let reference = longest_segment(segments.iter().filter(|s| !s.slope().is_vertical()))
        .ok_or(LaneError::NoFiniteSlope)?;
    let Some(reference_slope) = reference.slope().finite() else {
        return Err(LaneError::NoFiniteSlope);
    };

    let mut classification = SideClassification {
        reference_side: Vec::new(),
        other_side: Vec::new(),
        top_y: f64::INFINITY,
        skipped_vertical: 0,
    };

    for segment in segments {
        classification.top_y = classification.top_y.min(segment.y1).min(segment.y2);
        match segment.slope() {
            Slope::Vertical => classification.skipped_vertical += 1,
            Slope::Finite(slope) => {
                if (reference_slope - slope).abs() < slope_threshold {
                    classification.reference_side.push(*segment);
                } else {
                    classification.other_side.push(*segment);
                }
            }
        }
    }

    if classification.skipped_vertical > 0 {
        debug!(
            "excluded {} vertical segment(s) from side classification",
            classification.skipped_vertical
        );
    }

    Ok(classification)
}
