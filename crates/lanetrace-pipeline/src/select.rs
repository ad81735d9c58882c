//! Longest-segment selection.
//!
//! The classifier seeds its slope comparison with the longest detected
//! segment, and each side's fitter re-selects the longest member of its
//! own group. Both rank candidates by squared endpoint distance.

use crate::types::Segment;

/// Select the longest segment by squared Euclidean length.
///
/// Compares `(x1 - x2)^2 + (y1 - y2)^2`; the square root is never taken
/// because only relative magnitude matters. Ties keep the candidate
/// encountered first, so the result is deterministic for a deterministic
/// input order.
///
/// Returns `None` when the input yields no segments. There is no
/// zero-length placeholder to fall back on; callers handle the absence
/// explicitly.
#[must_use]
pub fn longest_segment<'a, I>(segments: I) -> Option<&'a Segment>
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut best: Option<(&'a Segment, f64)> = None;
    for segment in segments {
        let length = segment.length_squared();
        let longer = match best {
            None => true,
            Some((_, best_length)) => length > best_length,
        };
        if longer {
            best = Some((segment, length));
        }
    }
    best.map(|(segment, _)| segment)
}
