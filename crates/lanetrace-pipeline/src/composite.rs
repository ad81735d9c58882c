//! Weighted overlay compositing.
//!
//! Blends a rendered lane overlay onto the source frame with the
//! channel-wise weighted sum `frame * alpha + overlay * beta + gamma`.
//! The default weights keep the road texture visible underneath the
//! lane strokes. The frame's alpha channel is carried through
//! unchanged; the weights apply to color channels only.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::types::LaneError;

/// Channel weights for [`blend_overlay`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    /// Weight applied to the source frame.
    pub alpha: f64,
    /// Weight applied to the overlay.
    pub beta: f64,
    /// Constant added to every weighted channel.
    pub gamma: f64,
}

impl BlendWeights {
    /// Default frame weight.
    pub const DEFAULT_ALPHA: f64 = 0.8;
    /// Default overlay weight.
    pub const DEFAULT_BETA: f64 = 1.0;
    /// Default additive constant.
    pub const DEFAULT_GAMMA: f64 = 0.0;
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            beta: Self::DEFAULT_BETA,
            gamma: Self::DEFAULT_GAMMA,
        }
    }
}

/// Blend `overlay` onto `frame`, returning a new image.
///
/// Each color channel is computed as
/// `frame * alpha + overlay * beta + gamma` in `f64`, rounded, and
/// clamped to `[0, 255]`. Neither input is mutated.
///
/// # Errors
///
/// Returns [`LaneError::DimensionMismatch`] when the two images differ
/// in size.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend_overlay(
    frame: &RgbaImage,
    overlay: &RgbaImage,
    weights: BlendWeights,
) -> Result<RgbaImage, LaneError> {
    if frame.dimensions() != overlay.dimensions() {
        return Err(LaneError::DimensionMismatch {
            overlay_width: overlay.width(),
            overlay_height: overlay.height(),
            frame_width: frame.width(),
            frame_height: frame.height(),
        });
    }

    let mut output = RgbaImage::new(frame.width(), frame.height());
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let f = frame.get_pixel(x, y);
        let o = overlay.get_pixel(x, y);

        let blend = |fc: u8, oc: u8| -> u8 {
            let value = f64::from(fc).mul_add(
                weights.alpha,
                f64::from(oc).mul_add(weights.beta, weights.gamma),
            );
            value.round().clamp(0.0, 255.0) as u8
        };

        *pixel = Rgba([
            blend(f[0], o[0]),
            blend(f[1], o[1]),
            blend(f[2], o[2]),
            f[3],
        ]);
    }
    Ok(output)
}
