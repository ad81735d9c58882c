//! Overlay rendering: stroke the fitted lane lines onto a canvas.
//!
//! The overlay matches the frame dimensions, starts fully transparent,
//! and receives one stroked line per fitted side so an external
//! compositor can blend it over the source frame. Rasterisation goes
//! through `tiny-skia`, which handles sub-pixel endpoint positions and
//! anti-aliasing internally.

use image::{Rgba, RgbaImage};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::types::{Dimensions, LaneConfig, LaneError, LaneLine, LaneLines};

/// Draw the fitted lane lines onto a caller-owned canvas.
///
/// The canvas is mutated in place. The strokes are the only effect:
/// existing canvas content outside the strokes is left untouched, and
/// nothing is retained after the call returns. Sides absent from
/// `lines` are skipped, so a frame with one usable side gets one line
/// and a frame with none gets an unchanged canvas.
pub fn draw_lane_lines(canvas: &mut Pixmap, lines: &LaneLines, config: &LaneConfig) {
    for line in lines.iter() {
        stroke_line(canvas, line, config);
    }
}

/// Render the fitted lines onto a fresh transparent overlay.
///
/// Allocates a canvas of the frame's size, strokes the lines, and
/// converts the premultiplied pixmap into a straight-alpha
/// [`RgbaImage`]. Background pixels stay fully transparent.
///
/// # Errors
///
/// Returns [`LaneError::InvalidDimensions`] when either frame dimension
/// is zero.
pub fn render_overlay(
    lines: &LaneLines,
    frame: Dimensions,
    config: &LaneConfig,
) -> Result<RgbaImage, LaneError> {
    let mut canvas = Pixmap::new(frame.width, frame.height).ok_or(LaneError::InvalidDimensions {
        width: frame.width,
        height: frame.height,
    })?;
    draw_lane_lines(&mut canvas, lines, config);
    Ok(pixmap_to_rgba(&canvas))
}

#[allow(clippy::cast_possible_truncation)]
fn stroke_line(canvas: &mut Pixmap, line: &LaneLine, config: &LaneConfig) {
    let mut pb = PathBuilder::new();
    pb.move_to(line.bottom.x as f32, line.bottom.y as f32);
    pb.line_to(line.top.x as f32, line.top.y as f32);
    let Some(path) = pb.finish() else {
        // Degenerate (zero-length) path; nothing to stroke.
        return;
    };

    let stroke = Stroke {
        width: config.line_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    let [r, g, b, a] = config.line_color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    canvas.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Convert a premultiplied-alpha pixmap to a straight-alpha `RgbaImage`.
#[allow(clippy::cast_possible_truncation)]
fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let data = pixmap.data();
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (i, pixel) in img.pixels_mut().enumerate() {
        let off = i * 4;
        let a = data[off + 3];
        if a == 0 {
            *pixel = Rgba([0, 0, 0, 0]);
        } else {
            // Un-premultiply: channel = premultiplied * 255 / alpha.
            let r = u16::from(data[off]) * 255 / u16::from(a);
            let g = u16::from(data[off + 1]) * 255 / u16::from(a);
            let b = u16::from(data[off + 2]) * 255 / u16::from(a);
            *pixel = Rgba([r as u8, g as u8, b as u8, a]);
        }
    }
    img
}
