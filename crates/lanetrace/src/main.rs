//! lanetrace: render lane boundary overlays from detected line segments.
//!
//! Reads a JSON dump of the line segments an external detector found in
//! one frame, fits the two lane boundary lines, and writes either the
//! raw transparent overlay or the overlay composited onto the source
//! frame.
//!
//! # Usage
//!
//! ```text
//! lanetrace segments.json --width 960 --height 540 --output overlay.png
//! lanetrace segments.json --frame frame.png --composite --output marked.png
//! ```
//!
//! The segments file is a JSON array of objects with `x1`, `y1`, `x2`,
//! `y2` fields, one per detected segment.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::Parser;
use lanetrace_pipeline::{
    BlendWeights, Dimensions, LaneConfig, Segment, blend_overlay, process_frame,
};

/// Render lane boundary overlays from detected line segments.
#[derive(Parser)]
#[command(name = "lanetrace", version)]
struct Cli {
    /// Path to the JSON segment dump (array of {x1, y1, x2, y2} objects).
    segments_path: PathBuf,

    /// Output image path (PNG recommended).
    #[arg(short, long)]
    output: PathBuf,

    /// Source frame image; supplies the frame dimensions and the base
    /// image for --composite.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    frame: Option<PathBuf>,

    /// Frame width in pixels (required without --frame).
    #[arg(long, required_unless_present = "frame")]
    width: Option<u32>,

    /// Frame height in pixels (required without --frame).
    #[arg(long, required_unless_present = "frame")]
    height: Option<u32>,

    /// Slope-similarity threshold for side classification.
    #[arg(long, default_value_t = LaneConfig::DEFAULT_SLOPE_THRESHOLD)]
    slope_threshold: f64,

    /// Stroke width for the lane lines in pixels.
    #[arg(long, default_value_t = LaneConfig::DEFAULT_LINE_WIDTH)]
    line_width: f32,

    /// Lane line color as a CSS-style hex value (#rgb or #rrggbb).
    #[arg(long, default_value = "#ff0000")]
    color: String,

    /// Blend the overlay onto the source frame instead of writing the
    /// raw overlay.
    #[arg(long, requires = "frame")]
    composite: bool,

    /// Print the fitted lines as JSON to stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let segments_json = std::fs::read_to_string(&cli.segments_path)?;
    let segments: Vec<Segment> = serde_json::from_str(&segments_json)?;
    eprintln!(
        "Loaded {} segment(s) from {}",
        segments.len(),
        cli.segments_path.display(),
    );

    let frame_image = match &cli.frame {
        Some(path) => {
            eprintln!("Reading frame from {}", path.display());
            Some(image::open(path)?.to_rgba8())
        }
        None => None,
    };

    let dimensions = match &frame_image {
        Some(img) => Dimensions {
            width: img.width(),
            height: img.height(),
        },
        None => {
            let (Some(width), Some(height)) = (cli.width, cli.height) else {
                return Err("either --frame or both --width and --height are required".into());
            };
            Dimensions { width, height }
        }
    };

    let config = LaneConfig {
        slope_threshold: cli.slope_threshold,
        line_color: parse_hex_color(&cli.color).map_err(|e| format!("--color: {e}"))?,
        line_width: cli.line_width,
    };

    eprintln!(
        "Frame: {}x{}, threshold: {}, line width: {:.1}px",
        dimensions.width, dimensions.height, config.slope_threshold, config.line_width,
    );

    let result = process_frame(&segments, dimensions, &config)?;
    eprintln!("Fitted {} lane line(s)", result.lines.count());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.lines)?);
    }

    let output_image = if cli.composite {
        // clap's `requires` guarantees --frame accompanied --composite.
        let frame = frame_image
            .as_ref()
            .ok_or("--composite requires --frame")?;
        eprintln!("Compositing overlay onto the source frame...");
        blend_overlay(frame, &result.overlay, BlendWeights::default())?
    } else {
        result.overlay
    };

    output_image.save(&cli.output)?;
    eprintln!("Saved {}", cli.output.display());
    Ok(())
}

/// Parse a CSS hex color string (`"#rgb"` or `"#rrggbb"`) into an RGBA
/// quadruple with full opacity.
fn parse_hex_color(s: &str) -> Result<[u8; 4], String> {
    let s = s.trim();
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| format!("not a hex color: {s:?}"))?;
    match hex.len() {
        3 => {
            // Short form: #rgb -> #rrggbb
            let mut rgba = [0u8, 0, 0, 255];
            for (i, ch) in hex.chars().enumerate() {
                let n = ch
                    .to_digit(16)
                    .ok_or_else(|| format!("invalid hex char: {ch}"))?;
                #[expect(clippy::cast_possible_truncation)]
                {
                    rgba[i] = (n * 17) as u8;
                }
            }
            Ok(rgba)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16);
            let g = u8::from_str_radix(&hex[2..4], 16);
            let b = u8::from_str_radix(&hex[4..6], 16);
            match (r, g, b) {
                (Ok(r), Ok(g), Ok(b)) => Ok([r, g, b, 255]),
                _ => Err(format!("invalid hex color: {s:?}")),
            }
        }
        _ => Err(format!("unexpected hex length: {s:?}")),
    }
}
