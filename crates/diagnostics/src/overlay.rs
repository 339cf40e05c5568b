//! Labeled diagnostic PNGs (`log_ball_final_found_ball_img.*.png` /
//! `log_cam2_last_strobed_img.*.png`): the source frame with every detected ball candidate
//! drawn as a hollow circle plus a crosshair at its center, colored by confidence bucket.

use std::path::Path;

use ball_detector::{BallPosition, ConfidenceLevel, ImageBuffer};
use image::Rgb;
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut};

use crate::error::Result;

fn confidence_color(confidence: f64) -> Rgb<u8> {
    match ConfidenceLevel::of(confidence) {
        ConfidenceLevel::VeryLow => Rgb([200, 0, 0]),
        ConfidenceLevel::Low => Rgb([220, 100, 0]),
        ConfidenceLevel::Medium => Rgb([220, 200, 0]),
        ConfidenceLevel::High => Rgb([120, 200, 0]),
        ConfidenceLevel::VeryHigh => Rgb([0, 200, 0]),
    }
}

/// Draws every candidate onto a copy of `frame` and writes it to `path` as a PNG.
pub fn save_overlay(frame: &ImageBuffer, candidates: &[BallPosition], path: impl AsRef<Path>) -> Result<()> {
    let mut rgb = frame.to_rgb_image()?;
    for candidate in candidates {
        let color = confidence_color(candidate.confidence);
        let center = (candidate.x_px.round() as i32, candidate.y_px.round() as i32);
        draw_hollow_circle_mut(&mut rgb, center, candidate.r_px.round() as i32, color);
        draw_cross_mut(&mut rgb, color, center.0, center.1);
    }
    rgb.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ball_detector::{MethodTag, SourceTag};
    use opencv::core::{Mat, Scalar, CV_8UC3};

    #[test]
    fn overlay_writes_a_png_file() {
        let mat = Mat::new_rows_cols_with_default(40, 60, CV_8UC3, Scalar::all(30.0)).unwrap();
        let frame = ImageBuffer::new(mat, 0, SourceTag::TestFixture).unwrap();
        let candidate = BallPosition::new(30.0, 20.0, 8.0, 0.85, 0, MethodTag::Synthetic).unwrap();

        let dir = tempfile_dir();
        let path = dir.join("overlay.png");
        save_overlay(&frame, &[candidate], &path).unwrap();
        assert!(path.exists());
        std::fs::remove_dir_all(dir).ok();
    }

    fn tempfile_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("diagnostics-overlay-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
