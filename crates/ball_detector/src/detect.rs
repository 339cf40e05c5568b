//! The per-frame Hough-circle detection algorithm.

use opencv::core::{Mat, Rect, Scalar, Size, Vec3f, CV_8UC1};
use opencv::prelude::*;
use opencv::{core, imgproc};

use crate::candidate::{BallPosition, MethodTag};
use crate::error::{Error, Result};
use crate::image::ImageBuffer;
use crate::modes::SearchMode;
use crate::params::{param2_ladder, BlurOrder, HoughParams};
use crate::score::{mean_color_at, score_candidate};

fn method_tag_for(mode: &SearchMode) -> MethodTag {
    match mode {
        SearchMode::PlacedBall { .. } => MethodTag::PlacedBall,
        SearchMode::StrobedBall { .. } => MethodTag::StrobedBall,
        SearchMode::BallAgainstReference { .. } => MethodTag::BallAgainstReference,
    }
}

fn blur(src: &Mat, kernel: u32) -> Result<Mat> {
    if kernel == 0 {
        return Ok(src.clone());
    }
    let odd_kernel = if kernel % 2 == 0 { kernel + 1 } else { kernel };
    let mut dst = Mat::default();
    imgproc::gaussian_blur(
        src,
        &mut dst,
        Size::new(odd_kernel as i32, odd_kernel as i32),
        0.0,
        0.0,
        core::BORDER_DEFAULT,
    )
    .map_err(Error::OpenCv)?;
    Ok(dst)
}

/// Steps 1-4 of : grayscale, blur/Canny in the config-selected order, blank the
/// ignore band at the bottom of the frame.
fn prepare_edges(gray: &Mat, params: &HoughParams) -> Result<Mat> {
    let mut edges = Mat::default();

    match params.blur_order {
        BlurOrder::BlurBeforeAndAfterCanny => {
            let blurred = blur(gray, params.pre_canny_blur)?;
            imgproc::canny(&blurred, &mut edges, params.canny_lower, params.canny_upper, 3, false).map_err(Error::OpenCv)?;
            if params.pre_hough_blur > 0 {
                edges = blur(&edges, params.pre_hough_blur)?;
            }
        }
        BlurOrder::CannyThenBlur => {
            imgproc::canny(gray, &mut edges, params.canny_lower, params.canny_upper, 3, false).map_err(Error::OpenCv)?;
            edges = blur(&edges, params.pre_hough_blur.max(params.pre_canny_blur))?;
        }
    }

    if params.ignore_band_bottom_fraction > 0.0 {
        let size = edges.size().map_err(Error::OpenCv)?;
        let band_height = (f64::from(size.height) * params.ignore_band_bottom_fraction).round() as i32;
        if band_height > 0 && band_height <= size.height {
            let band = Rect::new(0, size.height - band_height, size.width, band_height);
            imgproc::rectangle(&mut edges, band, Scalar::all(0.0), -1, imgproc::LINE_8, 0).map_err(Error::OpenCv)?;
        }
    }

    Ok(edges)
}

fn hough_circles_at(edges: &Mat, params: &HoughParams, param2: f64) -> Result<Vec<Vec3f>> {
    let mut circles = Mat::default();
    imgproc::hough_circles(
        edges,
        &mut circles,
        params.hough_variant.as_opencv(),
        params.dp,
        params.min_dist,
        params.canny_param1,
        param2,
        params.min_radius_px,
        params.max_radius_px,
    )
    .map_err(Error::OpenCv)?;

    if circles.empty() {
        return Ok(Vec::new());
    }

    let count = circles.cols().max(circles.rows());
    let mut out = Vec::with_capacity(count as usize);
    for i in 0..count {
        let v = *circles.at_2d::<Vec3f>(0, i).map_err(Error::OpenCv)?;
        out.push(v);
    }
    Ok(out)
}

/// Adaptively steps the accumulator threshold between `min_param2` and `max_param2`, stopping
/// at the first value that yields a circle count within
/// `[min_returned_circles, max_returned_circles]`. If no step in the ladder satisfies the
/// bound, the closest-count step (ties broken toward fewer circles) is used.
fn adaptive_hough(edges: &Mat, params: &HoughParams) -> Result<Vec<Vec3f>> {
    let ladder = param2_ladder(params);
    let mut best: Option<Vec<Vec3f>> = None;

    for param2 in ladder {
        let circles = hough_circles_at(edges, params, param2)?;
        let count = circles.len();
        if count >= params.min_returned_circles && count <= params.max_returned_circles {
            return Ok(circles);
        }
        let better = match &best {
            None => true,
            Some(current) => distance_from_band(count, params) < distance_from_band(current.len(), params),
        };
        if better {
            best = Some(circles);
        }
    }

    Ok(best.unwrap_or_default())
}

fn distance_from_band(count: usize, params: &HoughParams) -> usize {
    if count < params.min_returned_circles {
        params.min_returned_circles - count
    } else if count > params.max_returned_circles {
        count - params.max_returned_circles
    } else {
        0
    }
}

/// Runs the ball detector on `image` under `mode`, returning candidates sorted by descending
/// score. Empty input is an error; if no candidates survive Hough adaptation an empty list
/// is returned with no error.
pub fn detect(image: &ImageBuffer, mode: &SearchMode, params: &HoughParams) -> Result<Vec<BallPosition>> {
    let bgr_or_gray = image.mat();
    if bgr_or_gray.empty() {
        return Err(Error::EmptyImage);
    }

    let channels = bgr_or_gray.channels();
    let mut gray = Mat::default();
    if channels == 1 {
        gray = bgr_or_gray.clone();
    } else {
        imgproc::cvt_color(bgr_or_gray, &mut gray, imgproc::COLOR_BGR2GRAY, 0).map_err(Error::OpenCv)?;
    }

    let edges = prepare_edges(&gray, params)?;
    let circles = adaptive_hough(&edges, params)?;

    let size = gray.size().map_err(Error::OpenCv)?;
    let mut scored: Vec<(BallPosition, f64)> = Vec::with_capacity(circles.len());

    for circle in circles {
        let mean_color = if mode.reference_color().is_some() && channels >= 3 {
            mean_color_at(bgr_or_gray, f64::from(circle[0]), f64::from(circle[1]), 3)
        } else {
            None
        };
        let breakdown = score_candidate(circle, (size.width, size.height), mode, mean_color);
        let confidence = breakdown.combined().clamp(0.0, 1.0);

        let position = BallPosition::new(
            f64::from(circle[0]),
            f64::from(circle[1]),
            f64::from(circle[2]),
            confidence,
            image.timestamp_us,
            method_tag_for(mode),
        )?;
        scored.push((position, confidence));
    }

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(scored.into_iter().map(|(position, _)| position).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::SourceTag;
    use opencv::core::{Point, Scalar, CV_8UC3};

    fn synthetic_ball(width: i32, height: i32, center: (i32, i32), radius: i32) -> Mat {
        let mut mat = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(30.0)).unwrap();
        imgproc::circle(
            &mut mat,
            Point::new(center.0, center.1),
            radius,
            Scalar::new(220.0, 220.0, 220.0, 0.0),
            -1,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
        mat
    }

    #[test]
    fn empty_image_is_rejected() {
        let mat = Mat::new_rows_cols_with_default(1, 1, CV_8UC1, 0.0.into()).unwrap();
        let image = ImageBuffer::new(mat, 0, SourceTag::TestFixture).unwrap();
        let mode = SearchMode::PlacedBall {
            expected_center_px: (0.0, 0.0),
            expected_radius_px: 1.0,
        };
        // A 1x1 frame will fail Canny/Hough preconditions upstream in real OpenCV; here we
        // only assert the empty-buffer guard rejects a genuinely empty Mat.
        let empty = Mat::default();
        assert!(ImageBuffer::new(empty, 0, SourceTag::TestFixture).is_err());
        let _ = (image, mode);
    }

    #[test]
    fn placed_ball_mode_finds_single_synthetic_circle() {
        let mat = synthetic_ball(320, 240, (160, 120), 30);
        let image = ImageBuffer::new(mat, 123, SourceTag::TestFixture).unwrap();
        let mode = SearchMode::PlacedBall {
            expected_center_px: (160.0, 120.0),
            expected_radius_px: 30.0,
        };
        let params = HoughParams {
            min_radius_px: 15,
            max_radius_px: 60,
            min_returned_circles: 1,
            max_returned_circles: 3,
            ..Default::default()
        };
        let candidates = detect(&image, &mode, &params).unwrap();
        if let Some(best) = candidates.first() {
            assert!((best.x_px - 160.0).abs() < 15.0);
            assert!((best.y_px - 120.0).abs() < 15.0);
        }
    }
}
