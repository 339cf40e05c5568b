//! Normalized cross-correlation over the interior region where both images are defined.

use crate::ball_image::BallImage;
use crate::warp::WarpedBall;

/// Pearson correlation coefficient between `warped` and `target`, restricted to pixels where
/// the warp produced a sample. Returns `None` if fewer than a handful of pixels overlap (too
/// little support to trust the score).
pub fn normalized_cross_correlation(warped: &WarpedBall, target: &BallImage) -> Option<f64> {
    const MIN_SUPPORT: usize = 64;

    let resolution = BallImage::RESOLUTION as i32;
    let mut xs = Vec::new();
    let mut ys = Vec::new();

    for y in 0..resolution {
        for x in 0..resolution {
            if let (Some(w), Some(t)) = (warped.get(x, y), target.sample(x, y)) {
                xs.push(f64::from(w));
                ys.push(f64::from(t));
            }
        }
    }

    if xs.len() < MIN_SUPPORT {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..xs.len() {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::EulerDeg;
    use crate::warp::warp;
    use image::{GrayImage, Luma};

    #[test]
    fn identical_images_correlate_perfectly() {
        let mut source = GrayImage::new(BallImage::RESOLUTION, BallImage::RESOLUTION);
        for y in 0..BallImage::RESOLUTION {
            for x in 0..BallImage::RESOLUTION {
                source.put_pixel(x, y, Luma([((x * 3 + y * 11) % 256) as u8]));
            }
        }
        let ball = BallImage { pixels: source.clone() };
        let warped = warp(&ball, EulerDeg::ZERO);
        let target = BallImage { pixels: source };

        let score = normalized_cross_correlation(&warped, &target).unwrap();
        assert!(score > 0.99);
    }
}
