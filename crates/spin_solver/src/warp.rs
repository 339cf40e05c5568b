//! Sphere-warp of a reference ball image under a candidate rotation.

use crate::ball_image::BallImage;
use crate::sphere::{lift_to_sphere, project_to_disc, EulerDeg};

/// The result of warping a reference ball by a candidate rotation: a pixel grid the same shape
/// as [`BallImage`], plus a mask of which pixels actually received a sample (the rest are the
/// far hemisphere or fell outside the disc, and must be excluded from correlation).
pub struct WarpedBall {
    pub pixels: Vec<Vec<Option<u8>>>,
}

impl WarpedBall {
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        let size = self.pixels.len() as i32;
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        self.pixels[y as usize][x as usize]
    }
}

/// Warp `reference` by `rotation`, producing the appearance it would have if the physical ball
/// were rotated by that amount between exposures.
///
/// Forward-maps each reference pixel (lift -> rotate -> reproject) rather than inverse-mapping
/// target pixels; this leaves occasional unsampled target-side pixels, which `WarpedBall`'s
/// mask accounts for in the correlation step rather than interpolating them.
pub fn warp(reference: &BallImage, rotation: EulerDeg) -> WarpedBall {
    let resolution = BallImage::RESOLUTION as usize;
    let radius = BallImage::RADIUS_PX;
    let mut pixels = vec![vec![None; resolution]; resolution];

    for iy in 0..resolution {
        for ix in 0..resolution {
            let dx = ix as f64 - radius;
            let dy = iy as f64 - radius;
            let Some(sphere_point) = lift_to_sphere(dx, dy, radius) else {
                continue;
            };
            let rotated = rotation.rotate(sphere_point);
            let Some((tx, ty)) = project_to_disc(rotated, radius) else {
                continue;
            };

            let target_x = (tx + radius).round() as i32;
            let target_y = (ty + radius).round() as i32;
            if target_x < 0 || target_y < 0 || target_x as usize >= resolution || target_y as usize >= resolution {
                continue;
            }

            if let Some(value) = reference.sample(ix as i32, iy as i32) {
                pixels[target_y as usize][target_x as usize] = Some(value);
            }
        }
    }

    WarpedBall { pixels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn zero_rotation_warp_matches_source_on_covered_pixels() {
        let mut source = GrayImage::new(BallImage::RESOLUTION, BallImage::RESOLUTION);
        for y in 0..BallImage::RESOLUTION {
            for x in 0..BallImage::RESOLUTION {
                source.put_pixel(x, y, Luma([((x * 7 + y * 13) % 256) as u8]));
            }
        }
        let ball = BallImage { pixels: source };
        let warped = warp(&ball, EulerDeg::ZERO);

        let center = BallImage::RESOLUTION as i32 / 2;
        assert_eq!(warped.get(center, center), ball.sample(center, center));
    }
}
