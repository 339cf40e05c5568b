//! Crop-and-normalize step: isolates and resamples a ball disc to a common working resolution.

use image::{imageops, GrayImage, Luma};

use crate::error::{Error, Result};

/// A grayscale ball image resampled to [`BallImage::RESOLUTION`] pixels square, with the ball
/// disc filling the frame (radius == half the resolution).
#[derive(Debug, Clone)]
pub struct BallImage {
    pub pixels: GrayImage,
}

impl BallImage {
    /// Common working resolution both inputs are normalized to, so that warp sampling and
    /// cross-correlation compare like-for-like pixel grids regardless of the cameras' native
    /// apparent ball radius.
    pub const RESOLUTION: u32 = 128;
    pub const RADIUS_PX: f64 = (Self::RESOLUTION as f64) / 2.0;

    /// Crop `source` to the square bounding box of a ball at `(center_x, center_y)` with the
    /// given `radius_px`, then resample to [`Self::RESOLUTION`].
    pub fn from_detection(source: &GrayImage, center_x: f64, center_y: f64, radius_px: f64) -> Result<Self> {
        if radius_px <= 0.0 {
            return Err(Error::NonPositiveRadius { radius_px });
        }
        if source.width() == 0 || source.height() == 0 {
            return Err(Error::EmptyImage);
        }

        let (width, height) = (source.width() as i32, source.height() as i32);
        let left = (center_x - radius_px).round() as i32;
        let top = (center_y - radius_px).round() as i32;
        let side = (radius_px * 2.0).round() as u32;

        let mut cropped = GrayImage::new(side, side);
        for y in 0..side as i32 {
            for x in 0..side as i32 {
                let (sx, sy) = (left + x, top + y);
                let pixel = if sx >= 0 && sy >= 0 && sx < width && sy < height {
                    *source.get_pixel(sx as u32, sy as u32)
                } else {
                    Luma([0])
                };
                cropped.put_pixel(x as u32, y as u32, pixel);
            }
        }

        let resized = imageops::resize(&cropped, Self::RESOLUTION, Self::RESOLUTION, imageops::FilterType::Triangle);
        Ok(Self { pixels: resized })
    }

    pub fn sample(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x as u32 >= Self::RESOLUTION || y as u32 >= Self::RESOLUTION {
            return None;
        }
        Some(self.pixels.get_pixel(x as u32, y as u32).0[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_rejects_non_positive_radius() {
        let source = GrayImage::new(32, 32);
        assert!(BallImage::from_detection(&source, 16.0, 16.0, 0.0).is_err());
    }

    #[test]
    fn crop_produces_normalized_resolution() {
        let mut source = GrayImage::new(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                source.put_pixel(x, y, Luma([((x + y) % 256) as u8]));
            }
        }
        let ball = BallImage::from_detection(&source, 32.0, 32.0, 20.0).unwrap();
        assert_eq!(ball.pixels.width(), BallImage::RESOLUTION);
        assert_eq!(ball.pixels.height(), BallImage::RESOLUTION);
    }
}
