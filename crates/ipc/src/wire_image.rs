//! The serializable counterpart to [`ball_detector::ImageBuffer`]: when placed in a message,
//! the message takes ownership. `ImageBuffer` wraps an
//! `opencv::core::Mat`, which has no `serde` impl, so every image that crosses the bus is
//! flattened to raw RGB bytes here and reconstituted on the other side.

use ball_detector::{ImageBuffer, SourceTag};
use opencv::core::{Mat, Scalar, Vec3b, CV_8UC3};
use opencv::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireImage {
    pub width: u32,
    pub height: u32,
    pub timestamp_us: u64,
    pub source: SourceTag,
    /// Row-major RGB, 3 bytes per pixel.
    pub rgb: Vec<u8>,
}

impl WireImage {
    pub fn encode(image: &ImageBuffer) -> Result<Self> {
        let rgb_image = image.to_rgb_image().map_err(Error::BallDetector)?;
        Ok(Self {
            width: image.width(),
            height: image.height(),
            timestamp_us: image.timestamp_us,
            source: image.source,
            rgb: rgb_image.into_raw(),
        })
    }

    pub fn decode(self) -> Result<ImageBuffer> {
        let mut mat = Mat::new_rows_cols_with_default(self.height as i32, self.width as i32, CV_8UC3, Scalar::all(0.0)).map_err(Error::OpenCv)?;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let idx = ((y as u32 * self.width + x as u32) * 3) as usize;
                let pixel = Vec3b::from([self.rgb[idx + 2], self.rgb[idx + 1], self.rgb[idx]]);
                *mat.at_2d_mut::<Vec3b>(y, x).map_err(Error::OpenCv)? = pixel;
            }
        }
        ImageBuffer::new(mat, self.timestamp_us, self.source).map_err(Error::BallDetector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Mat, Point, Scalar, CV_8UC3};
    use opencv::imgproc;

    #[test]
    fn encode_then_decode_preserves_dimensions_and_timestamp() {
        let mut mat = Mat::new_rows_cols_with_default(40, 60, CV_8UC3, Scalar::all(10.0)).unwrap();
        imgproc::circle(&mut mat, Point::new(30, 20), 8, Scalar::new(200.0, 150.0, 100.0, 0.0), -1, imgproc::LINE_8, 0).unwrap();
        let image = ImageBuffer::new(mat, 42, SourceTag::TestFixture).unwrap();

        let wire = WireImage::encode(&image).unwrap();
        assert_eq!(wire.rgb.len(), 40 * 60 * 3);

        let decoded = wire.decode().unwrap();
        assert_eq!(decoded.width(), 60);
        assert_eq!(decoded.height(), 40);
        assert_eq!(decoded.timestamp_us, 42);
    }
}
