//! The shared image-buffer data model.
//!
//! Every vision component downstream of a camera ([`crate`], `shot_analyzer`, `diagnostics`,
//! `ipc`) passes this type around rather than a bare `opencv::core::Mat`, so that the
//! timestamp and provenance tag travel with the pixels instead of being threaded through
//! call sites separately.

use opencv::core::Mat;
use opencv::prelude::*;

use crate::error::{Error, Result};

/// Where an [`ImageBuffer`] came from, for diagnostics and for dispatching to the right
/// detector search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SourceTag {
    /// Full-sensor frame from camera 1 while searching for a teed ball.
    Camera1FullFrame,
    /// Cropped, high-FPS frame from camera 1 while the motion-detection stage is armed.
    Camera1Crop,
    /// The strobe-exposed multi-ball image from camera 2.
    Camera2Strobed,
    /// The "no ball present" background reference taken by camera 2 before arming.
    Camera2PreImage,
    /// A still image replayed through `automated_testing` / approval-test mode.
    TestFixture,
}

/// Free-form metadata carried alongside a frame: camera gain, exposure, crop origin relative
/// to the full sensor, and so on. Kept as a small owned map rather than a typed struct since
/// the set of interesting fields differs per source tag and grows over time.
pub type ImageMeta = std::collections::BTreeMap<String, String>;

/// An immutable grayscale or BGR pixel buffer plus the provenance the rest of the pipeline
/// needs: capture timestamp, source, and free-form metadata.
///
/// Invariant: the pixel matrix is non-empty and has positive dimensions.
/// Once constructed an `ImageBuffer` is never mutated; downstream stages that need a modified
/// copy (blurred, undistorted, cropped) produce a new `ImageBuffer`.
#[derive(Clone)]
pub struct ImageBuffer {
    mat: Mat,
    pub timestamp_us: u64,
    pub source: SourceTag,
    pub meta: ImageMeta,
}

impl ImageBuffer {
    pub fn new(mat: Mat, timestamp_us: u64, source: SourceTag) -> Result<Self> {
        Self::with_meta(mat, timestamp_us, source, ImageMeta::new())
    }

    pub fn with_meta(mat: Mat, timestamp_us: u64, source: SourceTag, meta: ImageMeta) -> Result<Self> {
        let size = mat.size().map_err(Error::OpenCv)?;
        if mat.empty() {
            return Err(Error::EmptyImage);
        }
        if size.width <= 0 || size.height <= 0 {
            return Err(Error::NonPositiveDimensions {
                width: size.width.max(0) as u32,
                height: size.height.max(0) as u32,
            });
        }
        Ok(Self {
            mat,
            timestamp_us,
            source,
            meta,
        })
    }

    pub fn mat(&self) -> &Mat {
        &self.mat
    }

    pub fn width(&self) -> u32 {
        self.mat.cols().max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.mat.rows().max(0) as u32
    }

    /// Convert to an owned RGB buffer for overlay drawing (`diagnostics`) or PNG persistence.
    /// BGR and grayscale sources are both supported; grayscale is replicated across channels.
    pub fn to_rgb_image(&self) -> Result<image::RgbImage> {
        let width = self.width();
        let height = self.height();
        let channels = self.mat.channels();

        let mut rgb = image::RgbImage::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let pixel = if channels == 1 {
                    let v = *self.mat.at_2d::<u8>(y, x).map_err(Error::OpenCv)?;
                    [v, v, v]
                } else {
                    let v = *self.mat.at_2d::<opencv::core::Vec3b>(y, x).map_err(Error::OpenCv)?;
                    [v[2], v[1], v[0]]
                };
                rgb.put_pixel(x as u32, y as u32, image::Rgb(pixel));
            }
        }
        Ok(rgb)
    }
}

impl std::fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("timestamp_us", &self.timestamp_us)
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Mat, CV_8UC1};

    #[test]
    fn empty_mat_is_rejected() {
        let mat = Mat::default();
        let err = ImageBuffer::new(mat, 0, SourceTag::TestFixture).unwrap_err();
        assert!(matches!(err, Error::EmptyImage));
    }

    #[test]
    fn non_empty_mat_is_accepted() {
        let mat = Mat::new_rows_cols_with_default(10, 20, CV_8UC1, 0.0.into()).unwrap();
        let buffer = ImageBuffer::new(mat, 1_000, SourceTag::Camera1FullFrame).unwrap();
        assert_eq!(buffer.width(), 20);
        assert_eq!(buffer.height(), 10);
    }
}
