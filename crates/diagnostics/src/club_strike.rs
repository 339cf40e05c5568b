//! Optional `ClubStrike_<ts>` pre/post-hit frame montage. No video-muxing crate is available
//! here (`heimdall` only ever encodes single frames to JPEG via `turbojpeg`), so the montage is
//! persisted as a numbered JPEG sequence under a `ClubStrike_<ts>/` directory instead of a
//! literal `.mp4` — a frame-viewer can still step through it in order.

use std::fs;
use std::path::{Path, PathBuf};

use ball_detector::ImageBuffer;

use crate::error::Result;

const JPEG_QUALITY: i32 = 90;

/// Writes `frames` (already in capture order) as `frame_0000.jpg`, `frame_0001.jpg`, ... under
/// `log_dir/ClubStrike_<timestamp_us>/`. Returns the directory written.
pub fn save_club_strike_sequence(log_dir: impl AsRef<Path>, timestamp_us: u64, frames: &[ImageBuffer]) -> Result<PathBuf> {
    let dir = log_dir.as_ref().join(format!("ClubStrike_{timestamp_us}"));
    fs::create_dir_all(&dir)?;

    for (index, frame) in frames.iter().enumerate() {
        let rgb = frame.to_rgb_image()?;
        let image = turbojpeg::Image {
            pixels: rgb.as_raw().as_slice(),
            width: rgb.width() as usize,
            pitch: rgb.width() as usize * 3,
            height: rgb.height() as usize,
            format: turbojpeg::PixelFormat::RGB,
        };
        let jpeg = turbojpeg::compress(image, JPEG_QUALITY, turbojpeg::Subsamp::Sub2x2)?;
        fs::write(dir.join(format!("frame_{index:04}.jpg")), &*jpeg)?;
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ball_detector::SourceTag;
    use opencv::core::{Mat, Scalar, CV_8UC3};

    #[test]
    fn writes_one_jpeg_per_frame() {
        let mat = Mat::new_rows_cols_with_default(20, 20, CV_8UC3, Scalar::all(50.0)).unwrap();
        let frame = ImageBuffer::new(mat, 0, SourceTag::TestFixture).unwrap();
        let dir = std::env::temp_dir().join(format!("diagnostics-clubstrike-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let written = save_club_strike_sequence(&dir, 1234, &[frame.clone(), frame]).unwrap();
        assert!(written.join("frame_0000.jpg").exists());
        assert!(written.join("frame_0001.jpg").exists());
        fs::remove_dir_all(&dir).ok();
    }
}
