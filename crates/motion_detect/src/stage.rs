use tracing::{debug, trace};

use crate::config::MotionDetectConfig;
use crate::error::{Error, Result};
use crate::frame::FrameView;
use crate::ring::{FrameRecord, RecentFrameRing};

/// Per-pixel region-of-interest motion detector driven by the camera's post-processing
/// pipeline, one call per delivered frame.
///
/// Owns no image buffers beyond its own previous-frame snapshot and the recent-frame ring;
/// `process_frame` borrows the caller's frame and never allocates on the motion-free path.
pub struct MotionDetectStage {
    config: MotionDetectConfig,
    roi_x: u32,
    roi_y: u32,
    roi_width: u32,
    roi_height: u32,
    region_threshold: u32,
    previous_frame: Vec<u8>,
    first_time: bool,
    paused: bool,
    post_motion_countdown: u32,
    recent_frames: RecentFrameRing,
}

impl MotionDetectStage {
    /// Resolve `config`'s ROI (given in full-resolution pixel coordinates) against a
    /// `frame_width x frame_height` subsampled stream, clamping to fit as
    /// `motion_detect_stage.cpp`'s `Configure()` does.
    pub fn new(config: MotionDetectConfig, frame_width: u32, frame_height: u32) -> Result<Self> {
        let hskip = config.hskip.max(1);
        let vskip = config.vskip.max(1);
        let sampled_width = frame_width / hskip;
        let sampled_height = frame_height / vskip;

        let roi_x = (config.roi_x / hskip).min(sampled_width);
        let roi_y = (config.roi_y / vskip).min(sampled_height);
        let roi_width = (config.roi_width / hskip).min(sampled_width.saturating_sub(roi_x));
        let roi_height = (config.roi_height / vskip).min(sampled_height.saturating_sub(roi_y));

        if roi_width == 0 || roi_height == 0 {
            return Err(Error::RoiOutOfBounds {
                roi_x,
                roi_y,
                roi_w: roi_width,
                roi_h: roi_height,
                frame_w: frame_width,
                frame_h: frame_height,
            });
        }

        let roi_area = roi_width * roi_height;
        let region_threshold = (config.region_threshold * f64::from(roi_area)).clamp(0.0, f64::from(roi_area)) as u32;

        Ok(Self {
            config,
            roi_x,
            roi_y,
            roi_width,
            roi_height,
            region_threshold,
            previous_frame: vec![0; roi_area as usize],
            first_time: true,
            paused: false,
            post_motion_countdown: 0,
            recent_frames: RecentFrameRing::new(config.ring_buffer_capacity),
        })
    }

    pub fn recent_frames(&self) -> &RecentFrameRing {
        &self.recent_frames
    }

    /// Process one delivered frame. `on_trigger` is invoked synchronously, before this call
    /// returns, the instant the ROI threshold is crossed — the caller is expected to emit the
    /// pulse plan from inside it, to keep the shutter-to-motion latency bounded.
    ///
    /// Returns whether motion was detected on this call.
    pub fn process_frame(&mut self, frame: FrameView, sequence: u64, frame_rate: f64, mut on_trigger: impl FnMut()) -> bool {
        if self.paused && self.post_motion_countdown == 0 {
            return false;
        }

        if self.config.frame_period != 0 && sequence % u64::from(self.config.frame_period) != 0 {
            return false;
        }

        let hskip = self.config.hskip.max(1);
        let vskip = self.config.vskip.max(1);

        if self.first_time {
            self.first_time = false;
            for y in 0..self.roi_height {
                let y_full = (self.roi_y + y) * vskip;
                for x in 0..self.roi_width {
                    let x_full = (self.roi_x + x) * hskip;
                    self.previous_frame[(y * self.roi_width + x) as usize] = frame.pixel(x_full, y_full);
                }
            }
            trace!(sequence, "motion_detect: seeded previous-frame buffer");
            return false;
        }

        let mut motion_detected = false;
        let mut regions: u32 = 0;

        'rows: for y in 0..self.roi_height {
            let y_full = (self.roi_y + y) * vskip;
            for x in 0..self.roi_width {
                let x_full = (self.roi_x + x) * hskip;
                let new_value = i32::from(frame.pixel(x_full, y_full));
                let idx = (y * self.roi_width + x) as usize;
                let old_value = i32::from(self.previous_frame[idx]);
                self.previous_frame[idx] = new_value as u8;

                let threshold = self.config.difference_m * f64::from(old_value) + f64::from(self.config.difference_c);
                if f64::from((new_value - old_value).abs()) > threshold {
                    regions += 1;
                }
            }

            motion_detected = regions >= self.region_threshold;
            if motion_detected {
                break 'rows;
            }
        }

        if motion_detected && !self.paused {
            debug!(sequence, regions, threshold = self.region_threshold, "motion_detect: triggering");
            on_trigger();
            self.paused = true;
            self.post_motion_countdown = self.config.post_motion_frames_to_capture;
        }

        if !self.paused || self.post_motion_countdown > 0 {
            let is_hit_frame = self.post_motion_countdown == self.config.post_motion_frames_to_capture && self.paused;
            self.recent_frames.push(FrameRecord {
                sequence,
                frame_rate,
                is_hit_frame,
                pixels: frame.data.to_vec(),
            });
            if self.post_motion_countdown > 0 {
                self.post_motion_countdown -= 1;
            }
        }

        motion_detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_frame(value: u8, width: u32, height: u32) -> Vec<u8> {
        vec![value; (width * height) as usize]
    }

    #[test]
    fn first_frame_seeds_previous_buffer_and_reports_no_motion() {
        let config = MotionDetectConfig {
            roi_x: 0,
            roi_y: 0,
            roi_width: 4,
            roi_height: 4,
            frame_period: 1,
            ..Default::default()
        };
        let mut stage = MotionDetectStage::new(config, 4, 4).unwrap();
        let data = uniform_frame(50, 4, 4);
        let frame = FrameView::new(&data, 4, 4, 4).unwrap();

        let mut triggered = false;
        let motion = stage.process_frame(frame, 0, 240.0, || triggered = true);
        assert!(!motion);
        assert!(!triggered);
    }

    #[test]
    fn large_pixel_jump_triggers_motion_once() {
        let config = MotionDetectConfig {
            roi_x: 0,
            roi_y: 0,
            roi_width: 4,
            roi_height: 4,
            frame_period: 1,
            region_threshold: 0.5,
            difference_m: 0.0,
            difference_c: 5,
            post_motion_frames_to_capture: 2,
            ring_buffer_capacity: 4,
            ..Default::default()
        };
        let mut stage = MotionDetectStage::new(config, 4, 4).unwrap();

        let baseline = uniform_frame(10, 4, 4);
        let frame = FrameView::new(&baseline, 4, 4, 4).unwrap();
        stage.process_frame(frame, 0, 240.0, || {});

        let moved = uniform_frame(250, 4, 4);
        let frame = FrameView::new(&moved, 4, 4, 4).unwrap();
        let mut trigger_count = 0;
        let motion = stage.process_frame(frame, 1, 240.0, || trigger_count += 1);

        assert!(motion);
        assert_eq!(trigger_count, 1);
        assert_eq!(stage.recent_frames().len(), 1);
    }

    #[test]
    fn frame_period_skips_intermediate_sequences() {
        let config = MotionDetectConfig {
            roi_width: 4,
            roi_height: 4,
            frame_period: 3,
            ..Default::default()
        };
        let mut stage = MotionDetectStage::new(config, 4, 4).unwrap();
        let data = uniform_frame(10, 4, 4);
        let frame = FrameView::new(&data, 4, 4, 4).unwrap();

        assert!(!stage.process_frame(frame, 1, 240.0, || {}));
        assert!(stage.first_time);
        assert!(!stage.process_frame(frame, 3, 240.0, || {}));
        assert!(!stage.first_time);
    }
}
