use serde::{Deserialize, Serialize};

/// Region of interest and thresholding parameters for [`crate::MotionDetectStage`], mirroring
/// `motion_detect_stage.cpp`'s `Config`.
///
/// `roi_x`, `roi_y`, `roi_width`, `roi_height` are pixel coordinates in the *full-resolution*
/// frame, before `hskip`/`vskip` subsampling is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionDetectConfig {
    pub roi_x: u32,
    pub roi_y: u32,
    pub roi_width: u32,
    pub roi_height: u32,
    pub hskip: u32,
    pub vskip: u32,
    pub difference_m: f64,
    pub difference_c: i32,
    pub region_threshold: f64,
    pub frame_period: u32,
    pub post_motion_frames_to_capture: u32,
    pub ring_buffer_capacity: usize,
}

impl Default for MotionDetectConfig {
    fn default() -> Self {
        Self {
            roi_x: 0,
            roi_y: 0,
            roi_width: 1,
            roi_height: 1,
            hskip: 1,
            vskip: 1,
            difference_m: 0.1,
            difference_c: 10,
            region_threshold: 0.005,
            frame_period: 5,
            post_motion_frames_to_capture: 1,
            ring_buffer_capacity: 8,
        }
    }
}
