//! Concrete [`fsm::Camera1`]/[`fsm::Camera2`] implementations. The platform camera driver
//! itself is explicitly out of scope: the core consumes an abstract camera supplying cropped
//! frames and a configurable motion-detection stage. These wrap
//! `opencv::videoio::VideoCapture` for live rigs and a still-image fixture pair for every
//! testing/replay mode, since nothing ships a real camera-driver crate to bind against.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use ball_detector::{BallPosition, ImageBuffer, SourceTag};
use crossbeam_channel::Sender;
use fsm::{Camera1, Camera2, Event};
use motion_detect::{FrameView, MotionDetectConfig, MotionDetectStage};
use opencv::core::{Mat, Rect};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, VideoCaptureTrait, VideoCaptureTraitConst};
use opencv::{imgcodecs, imgproc};
use tracing::{info, warn};
use trigger::TriggerController;

use crate::time::now_us;

fn mat_to_gray_buffer(mat: &Mat) -> opencv::Result<(Vec<u8>, i32, i32)> {
    let mut gray = Mat::default();
    imgproc::cvt_color(mat, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;
    let size = gray.size()?;
    let mut data = vec![0u8; (size.width * size.height) as usize];
    for y in 0..size.height {
        for x in 0..size.width {
            data[(y * size.width + x) as usize] = *gray.at_2d::<u8>(y, x)?;
        }
    }
    Ok((data, size.width, size.height))
}

/// Live camera-1 rig: full-sensor capture while searching for the teed ball, a cropped
/// high-FPS capture with the motion stage running on its own thread once armed.
pub struct VideoCaptureCamera1 {
    capture: Arc<Mutex<VideoCapture>>,
    motion_config: MotionDetectConfig,
    trigger: Arc<TriggerController<rppal::gpio::OutputPin>>,
    events: Sender<Event>,
    motion_thread: Option<JoinHandle<()>>,
    stop_flag: Arc<AtomicBool>,
}

impl VideoCaptureCamera1 {
    pub fn open(device_index: i32, motion_config: MotionDetectConfig, trigger: Arc<TriggerController<rppal::gpio::OutputPin>>, events: Sender<Event>) -> opencv::Result<Self> {
        let capture = VideoCapture::new(device_index, videoio::CAP_ANY)?;
        Ok(Self {
            capture: Arc::new(Mutex::new(capture)),
            motion_config,
            trigger,
            events,
            motion_thread: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    /// A second handle onto the same underlying capture device, for the full-frame poll thread
    /// (`teebox_cli::watcher_process::spawn_full_frame_poller`) that runs alongside the FSM's
    /// own handle. Shares the `VideoCapture` and trigger controller; the crop/motion-thread
    /// lifecycle fields are independent since only the FSM's handle ever calls
    /// [`Camera1::configure_crop_and_arm_motion`]/[`Camera1::reset_to_full_frame`]: the FSM
    /// never calls [`Camera1::capture_full_frame`] itself, and the poller never calls those
    /// two, since the FSM only ever consumes `Event::Frame`.
    pub fn handle(&self) -> Self {
        Self {
            capture: Arc::clone(&self.capture),
            motion_config: self.motion_config.clone(),
            trigger: Arc::clone(&self.trigger),
            events: self.events.clone(),
            motion_thread: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Camera1 for VideoCaptureCamera1 {
    fn capture_full_frame(&mut self) -> Result<ImageBuffer, String> {
        let mut mat = Mat::default();
        let mut capture = self.capture.lock().expect("camera1 mutex poisoned");
        capture.read(&mut mat).map_err(|e| e.to_string())?;
        drop(capture);
        ImageBuffer::new(mat, now_us(), SourceTag::Camera1FullFrame).map_err(|e| e.to_string())
    }

    fn configure_crop_and_arm_motion(&mut self, ball: &BallPosition) -> Result<(), String> {
        self.stop_flag.store(false, Ordering::SeqCst);
        let capture = Arc::clone(&self.capture);
        let trigger = Arc::clone(&self.trigger);
        let events = self.events.clone();
        let stop_flag = Arc::clone(&self.stop_flag);
        let motion_config = self.motion_config.clone();
        let crop = Rect::new((ball.x_px - ball.r_px * 4.0).max(0.0) as i32, (ball.y_px - ball.r_px * 4.0).max(0.0) as i32, (ball.r_px * 8.0) as i32, (ball.r_px * 8.0) as i32);

        let handle = thread::spawn(move || {
            let mut stage = match MotionDetectStage::new(motion_config, crop.width as u32, crop.height as u32) {
                Ok(stage) => stage,
                Err(error) => {
                    warn!(%error, "camera1: failed to configure motion stage, crop thread exiting");
                    return;
                }
            };
            let mut sequence = 0u64;
            while !stop_flag.load(Ordering::SeqCst) {
                let mut mat = Mat::default();
                {
                    let mut capture = capture.lock().expect("camera1 mutex poisoned");
                    if capture.read(&mut mat).is_err() || mat.empty() {
                        continue;
                    }
                }
                let Ok(cropped) = mat.roi(crop) else { continue };
                let Ok((gray, width, height)) = mat_to_gray_buffer(&cropped) else { continue };
                let Ok(frame) = FrameView::new(&gray, width as usize, width as u32, height as u32) else { continue };

                stage.process_frame(frame, sequence, 240.0, || {
                    if let Err(error) = trigger.send_trigger() {
                        warn!(%error, "camera1: trigger controller failed to fire");
                    }
                    if events.send(Event::MotionTriggered).is_err() {
                        warn!("camera1: event queue closed, dropping motion trigger");
                    }
                });
                sequence += 1;
            }
        });
        self.motion_thread = Some(handle);
        Ok(())
    }

    fn reset_to_full_frame(&mut self) -> Result<(), String> {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.motion_thread.take() {
            handle.join().map_err(|_| "camera1 motion thread panicked".to_string())?;
        }
        Ok(())
    }
}

/// Live camera-2 rig: a background reference frame, then one externally-triggered exposure
/// per shot.
pub struct VideoCaptureCamera2 {
    capture: VideoCapture,
}

impl VideoCaptureCamera2 {
    pub fn open(device_index: i32) -> opencv::Result<Self> {
        Ok(Self {
            capture: VideoCapture::new(device_index, videoio::CAP_ANY)?,
        })
    }
}

impl Camera2 for VideoCaptureCamera2 {
    fn configure_external_trigger(&mut self) -> Result<(), String> {
        info!("camera2: external trigger mode assumed to already be configured on the driver");
        Ok(())
    }

    fn capture_pre_image(&mut self) -> Result<ImageBuffer, String> {
        let mut mat = Mat::default();
        self.capture.read(&mut mat).map_err(|e| e.to_string())?;
        ImageBuffer::new(mat, now_us(), SourceTag::Camera2PreImage).map_err(|e| e.to_string())
    }

    fn capture_triggered_image(&mut self) -> Result<ImageBuffer, String> {
        let mut mat = Mat::default();
        self.capture.read(&mut mat).map_err(|e| e.to_string())?;
        ImageBuffer::new(mat, now_us(), SourceTag::Camera2Strobed).map_err(|e| e.to_string())
    }
}

/// Reads a fixed still image off disk every time a capture is requested: used by every
/// testing/replay mode, where there is no live sensor to poll.
pub struct FixtureCamera1 {
    full_frame_path: PathBuf,
}

impl FixtureCamera1 {
    pub fn new(full_frame_path: impl Into<PathBuf>) -> Self {
        Self {
            full_frame_path: full_frame_path.into(),
        }
    }

    fn read(&self, path: &Path, source: SourceTag) -> Result<ImageBuffer, String> {
        let mat = imgcodecs::imread(&path.to_string_lossy(), imgcodecs::IMREAD_COLOR).map_err(|e| e.to_string())?;
        ImageBuffer::new(mat, now_us(), source).map_err(|e| e.to_string())
    }
}

impl Camera1 for FixtureCamera1 {
    fn capture_full_frame(&mut self) -> Result<ImageBuffer, String> {
        self.read(&self.full_frame_path.clone(), SourceTag::Camera1FullFrame)
    }

    fn configure_crop_and_arm_motion(&mut self, _ball: &BallPosition) -> Result<(), String> {
        Ok(())
    }

    fn reset_to_full_frame(&mut self) -> Result<(), String> {
        Ok(())
    }
}

pub struct FixtureCamera2 {
    pre_image_path: PathBuf,
    strobed_path: PathBuf,
}

impl FixtureCamera2 {
    pub fn new(pre_image_path: impl Into<PathBuf>, strobed_path: impl Into<PathBuf>) -> Self {
        Self {
            pre_image_path: pre_image_path.into(),
            strobed_path: strobed_path.into(),
        }
    }

    fn read(&self, path: &Path, source: SourceTag) -> Result<ImageBuffer, String> {
        let mat = imgcodecs::imread(&path.to_string_lossy(), imgcodecs::IMREAD_COLOR).map_err(|e| e.to_string())?;
        ImageBuffer::new(mat, now_us(), source).map_err(|e| e.to_string())
    }
}

impl Camera2 for FixtureCamera2 {
    fn configure_external_trigger(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn capture_pre_image(&mut self) -> Result<ImageBuffer, String> {
        self.read(&self.pre_image_path.clone(), SourceTag::Camera2PreImage)
    }

    fn capture_triggered_image(&mut self) -> Result<ImageBuffer, String> {
        self.read(&self.strobed_path.clone(), SourceTag::Camera2Strobed)
    }
}
