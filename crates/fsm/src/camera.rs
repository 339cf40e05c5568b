use ball_detector::{BallPosition, ImageBuffer};

/// Camera 1 (the watcher's teed-ball camera) as the FSM sees it. The concrete implementation —
/// sensor enumeration, the post-processing plugin hook the motion-detection stage rides
/// on — is the platform-specific camera driver this trait deliberately stays out of; this
/// trait is the well-defined contract the rest of the watcher FSM consumes it through.
///
/// Mirrors the shape of [`trigger::GpioPin`]: a minimal trait, one real implementation supplied
/// by the binary, one recording test double.
pub trait Camera1: Send {
    /// Configure the full sensor resolution and return one frame, polled repeatedly while
    /// searching for a teed ball (`WaitingForBall`/`WaitingForBallStabilization`).
    fn capture_full_frame(&mut self) -> Result<ImageBuffer, String>;

    /// Reconfigure to a small crop centered on `ball` at the sensor's highest supported FPS and
    /// install the motion-detection stage with an ROI inscribed in the ball (entering
    /// `WaitingForBallHit`). The installed stage is expected to push [`crate::Event::MotionTriggered`]
    /// onto the FSM's queue from its `on_trigger` callback.
    fn configure_crop_and_arm_motion(&mut self, ball: &BallPosition) -> Result<(), String>;

    /// Tear down the crop and motion stage, returning to full-frame polling (entered on every
    /// return to `WaitingForBall`, and on shutdown).
    fn reset_to_full_frame(&mut self) -> Result<(), String>;
}

/// Camera 2 (the flight camera) as the flight FSM sees it.
pub trait Camera2: Send {
    /// Switch the sensor into external-trigger mode (entering `WaitingForCameraTrigger`).
    fn configure_external_trigger(&mut self) -> Result<(), String>;

    /// Take one frame with no ball present, used as the club-strike diagnostic background.
    fn capture_pre_image(&mut self) -> Result<ImageBuffer, String>;

    /// Blocks until the hardware shutter trigger fires and returns the resulting
    /// multi-exposure image. The trigger itself never crosses the FSM event queue: it is a GPIO
    /// pulse driven directly by the co-located watcher process's motion stage.
    fn capture_triggered_image(&mut self) -> Result<ImageBuffer, String>;
}
