//! ROI-differencing motion detector that runs on the camera's delivered-frame hot path and
//! synchronously fires the strobe trigger the instant motion crosses threshold.
//!
//! Deliberately has no dependency on `trigger` or `ball_detector`: the trigger is invoked
//! through a plain closure so this crate stays usable from a camera-driver callback with no
//! allocation and no knowledge of GPIO.

pub mod config;
pub mod error;
pub mod frame;
pub mod ring;
pub mod stage;

pub use config::MotionDetectConfig;
pub use error::{Error, Result};
pub use frame::FrameView;
pub use ring::{FrameRecord, RecentFrameRing};
pub use stage::MotionDetectStage;
