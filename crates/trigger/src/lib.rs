//! Owns the camera-2 external shutter line and the strobe illumination driver: a one-pulse
//! shutter trigger followed by a configured multi-pulse strobe train.

pub mod controller;
pub mod error;
pub mod gpio;
pub mod plan;

pub use controller::{TriggerConfig, TriggerController};
pub use error::{Error, Result};
pub use gpio::GpioPin;
pub use plan::{PulseInterval, PulsePlan};
