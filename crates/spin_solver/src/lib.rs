//! Recovers the 3-axis rotation between a reference (teed) ball image and a strobe-captured
//! in-flight ball image by sphere-warp cross-correlation.

pub mod ball_image;
pub mod correlate;
pub mod error;
pub mod solve;
pub mod sphere;
pub mod warp;

pub use ball_image::BallImage;
pub use error::{Error, Result};
pub use solve::{solve, SolverConfig, SpinEstimate};
pub use sphere::EulerDeg;
