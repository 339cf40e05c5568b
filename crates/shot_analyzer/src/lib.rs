//! Assembles a teed-ball image and a strobed flight image into a velocity vector, launch
//! angles and a 3-axis spin rate. Depends on `ball_detector` for candidate
//! detection, `geometry` for the pixel-to-distance forward model, `spin_solver` for the
//! rotation recovery, and `trigger` only for its `PulsePlan` time-base type.

pub mod analyze;
pub mod config;
pub mod error;
pub mod types;

pub use analyze::{analyze, AnalyzedBall, ShotAnalysis};
pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use types::{AngularDelta, BallDiagnostics, ClubType, Handedness, ShotResult};
