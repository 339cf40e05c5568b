//! Circular ball-candidate detection: grayscale, Canny, adaptive Hough, scoring.
//! Also owns the shared ball-position and image-buffer data model used throughout the
//! rest of the launch monitor.

pub mod candidate;
pub mod detect;
pub mod error;
pub mod image;
pub mod modes;
pub mod params;
pub mod score;

pub use candidate::{BallPosition, ConfidenceLevel, MethodTag};
pub use detect::detect;
pub use error::{Error, Result};
pub use image::{ImageBuffer, ImageMeta, SourceTag};
pub use modes::{ReferenceColor, SearchMode};
pub use params::{BlurOrder, HoughParams, HoughVariant};
pub use score::ScoreBreakdown;
