use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("image buffer is empty")]
    #[diagnostic(code(ball_detector::empty_image))]
    EmptyImage,

    #[error("image dimensions must be positive, got {width}x{height}")]
    #[diagnostic(code(ball_detector::non_positive_dimensions))]
    NonPositiveDimensions { width: u32, height: u32 },

    #[error("confidence must be within [0, 1], got {confidence}")]
    #[diagnostic(code(ball_detector::confidence_out_of_range))]
    ConfidenceOutOfRange { confidence: f64 },

    #[error("radius must be non-negative, got {radius_px}")]
    #[diagnostic(code(ball_detector::negative_radius))]
    NegativeRadius { radius_px: f64 },

    #[error("ball coordinates must be finite, got ({x}, {y})")]
    #[diagnostic(code(ball_detector::non_finite_coordinates))]
    NonFiniteCoordinates { x: f64, y: f64 },

    #[error(transparent)]
    #[diagnostic(code(ball_detector::opencv))]
    OpenCv(#[from] opencv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
