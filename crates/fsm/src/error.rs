use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Raised by a [`crate::camera::Camera1`]/[`crate::camera::Camera2`] hook. The concrete
    /// camera driver is an external collaborator deliberately out of scope here, so its
    /// failures reach the FSM as an opaque message rather than a typed error.
    #[error("camera driver error: {0}")]
    #[diagnostic(code(fsm::camera))]
    Camera(String),

    #[error(transparent)]
    #[diagnostic(code(fsm::ball_detector))]
    BallDetector(#[from] ball_detector::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
