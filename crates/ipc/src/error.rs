use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("zenoh transport error: {0}")]
    #[diagnostic(code(ipc::zenoh))]
    Zenoh(#[from] zenoh::Error),

    #[error("message codec error: {0}")]
    #[diagnostic(code(ipc::codec))]
    Bincode(#[from] bincode::Error),

    #[error(transparent)]
    #[diagnostic(code(ipc::ball_detector))]
    BallDetector(#[from] ball_detector::Error),

    #[error(transparent)]
    #[diagnostic(code(ipc::opencv))]
    OpenCv(#[from] opencv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
