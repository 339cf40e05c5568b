use miette::Diagnostic;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    BallDetector(#[from] ball_detector::Error),

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Jpeg(#[from] turbojpeg::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
