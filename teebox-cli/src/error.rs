use miette::Diagnostic;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] launch_config::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),

    #[error(transparent)]
    BallDetector(#[from] ball_detector::Error),

    #[error(transparent)]
    MotionDetect(#[from] motion_detect::Error),

    #[error(transparent)]
    Trigger(#[from] trigger::Error),

    #[error(transparent)]
    ShotAnalyzer(#[from] shot_analyzer::Error),

    #[error(transparent)]
    Fsm(#[from] fsm::Error),

    #[error(transparent)]
    Ipc(#[from] ipc::Error),

    #[error(transparent)]
    Diagnostics(#[from] diagnostics::Error),

    #[error("camera operation failed: {0}")]
    Camera(String),

    #[error("invalid override `{raw}`: {reason}")]
    InvalidOverride { raw: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
