use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("teed ball not found in the calibration image")]
    #[diagnostic(code(shot_analyzer::teed_ball_not_found))]
    TeedBallNotFound,

    #[error("expected at least 2 in-flight balls, found {found}")]
    #[diagnostic(code(shot_analyzer::insufficient_in_flight_balls))]
    InsufficientInFlightBalls { found: usize },

    #[error("time base between first and last in-flight exposure was zero")]
    #[diagnostic(code(shot_analyzer::zero_time_base))]
    ZeroTimeBase,

    #[error(transparent)]
    #[diagnostic(code(shot_analyzer::ball_detector))]
    BallDetector(#[from] ball_detector::Error),

    #[error(transparent)]
    #[diagnostic(code(shot_analyzer::geometry))]
    Geometry(#[from] geometry::Error),

    #[error(transparent)]
    #[diagnostic(code(shot_analyzer::spin_solver))]
    SpinSolver(#[from] spin_solver::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
