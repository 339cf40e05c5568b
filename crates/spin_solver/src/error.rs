use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("ball image is empty")]
    #[diagnostic(code(spin_solver::empty_image))]
    EmptyImage,

    #[error("ball radius must be positive, got {radius_px}")]
    #[diagnostic(code(spin_solver::non_positive_radius))]
    NonPositiveRadius { radius_px: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
