use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("ball radius must be positive to estimate distance, got {radius_px}")]
    #[diagnostic(code(geometry::non_positive_radius))]
    NonPositiveRadius { radius_px: f64 },

    #[error("ray is parallel to the image plane (z component {z} too small to project)")]
    #[diagnostic(code(geometry::degenerate_ray))]
    DegenerateRay { z: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
