use miette::Diagnostic;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, Diagnostic)]
pub enum Error {
    #[error("sim connection failed: {0}")]
    Connect(std::io::Error),

    #[error("sim socket io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sim json encode/decode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sim connection closed by peer")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, Error>;
