use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("trigger controller was not initialized before use")]
    #[diagnostic(code(trigger::not_initialized))]
    NotInitialized,
    #[error("trigger controller is already initialized")]
    #[diagnostic(code(trigger::already_initialized))]
    AlreadyInitialized,
    #[error("GPIO error: {0}")]
    #[diagnostic(code(trigger::gpio))]
    Gpio(#[from] rppal::gpio::Error),
    #[error("pulse plan is empty")]
    #[diagnostic(code(trigger::empty_pulse_plan))]
    EmptyPulsePlan,
}

pub type Result<T> = std::result::Result<T, Error>;
