//! Simulator-facing sinks: blocking TCP clients that speak each simulator's own
//! JSON dialect and report readiness back to the flight FSM. Grounded on `control`'s receive
//! loop and `seidr`'s connect-with-retry, translated from `async_std` onto plain OS threads.

pub mod connection;
pub mod e6;
pub mod error;
pub mod gspro;
pub mod sink;

pub use e6::E6Sink;
pub use error::{Error, Result};
pub use gspro::GsProSink;
pub use sink::{all_sinks_armed, run_dispatch_loop, SimSink};
