//! The two per-process state machines that coordinate the watcher (camera 1) and flight
//! (camera 2) halves of a shot. Plain enum-tagged state, no ECS: each FSM is
//! `state + step(event) -> (new state, commands, status)`, driven by the caller's own
//! `crossbeam_channel::Receiver<Event>::recv_timeout` loop (`teebox-cli`). This crate owns no
//! thread, socket, or GPIO pin itself — those live behind the [`camera::Camera1`]/
//! [`camera::Camera2`] hooks and the [`command::Command`]s it emits.

pub mod camera;
pub mod command;
pub mod error;
pub mod event;
pub mod flight;
pub mod status;
pub mod watcher;

pub use camera::{Camera1, Camera2};
pub use command::{Command, StepOutcome};
pub use error::{Error, Result};
pub use event::{ControlMessage, Event};
pub use flight::{FlightFsm, FlightState};
pub use status::Status;
pub use watcher::{WatcherConfig, WatcherFsm, WatcherState};
