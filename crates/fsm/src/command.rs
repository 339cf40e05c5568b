use ball_detector::ImageBuffer;
use shot_analyzer::ShotResult;

use crate::status::Status;

/// What a `step` call asks the caller to do next: publish something on the IPC bus. The FSM
/// never touches the bus directly: the bus turns messages into events, the FSM consumes events
/// and posts results; they share no mutable state directly.
#[derive(Debug, Clone)]
pub enum Command {
    /// Watcher → flight: arm camera 2 for external trigger. Doubles as the pre-image request
    /// for the flight FSM's `WaitingForCamera2PreImage` state, since the flight FSM answers
    /// every `ArmCamera2` with exactly one `Camera2PreImage`.
    ArmCamera2,
    /// Flight → watcher: the background reference taken right after arming.
    PublishCamera2PreImage(ImageBuffer),
    /// Flight → watcher: the triggered multi-exposure image.
    PublishCamera2Image(ImageBuffer),
    /// Watcher → sim sinks: a completed shot.
    PublishResult(ShotResult),
}

/// A step's effect: the commands to publish and the status to report, plus whether the caller
/// should begin cooperative teardown. Shared by both FSMs.
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    pub commands: Vec<Command>,
    pub status: Option<Status>,
    pub shutdown: bool,
}

impl StepOutcome {
    pub(crate) fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub(crate) fn command(command: Command, status: Status) -> Self {
        Self {
            commands: vec![command],
            status: Some(status),
            ..Default::default()
        }
    }
}
