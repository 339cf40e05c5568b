use fsm::ControlMessage;
use serde::{Deserialize, Serialize};
use shot_analyzer::ShotResult;

use crate::wire_image::WireImage;

/// The bus's wire payload. `ArmCamera2` does double duty as the pre-image request (see
/// `fsm::Command::ArmCamera2`'s doc comment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IpcMessage {
    ArmCamera2,
    Camera2PreImage(WireImage),
    Camera2Image(WireImage),
    Result(ShotResult),
    Shutdown,
    Control(ControlMessage),
}

/// Carries every message plus the sender id it originated from. Wrapping the
/// whole message rather than attaching the id as a transport property keeps the envelope
/// transport-agnostic — the same type would work unchanged over bifrost-style UDP broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub sender_id: String,
    pub message: IpcMessage,
}
