use ball_detector::ImageBuffer;
use serde::{Deserialize, Serialize};
use shot_analyzer::ClubType;

/// Accepted in any state of either FSM without disturbing it. The `ipc` bus turns an inbound
/// control message into this; `sim_sink` turns a GSPro player-info response or an E6 club
/// selection into this too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMessage {
    ChangeClub(ClubType),
}

/// The single input type both FSMs are driven by: each process has a single consumer event
/// queue. Each process only reacts to the subset of variants relevant to its own state machine;
/// the rest are dropped with a warning, such as a `Camera2Image` arriving before the watcher is
/// ready for it.
#[derive(Debug, Clone)]
pub enum Event {
    /// All configured simulator sinks report armed (watcher-only).
    SimulatorsArmed,
    /// A polled full-sensor or cropped frame, timestamped by the camera driver
    /// (watcher-only; flight never polls frames through the event queue).
    Frame(ImageBuffer),
    /// `ArmCamera2` arrived over the bus (flight-only).
    ArmCamera2,
    /// The flight process's "no ball present" background reference (watcher-only).
    Camera2PreImage(ImageBuffer),
    /// The flight process's triggered multi-exposure image (watcher-only).
    Camera2Image(ImageBuffer),
    /// The camera-1 motion-detection stage (C5) fired the shutter trigger on its own callback
    /// thread and enqueued this notification for the FSM thread (watcher-only; never crosses
    /// the IPC bus, since C5/C6 and the watcher FSM are co-located in one process).
    MotionTriggered,
    Control(ControlMessage),
    Shutdown,
}
