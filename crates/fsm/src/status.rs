/// Progress reported by a `step` call so the result aggregator / diagnostics crate
/// can forward it onto the IPC bus for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    WaitingForSimulatorArmed,
    WaitingForBallToAppear,
    PausingForBallStabilization,
    WaitingForCamera2PreImage,
    WaitingForBallHit,
    WaitingForCamera2Image,
    Hit,
    WaitingForCameraArmMessage,
    WaitingForCameraTrigger,
    Error(String),
}
