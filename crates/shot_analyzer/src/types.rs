use serde::{Deserialize, Serialize};

/// Which way the golfer swings, driving candidate trajectory sort order during ball detection.
///
/// Fed from the GSPro handshake's `player.handed` field rather than a static config flag
/// alone, so a mid-session player swap re-sorts correctly without a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Right,
    Left,
}

impl Default for Handedness {
    fn default() -> Self {
        Self::Right
    }
}

/// Which club is configured for the next shot. `ControlMessage::ChangeClub` (fsm, C7) updates
/// this; putting changes the watcher's ball-stabilization and crop behavior upstream of here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClubType {
    Driver,
    Putter,
}

impl Default for ClubType {
    fn default() -> Self {
        Self::Driver
    }
}

/// The result handed to the simulator sinks. Side spin is signed: negative is a hook
/// (counter-clockwise viewed from above).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub shot_number: u32,
    pub speed_mph: f64,
    pub vla_deg: f64,
    pub hla_deg: f64,
    pub back_spin_rpm: f64,
    pub side_spin_rpm: f64,
    pub club_type: ClubType,
}

/// Per-ball diagnostics retained alongside the analyzed result but not forwarded to simulator
/// sinks: mean color, the focal length used for its distance estimate, and its rank among the
/// candidates the detector returned.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallDiagnostics {
    pub mean_color_bgr: (f64, f64, f64),
    pub focal_length_px: f64,
    pub quality_rank: usize,
}

/// The displacement between the first and last in-flight ball, in the ball-centric frame:
/// `z` toward the target, `x` right, `y` down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngularDelta {
    pub delta_x_m: f64,
    pub delta_y_m: f64,
    pub delta_z_m: f64,
}

impl crate::analyze::AnalyzedBall {
    /// `atan2(side_spin, back_spin)`, in degrees: the tilt of the spin axis off pure backspin.
    /// Not part of [`ShotResult`] but useful as an overlay diagnostic, matching the role
    /// `GsResults::GetSpinAxis()` plays upstream.
    pub fn spin_axis_deg(&self) -> f64 {
        self.rotation_rpm.ry.atan2(self.rotation_rpm.rx).to_degrees()
    }
}
