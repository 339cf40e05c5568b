//! Tunables for one [`crate::analyze::analyze`] invocation, assembled by the
//! caller (the watcher FSM) from `launch_config` at startup and frozen for the process
//! lifetime, same as every other per-mode parameter block in this workspace.

use ball_detector::HoughParams;
use geometry::CameraIntrinsics;
use serde::{Deserialize, Serialize};
use spin_solver::SolverConfig;
use trigger::PulsePlan;

use crate::types::Handedness;

/// Everything [`crate::analyze::analyze`] needs beyond the three images themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Camera 1 (watcher) intrinsics, used to place the teed/calibration ball.
    pub camera1_intrinsics: CameraIntrinsics,
    /// Camera 2 (flight) intrinsics, used to place every in-flight ball.
    pub camera2_intrinsics: CameraIntrinsics,
    /// Camera 2's position relative to camera 1, meters, in camera 1's optical frame.
    /// Zero for a single-camera rig.
    pub camera2_offset_m: [f64; 3],
    pub expected_ball_center_px: (f64, f64),
    pub expected_ball_radius_px: f64,
    pub placed_ball_params: HoughParams,
    pub strobed_ball_params: HoughParams,
    pub pulse_plan: PulsePlan,
    /// Static fallback sort direction for step 3; overridden per-shot when a sim sink's
    /// handshake reports the player's actual handedness (see `sim_sink::gspro`).
    pub handedness: Handedness,
    pub spin_solver: SolverConfig,
}
