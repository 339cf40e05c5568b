//! Composes the final shot result and drives the diagnostic artifacts a completed shot leaves
//! behind.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use ball_detector::{BallPosition, ImageBuffer};
use shot_analyzer::{ClubType, ShotAnalysis, ShotResult};

use crate::club_strike::save_club_strike_sequence;
use crate::error::Result;
use crate::overlay::save_overlay;

/// How much diagnostic output to keep on disk, set from the CLI's artifact-save-level flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtifactLevel {
    /// No diagnostic images or frame sequences are written.
    None,
    /// The two overlay PNGs only.
    Overlays,
    /// Overlays plus the optional club-strike frame sequence.
    Full,
}

pub struct Aggregator {
    log_dir: PathBuf,
    artifact_level: ArtifactLevel,
    shot_counter: AtomicU32,
}

impl Aggregator {
    pub fn new(log_dir: impl Into<PathBuf>, artifact_level: ArtifactLevel) -> Self {
        Self {
            log_dir: log_dir.into(),
            artifact_level,
            shot_counter: AtomicU32::new(0),
        }
    }

    /// Assigns the next monotonically increasing shot number and composes the final
    /// [`ShotResult`] from an analyzed shot.
    pub fn compose_result(&self, analysis: &ShotAnalysis, club_type: ClubType) -> ShotResult {
        let shot_number = self.shot_counter.fetch_add(1, Ordering::SeqCst) + 1;
        analysis.to_shot_result(shot_number, club_type)
    }

    /// Writes `log_ball_final_found_ball_img.<shot_number>.png` if artifacts are enabled.
    pub fn save_teed_overlay(&self, shot_number: u32, frame: &ImageBuffer, candidates: &[BallPosition]) -> Result<()> {
        if self.artifact_level < ArtifactLevel::Overlays {
            return Ok(());
        }
        let path = self.artifact_path(&format!("log_ball_final_found_ball_img.{shot_number}.png"));
        save_overlay(frame, candidates, path)
    }

    /// Writes `log_cam2_last_strobed_img.<shot_number>.png` if artifacts are enabled.
    pub fn save_strobed_overlay(&self, shot_number: u32, frame: &ImageBuffer, candidates: &[BallPosition]) -> Result<()> {
        if self.artifact_level < ArtifactLevel::Overlays {
            return Ok(());
        }
        let path = self.artifact_path(&format!("log_cam2_last_strobed_img.{shot_number}.png"));
        save_overlay(frame, candidates, path)
    }

    /// Writes `log_cam2_last_pre_image.png`, overwritten every shot.
    pub fn save_pre_image(&self, frame: &ImageBuffer) -> Result<()> {
        if self.artifact_level < ArtifactLevel::Overlays {
            return Ok(());
        }
        let path = self.artifact_path("log_cam2_last_pre_image.png");
        save_overlay(frame, &[], path)
    }

    /// Writes the optional club-strike frame sequence; a no-op below [`ArtifactLevel::Full`].
    pub fn save_club_strike_frames(&self, timestamp_us: u64, frames: &[ImageBuffer]) -> Result<Option<PathBuf>> {
        if self.artifact_level < ArtifactLevel::Full {
            return Ok(None);
        }
        save_club_strike_sequence(&self.log_dir, timestamp_us, frames).map(Some)
    }

    fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.log_dir.join(file_name)
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ball_detector::{BallPosition, MethodTag};
    use shot_analyzer::{AnalyzedBall, AngularDelta, BallDiagnostics};
    use spin_solver::EulerDeg;

    fn sample_ball() -> AnalyzedBall {
        AnalyzedBall {
            position: BallPosition::new(100.0, 100.0, 10.0, 0.9, 0, MethodTag::StrobedBall).unwrap(),
            camera_distance_m: 2.0,
            angular_delta: AngularDelta::default(),
            rotation_deg: EulerDeg::ZERO,
            rotation_rpm: EulerDeg { rx: 2000.0, ry: -100.0, rz: 0.0 },
            spin_confidence: 0.8,
            velocity_mps: 20.0,
            diagnostics: BallDiagnostics::default(),
        }
    }

    fn sample_analysis() -> ShotAnalysis {
        ShotAnalysis {
            calibration_ball: sample_ball(),
            in_flight_balls: vec![sample_ball(), sample_ball()],
            hla_deg: 1.0,
            vla_deg: 12.0,
            velocity_mps: 20.0,
            time_base_us: 5000,
            rotation_deg: EulerDeg::ZERO,
            rotation_rpm: EulerDeg { rx: 2000.0, ry: -100.0, rz: 0.0 },
            spin_confidence: 0.8,
        }
    }

    #[test]
    fn compose_result_assigns_monotonically_increasing_shot_numbers() {
        let aggregator = Aggregator::new(std::env::temp_dir(), ArtifactLevel::None);
        let analysis = sample_analysis();
        let first = aggregator.compose_result(&analysis, ClubType::Driver);
        let second = aggregator.compose_result(&analysis, ClubType::Driver);
        assert_eq!(first.shot_number, 1);
        assert_eq!(second.shot_number, 2);
    }

    #[test]
    fn overlays_are_skipped_below_the_overlays_artifact_level() {
        let aggregator = Aggregator::new(std::env::temp_dir().join("diagnostics-agg-test-none"), ArtifactLevel::None);
        let mat = opencv::core::Mat::new_rows_cols_with_default(10, 10, opencv::core::CV_8UC3, opencv::core::Scalar::all(0.0)).unwrap();
        let frame = ImageBuffer::new(mat, 0, ball_detector::SourceTag::TestFixture).unwrap();
        aggregator.save_teed_overlay(1, &frame, &[]).unwrap();
        assert!(!aggregator.log_dir().join("log_ball_final_found_ball_img.1.png").exists());
    }
}
