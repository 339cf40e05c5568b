//! The watcher (camera-1) state machine: waits for a ball to settle, arms on motion, and hands
//! off to the flight (camera-2) side once a strike is detected.

use ball_detector::{detect, BallPosition, HoughParams, ImageBuffer, SearchMode};
use shot_analyzer::{analyze, AnalyzerConfig, ClubType};
use tracing::{info, warn};

use crate::camera::Camera1;
use crate::command::{Command, StepOutcome};
use crate::error::{Error, Result};
use crate::event::{ControlMessage, Event};
use crate::status::Status;

#[derive(Debug, Clone)]
pub enum WatcherState {
    InitializingCamera1System,
    WaitingForSimulatorArmed,
    WaitingForBall,
    WaitingForBallStabilization { reference: BallPosition, since_us: u64 },
    WaitingForCamera2PreImage { teed_image: ImageBuffer, ball: BallPosition },
    WaitingForBallHit { teed_image: ImageBuffer, ball: BallPosition, pre_hit_image: ImageBuffer },
    BallHitNowWaitingForCam2Image { teed_image: ImageBuffer, pre_hit_image: ImageBuffer },
}

/// Parameters frozen for the process lifetime, assembled by `teebox-cli` from `launch_config`
/// at startup.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub search_params: HoughParams,
    pub expected_ball_center_px: (f64, f64),
    pub expected_ball_radius_px: f64,
    pub stabilization_duration_us: u64,
    pub stabilization_tolerance_px: f64,
    pub analyzer: AnalyzerConfig,
}

pub struct WatcherFsm {
    state: WatcherState,
    config: WatcherConfig,
    shot_number: u32,
    club_type: ClubType,
}

impl WatcherFsm {
    pub fn new(config: WatcherConfig) -> Self {
        Self {
            state: WatcherState::InitializingCamera1System,
            config,
            shot_number: 0,
            club_type: ClubType::default(),
        }
    }

    pub fn state(&self) -> &WatcherState {
        &self.state
    }

    pub fn shot_number(&self) -> u32 {
        self.shot_number
    }

    fn placed_ball(&self, image: &ImageBuffer) -> Result<Option<BallPosition>> {
        let mode = SearchMode::PlacedBall {
            expected_center_px: self.config.expected_ball_center_px,
            expected_radius_px: self.config.expected_ball_radius_px,
        };
        Ok(detect(image, &mode, &self.config.search_params)?.into_iter().next())
    }

    fn within_tolerance(&self, a: &BallPosition, b: &BallPosition) -> bool {
        let dx = a.x_px - b.x_px;
        let dy = a.y_px - b.y_px;
        (dx * dx + dy * dy).sqrt() <= self.config.stabilization_tolerance_px
    }

    /// Advance the FSM by exactly one event. `now_us` is supplied by the caller rather than
    /// read from a clock here so the pure transition logic stays deterministic and testable.
    pub fn step(&mut self, event: Event, camera: &mut dyn Camera1, now_us: u64) -> Result<StepOutcome> {
        if let Event::Control(ControlMessage::ChangeClub(club)) = &event {
            self.club_type = *club;
            return Ok(StepOutcome::default());
        }
        if matches!(event, Event::Shutdown) {
            camera.reset_to_full_frame().map_err(Error::Camera)?;
            return Ok(StepOutcome {
                shutdown: true,
                ..Default::default()
            });
        }

        match (&self.state, event) {
            (WatcherState::InitializingCamera1System, _) => {
                camera.reset_to_full_frame().map_err(Error::Camera)?;
                self.state = WatcherState::WaitingForSimulatorArmed;
                info!("watcher: camera 1 initialized");
                Ok(StepOutcome::status(Status::WaitingForSimulatorArmed))
            }

            (WatcherState::WaitingForSimulatorArmed, Event::SimulatorsArmed) => {
                self.state = WatcherState::WaitingForBall;
                Ok(StepOutcome::status(Status::WaitingForBallToAppear))
            }

            (WatcherState::WaitingForBall, Event::Frame(image)) => match self.placed_ball(&image)? {
                Some(ball) => {
                    self.state = WatcherState::WaitingForBallStabilization { reference: ball, since_us: now_us };
                    Ok(StepOutcome::status(Status::PausingForBallStabilization))
                }
                None => Ok(StepOutcome::status(Status::WaitingForBallToAppear)),
            },

            (WatcherState::WaitingForBallStabilization { reference, since_us }, Event::Frame(image)) => {
                let (reference, since_us) = (*reference, *since_us);
                match self.placed_ball(&image)? {
                    Some(ball) if self.within_tolerance(&reference, &ball) => {
                        if now_us.saturating_sub(since_us) >= self.config.stabilization_duration_us {
                            self.state = WatcherState::WaitingForCamera2PreImage {
                                teed_image: image,
                                ball,
                            };
                            Ok(StepOutcome::command(Command::ArmCamera2, Status::WaitingForCamera2PreImage))
                        } else {
                            Ok(StepOutcome::status(Status::PausingForBallStabilization))
                        }
                    }
                    Some(ball) => {
                        self.state = WatcherState::WaitingForBallStabilization { reference: ball, since_us: now_us };
                        Ok(StepOutcome::status(Status::PausingForBallStabilization))
                    }
                    None => {
                        self.state = WatcherState::WaitingForBall;
                        Ok(StepOutcome::status(Status::WaitingForBallToAppear))
                    }
                }
            }

            (WatcherState::WaitingForCamera2PreImage { teed_image, ball }, Event::Camera2PreImage(pre_hit_image)) => {
                let (teed_image, ball) = (teed_image.clone(), *ball);
                camera.configure_crop_and_arm_motion(&ball).map_err(Error::Camera)?;
                self.state = WatcherState::WaitingForBallHit {
                    teed_image,
                    ball,
                    pre_hit_image,
                };
                Ok(StepOutcome::status(Status::WaitingForBallHit))
            }

            (WatcherState::WaitingForBallHit { teed_image, pre_hit_image, .. }, Event::MotionTriggered) => {
                self.state = WatcherState::BallHitNowWaitingForCam2Image {
                    teed_image: teed_image.clone(),
                    pre_hit_image: pre_hit_image.clone(),
                };
                Ok(StepOutcome::status(Status::Hit))
            }

            (WatcherState::BallHitNowWaitingForCam2Image { teed_image, pre_hit_image }, Event::Camera2Image(strobed_image)) => {
                let (teed_image, pre_hit_image) = (teed_image.clone(), pre_hit_image.clone());
                camera.reset_to_full_frame().map_err(Error::Camera)?;
                self.state = WatcherState::WaitingForBall;

                match analyze(&teed_image, &strobed_image, &pre_hit_image, &self.config.analyzer, None) {
                    Ok(analysis) => {
                        self.shot_number += 1;
                        let result = analysis.to_shot_result(self.shot_number, self.club_type);
                        Ok(StepOutcome::command(Command::PublishResult(result), Status::WaitingForBallToAppear))
                    }
                    Err(error) => {
                        // Fewer than 2 in-flight balls or no teed ball: fail the shot, not the
                        // process.
                        warn!(%error, "shot analysis failed, no result published");
                        Ok(StepOutcome::status(Status::Error(error.to_string())))
                    }
                }
            }

            (state, event) => {
                warn!(?state, ?event, "watcher: event dropped in this state");
                Ok(StepOutcome::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ball_detector::HoughParams;
    use geometry::{CameraIntrinsics, Distortion};
    use opencv::core::{Mat, Point, Scalar, CV_8UC3};
    use opencv::imgproc;
    use shot_analyzer::Handedness;
    use spin_solver::SolverConfig;
    use trigger::{PulseInterval, PulsePlan};

    struct FakeCamera1 {
        full_frame_calls: u32,
        crop_calls: u32,
    }

    impl Camera1 for FakeCamera1 {
        fn capture_full_frame(&mut self) -> std::result::Result<ImageBuffer, String> {
            self.full_frame_calls += 1;
            Err("not used in these tests".into())
        }

        fn configure_crop_and_arm_motion(&mut self, _ball: &BallPosition) -> std::result::Result<(), String> {
            self.crop_calls += 1;
            Ok(())
        }

        fn reset_to_full_frame(&mut self) -> std::result::Result<(), String> {
            Ok(())
        }
    }

    fn ball_image(center: (i32, i32), radius: i32) -> ImageBuffer {
        let mut mat = Mat::new_rows_cols_with_default(240, 320, CV_8UC3, Scalar::all(30.0)).unwrap();
        imgproc::circle(&mut mat, Point::new(center.0, center.1), radius, Scalar::new(200.0, 200.0, 200.0, 0.0), -1, imgproc::LINE_8, 0).unwrap();
        ImageBuffer::new(mat, 0, ball_detector::SourceTag::TestFixture).unwrap()
    }

    fn config() -> WatcherConfig {
        let intrinsics = CameraIntrinsics {
            fx: 800.0,
            fy: 800.0,
            cx: 160.0,
            cy: 120.0,
            distortion: Distortion::IDENTITY,
        };
        WatcherConfig {
            search_params: HoughParams::default(),
            expected_ball_center_px: (160.0, 120.0),
            expected_ball_radius_px: 20.0,
            stabilization_duration_us: 500_000,
            stabilization_tolerance_px: 3.0,
            analyzer: AnalyzerConfig {
                camera1_intrinsics: intrinsics,
                camera2_intrinsics: intrinsics,
                camera2_offset_m: [0.0, 0.0, 0.0],
                expected_ball_center_px: (160.0, 120.0),
                expected_ball_radius_px: 20.0,
                placed_ball_params: HoughParams::default(),
                strobed_ball_params: HoughParams::default(),
                pulse_plan: PulsePlan::new(vec![PulseInterval { high_us: 100, low_us: 4900 }]).unwrap(),
                handedness: Handedness::Right,
                spin_solver: SolverConfig::default(),
            },
        }
    }

    #[test]
    fn simulators_armed_advances_to_waiting_for_ball() {
        let mut fsm = WatcherFsm::new(config());
        let mut camera = FakeCamera1 {
            full_frame_calls: 0,
            crop_calls: 0,
        };
        fsm.step(Event::Frame(ball_image((160, 120), 20)), &mut camera, 0).unwrap();
        assert!(matches!(fsm.state(), WatcherState::WaitingForSimulatorArmed));

        let outcome = fsm.step(Event::SimulatorsArmed, &mut camera, 0).unwrap();
        assert!(matches!(fsm.state(), WatcherState::WaitingForBall));
        assert_eq!(outcome.status, Some(Status::WaitingForBallToAppear));
    }

    #[test]
    fn change_club_never_disturbs_current_state() {
        let mut fsm = WatcherFsm::new(config());
        let mut camera = FakeCamera1 {
            full_frame_calls: 0,
            crop_calls: 0,
        };
        fsm.step(Event::Frame(ball_image((160, 120), 20)), &mut camera, 0).unwrap();
        let before = format!("{:?}", fsm.state());

        fsm.step(Event::Control(ControlMessage::ChangeClub(ClubType::Putter)), &mut camera, 0).unwrap();
        assert_eq!(format!("{:?}", fsm.state()), before);
    }

    #[test]
    fn ball_must_hold_position_for_the_full_stabilization_duration() {
        let mut fsm = WatcherFsm::new(config());
        let mut camera = FakeCamera1 {
            full_frame_calls: 0,
            crop_calls: 0,
        };
        // Warm up past initialization/arming.
        fsm.step(Event::Frame(ball_image((160, 120), 20)), &mut camera, 0).unwrap();
        fsm.step(Event::SimulatorsArmed, &mut camera, 0).unwrap();

        fsm.step(Event::Frame(ball_image((160, 120), 20)), &mut camera, 0).unwrap();
        assert!(matches!(fsm.state(), WatcherState::WaitingForBallStabilization { .. }));

        // Not enough time elapsed yet: stays in stabilization.
        let outcome = fsm.step(Event::Frame(ball_image((160, 120), 20)), &mut camera, 100_000).unwrap();
        assert!(matches!(fsm.state(), WatcherState::WaitingForBallStabilization { .. }));
        assert_eq!(outcome.status, Some(Status::PausingForBallStabilization));

        // Enough time elapsed: advances and asks the flight process to arm.
        let outcome = fsm
            .step(Event::Frame(ball_image((160, 120), 20)), &mut camera, 600_000)
            .unwrap();
        assert!(matches!(fsm.state(), WatcherState::WaitingForCamera2PreImage { .. }));
        assert!(matches!(outcome.commands.as_slice(), [Command::ArmCamera2]));
    }

    #[test]
    fn shutdown_resets_the_camera_and_reports_shutdown_from_any_state() {
        let mut fsm = WatcherFsm::new(config());
        let mut camera = FakeCamera1 {
            full_frame_calls: 0,
            crop_calls: 0,
        };
        let outcome = fsm.step(Event::Shutdown, &mut camera, 0).unwrap();
        assert!(outcome.shutdown);
    }
}
