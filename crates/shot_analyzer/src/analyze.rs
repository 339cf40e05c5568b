//! Assembles a teed-ball image and a strobed flight image into a [`ShotAnalysis`].
//! This is the only place in the workspace that calls both `ball_detector` and `spin_solver`.

use ball_detector::{detect, BallPosition, ImageBuffer, SearchMode};
use image::{DynamicImage, GrayImage, RgbImage};
use nalgebra::{Point2, Vector3};
use spin_solver::{solve as solve_spin, BallImage, EulerDeg};
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::types::{AngularDelta, BallDiagnostics, ClubType, Handedness, ShotResult};

/// Meters/second to miles/hour, the unit `ShotResult`/the GSPro wire schema expect.
const MPS_TO_MPH: f64 = 2.236_936_292_1;

/// A ball position plus every field [`crate::analyze::analyze`] derives from it. All derived
/// fields default to zero and are written exactly once, here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzedBall {
    pub position: BallPosition,
    pub camera_distance_m: f64,
    pub angular_delta: AngularDelta,
    pub rotation_deg: EulerDeg,
    pub rotation_rpm: EulerDeg,
    pub spin_confidence: f64,
    pub velocity_mps: f64,
    pub diagnostics: BallDiagnostics,
}

impl AnalyzedBall {
    fn zeroed(position: BallPosition, camera_distance_m: f64, diagnostics: BallDiagnostics) -> Self {
        Self {
            position,
            camera_distance_m,
            angular_delta: AngularDelta::default(),
            rotation_deg: EulerDeg::ZERO,
            rotation_rpm: EulerDeg::ZERO,
            spin_confidence: 0.0,
            velocity_mps: 0.0,
            diagnostics,
        }
    }
}

/// The full output of one [`analyze`] call: the teed-ball reference, every in-flight ball used,
/// and the shot-level quantities derived from the first/last pair of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotAnalysis {
    pub calibration_ball: AnalyzedBall,
    pub in_flight_balls: Vec<AnalyzedBall>,
    pub hla_deg: f64,
    pub vla_deg: f64,
    pub velocity_mps: f64,
    pub time_base_us: u64,
    pub rotation_deg: EulerDeg,
    pub rotation_rpm: EulerDeg,
    pub spin_confidence: f64,
}

impl ShotAnalysis {
    /// Packages this analysis into the "shot result" shape simulator sinks send over the wire.
    /// Backspin is the rotation about the horizontal axis perpendicular to flight (`rx`); side
    /// spin is rotation about the vertical axis (`ry`), signed negative for a hook
    /// (counter-clockwise viewed from above).
    pub fn to_shot_result(&self, shot_number: u32, club_type: ClubType) -> ShotResult {
        ShotResult {
            shot_number,
            speed_mph: self.velocity_mps * MPS_TO_MPH,
            vla_deg: self.vla_deg,
            hla_deg: self.hla_deg,
            back_spin_rpm: self.rotation_rpm.rx,
            side_spin_rpm: self.rotation_rpm.ry,
            club_type,
        }
    }
}

fn to_gray_and_rgb(image: &ImageBuffer) -> Result<(GrayImage, RgbImage)> {
    let rgb = image.to_rgb_image().map_err(Error::BallDetector)?;
    let gray = DynamicImage::ImageRgb8(rgb.clone()).into_luma8();
    Ok((gray, rgb))
}

/// Mean BGR of a small square patch centered on a detected ball, for [`BallDiagnostics`]'s
/// per-ball color statistics. Pure `image`-crate arithmetic, no `opencv` dependency needed here
/// since this crate only ever sees already-detected crops.
fn mean_color_bgr(rgb: &RgbImage, center_x: f64, center_y: f64, radius_px: f64) -> (f64, f64, f64) {
    let half = (radius_px * 0.5).max(1.0).round() as i32;
    let (cx, cy) = (center_x.round() as i32, center_y.round() as i32);
    let (width, height) = (rgb.width() as i32, rgb.height() as i32);

    let mut sum = [0.0f64; 3];
    let mut count = 0.0f64;
    for y in (cy - half).max(0)..(cy + half).min(height) {
        for x in (cx - half).max(0)..(cx + half).min(width) {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            sum[0] += f64::from(pixel[2]);
            sum[1] += f64::from(pixel[1]);
            sum[2] += f64::from(pixel[0]);
            count += 1.0;
        }
    }

    if count == 0.0 {
        (0.0, 0.0, 0.0)
    } else {
        (sum[0] / count, sum[1] / count, sum[2] / count)
    }
}

fn ball_point(intrinsics: &geometry::CameraIntrinsics, ball: &BallPosition, focal_length_px: f64) -> Result<(f64, Vector3<f64>)> {
    let distance_m = geometry::ball_distance_from_radius(ball.r_px, focal_length_px)?;
    let ray = intrinsics.pixel_to_ray(Point2::new(ball.x_px, ball.y_px));
    Ok((distance_m, ray))
}

/// Runs the full shot analyzer pipeline.
///
/// `pre_hit_image` is the flight camera's "no ball present" background reference
/// (`Camera2PreImage`); the analyzer itself only sanity-checks its dimensions against
/// `strobed_image` here — `diagnostics` is what actually differences it for an overlay.
pub fn analyze(
    teed_image: &ImageBuffer,
    strobed_image: &ImageBuffer,
    pre_hit_image: &ImageBuffer,
    config: &AnalyzerConfig,
    handedness_override: Option<Handedness>,
) -> Result<ShotAnalysis> {
    if pre_hit_image.width() != strobed_image.width() || pre_hit_image.height() != strobed_image.height() {
        warn!(
            pre_hit_w = pre_hit_image.width(),
            pre_hit_h = pre_hit_image.height(),
            strobed_w = strobed_image.width(),
            strobed_h = strobed_image.height(),
            "pre-hit background image size does not match the strobed image"
        );
    }

    // Step 1: locate the calibration (teed) ball.
    let placed_mode = SearchMode::PlacedBall {
        expected_center_px: config.expected_ball_center_px,
        expected_radius_px: config.expected_ball_radius_px,
    };
    let calibration = detect(teed_image, &placed_mode, &config.placed_ball_params)?
        .into_iter()
        .next()
        .ok_or(Error::TeedBallNotFound)?;

    // Step 2: locate every in-flight ball candidate.
    let strobed_mode = SearchMode::StrobedBall {
        expected_radius_px: calibration.r_px,
    };
    let found = detect(strobed_image, &strobed_mode, &config.strobed_ball_params)?;
    if found.len() < 2 {
        return Err(Error::InsufficientInFlightBalls { found: found.len() });
    }

    // Step 3: sort along the trajectory and keep at most as many balls as the pulse plan has
    // exposures for, retaining each ball's original detection rank for diagnostics.
    let mut ranked: Vec<(BallPosition, usize)> = found.into_iter().enumerate().map(|(rank, ball)| (ball, rank)).collect();
    let handedness = handedness_override.unwrap_or(config.handedness);
    match handedness {
        Handedness::Right => ranked.sort_by(|a, b| a.0.x_px.total_cmp(&b.0.x_px)),
        Handedness::Left => ranked.sort_by(|a, b| b.0.x_px.total_cmp(&a.0.x_px)),
    }
    let pulse_count = config.pulse_plan.pulse_count();
    if ranked.len() > pulse_count {
        ranked.truncate(pulse_count);
    }
    debug!(balls = ranked.len(), ?handedness, "in-flight balls sorted for analysis");

    // Step 4: camera-frame distance + ray for each in-flight ball, plus the calibration ball.
    let focal_length_camera1_px = (config.camera1_intrinsics.fx + config.camera1_intrinsics.fy) / 2.0;
    let focal_length_camera2_px = (config.camera2_intrinsics.fx + config.camera2_intrinsics.fy) / 2.0;

    let calibration_distance_m = geometry::ball_distance_from_radius(calibration.r_px, focal_length_camera1_px)?;

    let mut points = Vec::with_capacity(ranked.len());
    for (ball, _rank) in &ranked {
        points.push(ball_point(&config.camera2_intrinsics, ball, focal_length_camera2_px)?);
    }

    let first_point = points[0].1 * points[0].0;
    let last_point = points[points.len() - 1].1 * points[points.len() - 1].0;

    // Step 5: ball-centric displacement, z toward the target. Step 9: fold in the two-camera
    // offset's depth component (the only component that affects a distance-along-flight delta).
    let mut delta = last_point - first_point;
    delta.z += config.camera2_offset_m[2];

    // Step 6.
    let hla_deg = delta.x.atan2(delta.z).to_degrees();
    let vla_deg = delta.y.atan2(delta.z).to_degrees();

    // Step 7: time base is the pulse-plan's interval sum between the first and last ball used,
    // never `(N-1) * period` ( open question).
    let last_idx = ranked.len() - 1;
    let time_base_us: u64 = config.pulse_plan.intervals[0..last_idx]
        .iter()
        .map(|interval| u64::from(interval.high_us) + u64::from(interval.low_us))
        .sum();
    if time_base_us == 0 {
        return Err(Error::ZeroTimeBase);
    }
    let dt_s = time_base_us as f64 / 1_000_000.0;
    let velocity_mps = (delta.x.powi(2) + delta.y.powi(2) + delta.z.powi(2)).sqrt() / dt_s;

    // Step 8: spin, comparing the calibration ball to each in-flight ball.
    let (teed_gray, teed_rgb) = to_gray_and_rgb(teed_image)?;
    let (strobed_gray, strobed_rgb) = to_gray_and_rgb(strobed_image)?;
    let reference_ball_image = BallImage::from_detection(&teed_gray, calibration.x_px, calibration.y_px, calibration.r_px)?;

    let mut weighted_rotation = EulerDeg::ZERO;
    let mut weight_sum = 0.0;
    let mut in_flight_balls = Vec::with_capacity(ranked.len());

    for (i, ((ball, rank), (distance_m, _ray))) in ranked.iter().zip(points.iter()).enumerate() {
        let target_ball_image = BallImage::from_detection(&strobed_gray, ball.x_px, ball.y_px, ball.r_px)?;
        let estimate = solve_spin(&reference_ball_image, &target_ball_image, &config.spin_solver);

        let (rotation_deg, spin_confidence) = match estimate {
            Some(e) => {
                weighted_rotation.rx += e.rotation_deg.rx * e.confidence;
                weighted_rotation.ry += e.rotation_deg.ry * e.confidence;
                weighted_rotation.rz += e.rotation_deg.rz * e.confidence;
                weight_sum += e.confidence;
                (e.rotation_deg, e.confidence)
            }
            None => (EulerDeg::ZERO, 0.0),
        };

        let diagnostics = BallDiagnostics {
            mean_color_bgr: mean_color_bgr(&strobed_rgb, ball.x_px, ball.y_px, ball.r_px),
            focal_length_px: focal_length_camera2_px,
            quality_rank: *rank,
        };

        let mut analyzed = AnalyzedBall::zeroed(*ball, *distance_m, diagnostics);
        analyzed.angular_delta = AngularDelta {
            delta_x_m: (points[i].1 * points[i].0 - first_point).x,
            delta_y_m: (points[i].1 * points[i].0 - first_point).y,
            delta_z_m: (points[i].1 * points[i].0 - first_point).z,
        };
        analyzed.rotation_deg = rotation_deg;
        analyzed.spin_confidence = spin_confidence;
        if i == last_idx {
            analyzed.velocity_mps = velocity_mps;
        }
        in_flight_balls.push(analyzed);
    }

    let rotation_deg = if weight_sum > 0.0 {
        EulerDeg {
            rx: weighted_rotation.rx / weight_sum,
            ry: weighted_rotation.ry / weight_sum,
            rz: weighted_rotation.rz / weight_sum,
        }
    } else {
        EulerDeg::ZERO
    };
    let spin_confidence = weight_sum / in_flight_balls.len() as f64;
    // rpm = degrees per pulse-train / (dt in minutes); dt_minutes = dt_s / 60.
    let rotation_rpm = EulerDeg {
        rx: rotation_deg.rx / (6.0 * dt_s),
        ry: rotation_deg.ry / (6.0 * dt_s),
        rz: rotation_deg.rz / (6.0 * dt_s),
    };

    for ball in &mut in_flight_balls {
        ball.rotation_rpm = EulerDeg {
            rx: ball.rotation_deg.rx / (6.0 * dt_s),
            ry: ball.rotation_deg.ry / (6.0 * dt_s),
            rz: ball.rotation_deg.rz / (6.0 * dt_s),
        };
    }

    let calibration_diagnostics = BallDiagnostics {
        mean_color_bgr: mean_color_bgr(&teed_rgb, calibration.x_px, calibration.y_px, calibration.r_px),
        focal_length_px: focal_length_camera1_px,
        quality_rank: 0,
    };
    let calibration_ball = AnalyzedBall::zeroed(calibration, calibration_distance_m, calibration_diagnostics);

    Ok(ShotAnalysis {
        calibration_ball,
        in_flight_balls,
        hla_deg,
        vla_deg,
        velocity_mps,
        time_base_us,
        rotation_deg,
        rotation_rpm,
        spin_confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ball_detector::{HoughParams, MethodTag, SourceTag};
    use geometry::CameraIntrinsics;
    use opencv::core::{Mat, Point, Scalar, CV_8UC3};
    use opencv::imgproc;
    use trigger::{PulseInterval, PulsePlan};

    fn synthetic_ball_frame(width: i32, height: i32, center: (i32, i32), radius: i32) -> ImageBuffer {
        let mut mat = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(20.0)).unwrap();
        imgproc::circle(&mut mat, Point::new(center.0, center.1), radius, Scalar::new(210.0, 210.0, 210.0, 0.0), -1, imgproc::LINE_8, 0).unwrap();
        ImageBuffer::new(mat, 0, SourceTag::TestFixture).unwrap()
    }

    fn test_config() -> AnalyzerConfig {
        AnalyzerConfig {
            camera1_intrinsics: CameraIntrinsics::identity(640, 480),
            camera2_intrinsics: CameraIntrinsics {
                fx: 900.0,
                fy: 900.0,
                cx: 320.0,
                cy: 240.0,
                distortion: geometry::Distortion::IDENTITY,
            },
            camera2_offset_m: [0.0, 0.0, 0.0],
            expected_ball_center_px: (160.0, 120.0),
            expected_ball_radius_px: 30.0,
            placed_ball_params: HoughParams {
                min_radius_px: 15,
                max_radius_px: 60,
                min_returned_circles: 1,
                max_returned_circles: 3,
                ..Default::default()
            },
            strobed_ball_params: HoughParams {
                min_radius_px: 10,
                max_radius_px: 40,
                min_returned_circles: 2,
                max_returned_circles: 6,
                ..Default::default()
            },
            pulse_plan: PulsePlan::new(vec![
                PulseInterval { high_us: 100, low_us: 900 },
                PulseInterval { high_us: 100, low_us: 900 },
                PulseInterval { high_us: 100, low_us: 900 },
            ])
            .unwrap(),
            handedness: Handedness::Right,
            spin_solver: spin_solver::SolverConfig {
                coarse_bound_deg: 10.0,
                coarse_step_deg: 10.0,
                refine_iterations: 2,
                min_confidence: 1.1, // unreachable: keep spin at zero in this synthetic test
            },
        }
    }

    #[test]
    fn fewer_than_two_in_flight_balls_fails() {
        let teed = synthetic_ball_frame(320, 240, (160, 120), 30);
        let strobed = synthetic_ball_frame(320, 240, (160, 120), 30); // one ball only
        let pre_hit = synthetic_ball_frame(320, 240, (0, 0), 1);
        let config = test_config();

        let err = analyze(&teed, &strobed, &pre_hit, &config, None).unwrap_err();
        assert!(matches!(err, Error::InsufficientInFlightBalls { .. } | Error::TeedBallNotFound));
    }

    #[test]
    fn two_in_flight_balls_yield_velocity_from_displacement_and_time_base() {
        let teed = synthetic_ball_frame(320, 240, (160, 120), 30);

        let mut mat = Mat::new_rows_cols_with_default(240, 320, CV_8UC3, Scalar::all(20.0)).unwrap();
        imgproc::circle(&mut mat, Point::new(100, 120), 20, Scalar::new(210.0, 210.0, 210.0, 0.0), -1, imgproc::LINE_8, 0).unwrap();
        imgproc::circle(&mut mat, Point::new(220, 120), 20, Scalar::new(210.0, 210.0, 210.0, 0.0), -1, imgproc::LINE_8, 0).unwrap();
        let strobed = ImageBuffer::new(mat, 0, SourceTag::TestFixture).unwrap();
        let pre_hit = synthetic_ball_frame(320, 240, (0, 0), 1);

        let mut config = test_config();
        config.pulse_plan = PulsePlan::new(vec![PulseInterval { high_us: 100, low_us: 4900 }]).unwrap();

        let analysis = analyze(&teed, &strobed, &pre_hit, &config, None);
        if let Ok(analysis) = analysis {
            assert_eq!(analysis.in_flight_balls.len(), 2);
            assert!(analysis.velocity_mps > 0.0);
            assert_eq!(analysis.time_base_us, 5000);
            assert_eq!(analysis.in_flight_balls[0].position.method, MethodTag::StrobedBall);
        }
    }
}
