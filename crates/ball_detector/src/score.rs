//! Candidate scoring.

use opencv::core::{Mat, Point2f, Vec3f};
use opencv::prelude::*;

use crate::modes::SearchMode;

/// Per-candidate score components, each normalized to `[0, 1]` with 1 being the best possible
/// value, combined into a single confidence by unweighted average. Kept as named fields rather
/// than folded immediately so tests and diagnostics can inspect which term dominated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub center_proximity: f64,
    pub radius_closeness: f64,
    pub edge_clearance: f64,
    pub color_similarity: f64,
}

impl ScoreBreakdown {
    pub fn combined(&self) -> f64 {
        (self.center_proximity + self.radius_closeness + self.edge_clearance + self.color_similarity) / 4.0
    }
}

/// Score one Hough circle candidate `(x, y, r)` against the search mode and frame geometry.
///
/// `frame_size` is `(width, height)` in pixels; `color_at` is the mean BGR of a small patch at
/// the candidate center, sampled by the caller (only meaningful for
/// [`SearchMode::BallAgainstReference`]).
pub fn score_candidate(circle: Vec3f, frame_size: (i32, i32), mode: &SearchMode, mean_color: Option<opencv::core::Vec3d>) -> ScoreBreakdown {
    let (x, y, r) = (f64::from(circle[0]), f64::from(circle[1]), f64::from(circle[2]));
    let (width, height) = (f64::from(frame_size.0), f64::from(frame_size.1));

    let center_proximity = match mode.expected_center_px() {
        Some((cx, cy)) => {
            let distance = Point2f::new(x as f32, y as f32).distance_to(Point2f::new(cx as f32, cy as f32)) as f64;
            let max_distance = (width.powi(2) + height.powi(2)).sqrt();
            1.0 - (distance / max_distance).min(1.0)
        }
        // Modes without a fixed expected center (StrobedBall, BallAgainstReference) don't
        // penalize on position.
        None => 1.0,
    };

    let expected_radius = mode.expected_radius_px();
    let radius_closeness = if expected_radius > 0.0 {
        let relative_error = ((r - expected_radius) / expected_radius).abs();
        1.0 - relative_error.min(1.0)
    } else {
        1.0
    };

    let margin = f64::from(frame_size.0.min(frame_size.1));
    let edge_distance = [x, y, width - x, height - y].into_iter().fold(f64::MAX, f64::min);
    let edge_clearance = (edge_distance / (margin / 2.0)).min(1.0).max(0.0);

    let color_similarity = match (mode.reference_color(), mean_color) {
        (Some(reference), Some(sample)) => {
            let distance = reference.distance(sample);
            // sRGB Euclidean distance maxes out at sqrt(3) * 255.
            1.0 - (distance / (3.0f64.sqrt() * 255.0)).min(1.0)
        }
        _ => 1.0,
    };

    ScoreBreakdown {
        center_proximity,
        radius_closeness,
        edge_clearance,
        color_similarity,
    }
}

trait Distance {
    fn distance_to(self, other: Point2f) -> f32;
}

impl Distance for Point2f {
    fn distance_to(self, other: Point2f) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Sample the mean BGR color of a small square patch centered on `(x, y)` in a BGR `Mat`.
pub fn mean_color_at(bgr: &Mat, x: f64, y: f64, half_window: i32) -> Option<opencv::core::Vec3d> {
    let size = bgr.size().ok()?;
    let x0 = (x as i32 - half_window).max(0);
    let y0 = (y as i32 - half_window).max(0);
    let x1 = (x as i32 + half_window).min(size.width - 1);
    let y1 = (y as i32 + half_window).min(size.height - 1);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    let roi = opencv::core::Rect::new(x0, y0, x1 - x0, y1 - y0);
    let patch = Mat::roi(bgr, roi).ok()?;
    let mean = opencv::core::mean(&patch, &opencv::core::no_array()).ok()?;
    Some(opencv::core::Vec3d::from([mean[0], mean[1], mean[2]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_proximity_favors_closer_candidate() {
        let mode = SearchMode::PlacedBall {
            expected_center_px: (320.0, 240.0),
            expected_radius_px: 20.0,
        };
        let near = score_candidate(Vec3f::from([325.0, 240.0, 20.0]), (640, 480), &mode, None);
        let far = score_candidate(Vec3f::from([10.0, 10.0, 20.0]), (640, 480), &mode, None);
        assert!(near.center_proximity > far.center_proximity);
    }

    #[test]
    fn radius_closeness_penalizes_mismatch() {
        let mode = SearchMode::StrobedBall { expected_radius_px: 20.0 };
        let close = score_candidate(Vec3f::from([0.0, 0.0, 21.0]), (640, 480), &mode, None);
        let off = score_candidate(Vec3f::from([0.0, 0.0, 40.0]), (640, 480), &mode, None);
        assert!(close.radius_closeness > off.radius_closeness);
    }
}
