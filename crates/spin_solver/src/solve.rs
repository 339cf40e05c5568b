//! Coarse grid search plus local gradient-free refinement.

use serde::{Deserialize, Serialize};

use crate::ball_image::BallImage;
use crate::correlate::normalized_cross_correlation;
use crate::sphere::EulerDeg;
use crate::warp::warp;

/// Bounds and resolution of the coarse rotation search, and the confidence floor below which
/// a result is reported as unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub coarse_bound_deg: f64,
    pub coarse_step_deg: f64,
    pub refine_iterations: u32,
    pub min_confidence: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            coarse_bound_deg: 45.0,
            coarse_step_deg: 15.0,
            refine_iterations: 20,
            min_confidence: 0.15,
        }
    }
}

/// The solved rotation and the confidence that it's trustworthy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinEstimate {
    pub rotation_deg: EulerDeg,
    pub confidence: f64,
}

/// Search every `(rx, ry, rz)` on a cubic grid spanning `+-coarse_bound_deg` in
/// `coarse_step_deg` increments, scoring each by normalized cross-correlation.
fn coarse_grid_search(reference: &BallImage, target: &BallImage, config: &SolverConfig) -> Vec<(EulerDeg, f64)> {
    let mut steps = Vec::new();
    let mut angle = -config.coarse_bound_deg;
    while angle <= config.coarse_bound_deg + f64::EPSILON {
        steps.push(angle);
        angle += config.coarse_step_deg;
    }

    let mut scored = Vec::with_capacity(steps.len().pow(3));
    for &rx in &steps {
        for &ry in &steps {
            for &rz in &steps {
                let candidate = EulerDeg { rx, ry, rz };
                let warped = warp(reference, candidate);
                let score = normalized_cross_correlation(&warped, target).unwrap_or(-1.0);
                scored.push((candidate, score));
            }
        }
    }
    scored
}

/// Coordinate-descent refinement around `seed`: repeatedly try a shrinking step in each axis,
/// keeping any improvement, matching 's "local gradient-free search".
fn refine(reference: &BallImage, target: &BallImage, seed: EulerDeg, seed_score: f64, iterations: u32) -> (EulerDeg, f64) {
    let mut best = seed;
    let mut best_score = seed_score;
    let mut step = 8.0;

    for _ in 0..iterations {
        let mut improved = false;
        for axis in 0..3 {
            for sign in [-1.0, 1.0] {
                let mut candidate = best;
                let delta = step * sign;
                match axis {
                    0 => candidate.rx += delta,
                    1 => candidate.ry += delta,
                    _ => candidate.rz += delta,
                }
                let warped = warp(reference, candidate);
                let score = normalized_cross_correlation(&warped, target).unwrap_or(-1.0);
                if score > best_score {
                    best = candidate;
                    best_score = score;
                    improved = true;
                }
            }
        }
        if !improved {
            step *= 0.5;
        }
        if step < 0.1 {
            break;
        }
    }

    (best, best_score)
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Recovers the 3-axis rotation that best maps `reference`'s surface markings onto `target`'s.
/// Returns `None` ("spin unavailable") if the peak correlation, after subtracting the
/// coarse-grid median, falls below `config.min_confidence`.
pub fn solve(reference: &BallImage, target: &BallImage, config: &SolverConfig) -> Option<SpinEstimate> {
    let coarse = coarse_grid_search(reference, target, config);
    let scores: Vec<f64> = coarse.iter().map(|(_, score)| *score).collect();
    let baseline = median(&scores);

    let &(best_seed, best_seed_score) = coarse.iter().max_by(|a, b| a.1.total_cmp(&b.1))?;

    let (refined_rotation, refined_score) = refine(reference, target, best_seed, best_seed_score, config.refine_iterations);

    let confidence = (refined_score - baseline).clamp(0.0, 1.0);
    if confidence < config.min_confidence {
        return None;
    }

    Some(SpinEstimate {
        rotation_deg: refined_rotation,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn textured_ball(seed: u32) -> BallImage {
        let mut pixels = GrayImage::new(BallImage::RESOLUTION, BallImage::RESOLUTION);
        for y in 0..BallImage::RESOLUTION {
            for x in 0..BallImage::RESOLUTION {
                let value = ((x.wrapping_mul(31) ^ y.wrapping_mul(17) ^ seed).wrapping_mul(2654435761)) % 256;
                pixels.put_pixel(x, y, Luma([value as u8]));
            }
        }
        BallImage { pixels }
    }

    #[test]
    fn identical_balls_solve_to_near_zero_rotation_with_high_confidence() {
        let reference = textured_ball(7);
        let target = textured_ball(7);
        let config = SolverConfig {
            coarse_bound_deg: 20.0,
            coarse_step_deg: 20.0,
            refine_iterations: 10,
            min_confidence: 0.1,
        };
        let estimate = solve(&reference, &target, &config).expect("should be confident");
        assert!(estimate.rotation_deg.rx.abs() < 25.0);
        assert!(estimate.confidence > 0.0);
    }

    #[test]
    fn featureless_balls_report_unavailable() {
        let flat = BallImage {
            pixels: GrayImage::from_pixel(BallImage::RESOLUTION, BallImage::RESOLUTION, Luma([128])),
        };
        let config = SolverConfig {
            coarse_bound_deg: 10.0,
            coarse_step_deg: 10.0,
            refine_iterations: 4,
            min_confidence: 0.1,
        };
        assert!(solve(&flat, &flat, &config).is_none());
    }
}
