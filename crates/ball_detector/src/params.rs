//! Per-mode Hough/Canny parameters, loaded from the config store.

use serde::{Deserialize, Serialize};

/// The underlying pre-Canny blur ordering has two divergent variants
/// (blur -> canny -> blur, vs canny -> blur), selected by config. Both are kept; no new default
/// is invented beyond what the config selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlurOrder {
    /// Gaussian blur, then Canny, then an optional second Gaussian blur.
    BlurBeforeAndAfterCanny,
    /// Canny first, then a single Gaussian blur pass.
    CannyThenBlur,
}

/// Which `cv::HoughModes` variant to drive `HoughCircles` with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoughVariant {
    Gradient,
    GradientAlt,
}

impl HoughVariant {
    pub fn as_opencv(self) -> i32 {
        match self {
            Self::Gradient => opencv::imgproc::HOUGH_GRADIENT,
            Self::GradientAlt => opencv::imgproc::HOUGH_GRADIENT_ALT,
        }
    }
}

/// The full tunable parameter set for one detector invocation, all sourced from the config
/// store's per-mode section, since these values differ substantially between modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoughParams {
    pub blur_order: BlurOrder,
    pub pre_canny_blur: u32,
    pub pre_hough_blur: u32,
    pub canny_lower: f64,
    pub canny_upper: f64,
    pub ignore_band_bottom_fraction: f64,

    pub hough_variant: HoughVariant,
    pub dp: f64,
    pub min_dist: f64,
    pub canny_param1: f64,
    pub min_param2: f64,
    pub max_param2: f64,
    pub param2_increment: f64,
    pub min_radius_px: i32,
    pub max_radius_px: i32,

    pub min_returned_circles: usize,
    pub max_returned_circles: usize,

    /// Minimum fraction of the frame's smaller dimension a candidate's center must be from
    /// every edge to be retained (distance from frame edges, as a fraction of frame size).
    pub edge_margin_fraction: f64,
}

impl Default for HoughParams {
    /// A reasonable baseline matching the original `gs_options.h` defaults order of magnitude;
    /// real values are always loaded per mode from the config store.
    fn default() -> Self {
        Self {
            blur_order: BlurOrder::BlurBeforeAndAfterCanny,
            pre_canny_blur: 5,
            pre_hough_blur: 0,
            canny_lower: 50.0,
            canny_upper: 150.0,
            ignore_band_bottom_fraction: 0.0,
            hough_variant: HoughVariant::Gradient,
            dp: 1.0,
            min_dist: 50.0,
            canny_param1: 100.0,
            min_param2: 20.0,
            max_param2: 80.0,
            param2_increment: 2.0,
            min_radius_px: 5,
            max_radius_px: 200,
            min_returned_circles: 1,
            max_returned_circles: 8,
            edge_margin_fraction: 0.10,
        }
    }
}

/// The adaptive sequence of accumulator thresholds `detect` will try, stopping at the first
/// one whose circle count falls within `[min_returned_circles, max_returned_circles]`.
pub fn param2_ladder(params: &HoughParams) -> Vec<f64> {
    let mut ladder = Vec::new();
    let mut value = params.max_param2;
    while value >= params.min_param2 {
        ladder.push(value);
        value -= params.param2_increment;
    }
    if ladder.last().is_none_or(|&last| (last - params.min_param2).abs() > f64::EPSILON) {
        ladder.push(params.min_param2);
    }
    ladder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_steps_down_from_max_to_min() {
        let params = HoughParams {
            min_param2: 20.0,
            max_param2: 30.0,
            param2_increment: 5.0,
            ..Default::default()
        };
        let ladder = param2_ladder(&params);
        assert_eq!(ladder, vec![30.0, 25.0, 20.0]);
    }
}
