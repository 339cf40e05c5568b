//! The ball-position data model and its invariants.

use crate::error::{Error, Result};

/// How a [`BallPosition`] was produced. Mirrors the detector search modes ([`crate::SearchMode`])
/// plus a tag for positions synthesized in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MethodTag {
    PlacedBall,
    StrobedBall,
    BallAgainstReference,
    Synthetic,
}

/// An immutable ball candidate: `(x_px, y_px, r_px, confidence, timestamp_us, method_tag)`.
/// Constructed once by a detector and never mutated afterward; derived
/// quantities downstream (distance, velocity, spin) are computed from a `BallPosition`, not
/// written back into it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BallPosition {
    pub x_px: f64,
    pub y_px: f64,
    pub r_px: f64,
    pub confidence: f64,
    pub timestamp_us: u64,
    pub method: MethodTag,
}

impl BallPosition {
    /// Constructs a ball position, enforcing its invariants: confidence in
    /// `[0, 1]`, non-negative radius, finite coordinates.
    pub fn new(x_px: f64, y_px: f64, r_px: f64, confidence: f64, timestamp_us: u64, method: MethodTag) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::ConfidenceOutOfRange { confidence });
        }
        if r_px < 0.0 {
            return Err(Error::NegativeRadius { radius_px: r_px });
        }
        if !x_px.is_finite() || !y_px.is_finite() {
            return Err(Error::NonFiniteCoordinates { x: x_px, y: y_px });
        }
        Ok(Self {
            x_px,
            y_px,
            r_px,
            confidence,
            timestamp_us,
            method,
        })
    }

    pub fn distance_to(&self, other: &BallPosition) -> f64 {
        ((self.x_px - other.x_px).powi(2) + (self.y_px - other.y_px).powi(2)).sqrt()
    }
}

/// Five confidence buckets, thresholds inclusive on the lower bound of each non-first bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn of(confidence: f64) -> Self {
        if confidence < 0.3 {
            Self::VeryLow
        } else if confidence < 0.5 {
            Self::Low
        } else if confidence < 0.7 {
            Self::Medium
        } else if confidence < 0.9 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_out_of_range_is_rejected() {
        assert!(BallPosition::new(0.0, 0.0, 1.0, 1.1, 0, MethodTag::Synthetic).is_err());
        assert!(BallPosition::new(0.0, 0.0, 1.0, -0.1, 0, MethodTag::Synthetic).is_err());
    }

    #[test]
    fn negative_radius_is_rejected() {
        assert!(BallPosition::new(0.0, 0.0, -1.0, 0.5, 0, MethodTag::Synthetic).is_err());
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert!(BallPosition::new(f64::NAN, 0.0, 1.0, 0.5, 0, MethodTag::Synthetic).is_err());
        assert!(BallPosition::new(0.0, f64::INFINITY, 1.0, 0.5, 0, MethodTag::Synthetic).is_err());
    }

    #[test]
    fn confidence_buckets_match_thresholds() {
        assert_eq!(ConfidenceLevel::of(0.0), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::of(0.29), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::of(0.3), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::of(0.5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::of(0.7), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::of(0.9), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::of(1.0), ConfidenceLevel::VeryHigh);
    }
}
