use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One `(high, low)` interval of a strobe pulse train, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseInterval {
    pub high_us: u32,
    pub low_us: u32,
}

/// The ordered intervals of a strobe train ("pulse plan").
///
/// The sum of every interval's `high_us + low_us` is the time base the shot analyzer uses to
/// convert pixel displacement between exposures into a velocity: this sum is used, never
/// `(N-1) * period`, since a partial last pulse still contributes exposure time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulsePlan {
    pub intervals: Vec<PulseInterval>,
}

impl PulsePlan {
    pub fn new(intervals: Vec<PulseInterval>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(Error::EmptyPulsePlan);
        }
        Ok(Self { intervals })
    }

    /// Number of exposures this plan produces on the strobed image.
    pub fn pulse_count(&self) -> usize {
        self.intervals.len()
    }

    /// Sum of every interval's high and low duration: the time base for velocity computation.
    pub fn time_base_us(&self) -> u64 {
        self.intervals
            .iter()
            .map(|interval| u64::from(interval.high_us) + u64::from(interval.low_us))
            .sum()
    }

    /// Cumulative time base up to and including the Nth pulse (0-indexed), used to locate a
    /// given detected ball's exposure time within the train.
    pub fn time_base_through(&self, pulse_index: usize) -> u64 {
        self.intervals
            .iter()
            .take(pulse_index + 1)
            .map(|interval| u64::from(interval.high_us) + u64::from(interval.low_us))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan_is_rejected() {
        assert!(PulsePlan::new(vec![]).is_err());
    }

    #[test]
    fn time_base_sums_unequal_intervals() {
        let plan = PulsePlan::new(vec![
            PulseInterval { high_us: 100, low_us: 900 },
            PulseInterval { high_us: 100, low_us: 1900 },
            PulseInterval { high_us: 100, low_us: 400 },
        ])
        .unwrap();
        assert_eq!(plan.time_base_us(), 3400);
        assert_eq!(plan.time_base_through(0), 1000);
        assert_eq!(plan.time_base_through(1), 3000);
    }
}
