//! TruGolf E6 Connect JSON schema. Distinct from GSPro's: E6 drives readiness itself by sending
//! explicit arm/disarm commands rather than a polled heartbeat response, and its ball-data
//! fields are plain JSON numbers, not quoted decimal strings — that requirement is GSPro-specific.

use serde::{Deserialize, Serialize};
use shot_analyzer::ShotResult;

#[derive(Debug, Clone, Deserialize)]
pub struct E6Command {
    #[serde(rename = "Command")]
    pub command: String,
}

impl E6Command {
    pub fn is_arm(&self) -> bool {
        self.command.eq_ignore_ascii_case("ARM")
    }

    pub fn is_disarm(&self) -> bool {
        self.command.eq_ignore_ascii_case("DISARM")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct E6BallData {
    #[serde(rename = "Speed")]
    pub speed_mph: f64,
    #[serde(rename = "VLA")]
    pub vla_deg: f64,
    #[serde(rename = "HLA")]
    pub hla_deg: f64,
    #[serde(rename = "BackSpin")]
    pub back_spin_rpm: f64,
    #[serde(rename = "SideSpin")]
    pub side_spin_rpm: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct E6ShotMessage {
    #[serde(rename = "ShotNumber")]
    pub shot_number: u32,
    #[serde(rename = "BallData")]
    pub ball_data: E6BallData,
}

impl E6ShotMessage {
    pub fn from_shot_result(result: &ShotResult) -> Self {
        Self {
            shot_number: result.shot_number,
            ball_data: E6BallData {
                speed_mph: result.speed_mph,
                vla_deg: result.vla_deg,
                hla_deg: result.hla_deg,
                back_spin_rpm: result.back_spin_rpm,
                side_spin_rpm: result.side_spin_rpm,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_and_disarm_commands_are_recognized_case_insensitively() {
        assert!(E6Command { command: "arm".into() }.is_arm());
        assert!(E6Command { command: "DISARM".into() }.is_disarm());
        assert!(!E6Command { command: "ARM".into() }.is_disarm());
    }

    #[test]
    fn ball_data_fields_serialize_as_plain_numbers() {
        let message = E6ShotMessage {
            shot_number: 1,
            ball_data: E6BallData {
                speed_mph: 55.0,
                vla_deg: 12.0,
                hla_deg: -1.0,
                back_spin_rpm: 2500.0,
                side_spin_rpm: -50.0,
            },
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"Speed\":55.0"));
    }
}
