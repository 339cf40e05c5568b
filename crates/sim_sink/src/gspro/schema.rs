//! GSPro Connect v1 JSON schema, grounded on `divotmaker-flighthook`'s `gspro/api.rs` actor.
//! Every `BallData` numeric field must serialize as a quoted decimal string (`"55.0"`, not
//! `55.0`) — GSPro's own connect API parses them that way, so [`one_decimal`] is used in place
//! of the default `f64` serialization throughout.

use serde::{Deserialize, Serialize, Serializer};
use shot_analyzer::ShotResult;

fn one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.1}"))
}

#[derive(Debug, Clone, Serialize)]
pub struct BallData {
    #[serde(rename = "Speed", serialize_with = "one_decimal")]
    pub speed_mph: f64,
    #[serde(rename = "SpinAxis", serialize_with = "one_decimal")]
    pub spin_axis_deg: f64,
    #[serde(rename = "TotalSpin", serialize_with = "one_decimal")]
    pub total_spin_rpm: f64,
    #[serde(rename = "BackSpin", serialize_with = "one_decimal")]
    pub back_spin_rpm: f64,
    #[serde(rename = "SideSpin", serialize_with = "one_decimal")]
    pub side_spin_rpm: f64,
    #[serde(rename = "HLA", serialize_with = "one_decimal")]
    pub hla_deg: f64,
    #[serde(rename = "VLA", serialize_with = "one_decimal")]
    pub vla_deg: f64,
}

impl BallData {
    pub fn from_shot_result(result: &ShotResult) -> Self {
        let total_spin_rpm = result.back_spin_rpm.hypot(result.side_spin_rpm);
        let spin_axis_deg = result.side_spin_rpm.atan2(result.back_spin_rpm).to_degrees();
        Self {
            speed_mph: result.speed_mph,
            spin_axis_deg,
            total_spin_rpm,
            back_spin_rpm: result.back_spin_rpm,
            side_spin_rpm: result.side_spin_rpm,
            hla_deg: result.hla_deg,
            vla_deg: result.vla_deg,
        }
    }
}

/// No club-head sensor exists in this system, so `ClubData` is always sent as zeros; the
/// field is still present in every message GSPro expects it in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClubData {
    #[serde(rename = "Speed", serialize_with = "one_decimal")]
    pub speed_mph: f64,
    #[serde(rename = "AngleOfAttack", serialize_with = "one_decimal")]
    pub angle_of_attack_deg: f64,
    #[serde(rename = "FaceToTarget", serialize_with = "one_decimal")]
    pub face_to_target_deg: f64,
    #[serde(rename = "Path", serialize_with = "one_decimal")]
    pub path_deg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShotDataOptions {
    #[serde(rename = "ContainsBallData")]
    pub contains_ball_data: bool,
    #[serde(rename = "ContainsClubData")]
    pub contains_club_data: bool,
    #[serde(rename = "LaunchMonitorIsReady")]
    pub launch_monitor_is_ready: bool,
    #[serde(rename = "LaunchMonitorBallDetected")]
    pub launch_monitor_ball_detected: bool,
    #[serde(rename = "IsHeartBeat")]
    pub is_heartbeat: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GsProMessage {
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "Units")]
    pub units: String,
    #[serde(rename = "ShotNumber")]
    pub shot_number: u32,
    #[serde(rename = "APIversion")]
    pub api_version: String,
    #[serde(rename = "BallData", skip_serializing_if = "Option::is_none")]
    pub ball_data: Option<BallData>,
    #[serde(rename = "ClubData")]
    pub club_data: ClubData,
    #[serde(rename = "ShotDataOptions")]
    pub shot_data_options: ShotDataOptions,
}

impl GsProMessage {
    pub fn shot(device_id: &str, result: &ShotResult) -> Self {
        Self {
            device_id: device_id.to_string(),
            units: "Yards".to_string(),
            shot_number: result.shot_number,
            api_version: "1".to_string(),
            ball_data: Some(BallData::from_shot_result(result)),
            club_data: ClubData::default(),
            shot_data_options: ShotDataOptions {
                contains_ball_data: true,
                contains_club_data: false,
                launch_monitor_is_ready: true,
                launch_monitor_ball_detected: true,
                is_heartbeat: false,
            },
        }
    }

    /// A heartbeat carries no ball data; `launch_monitor_is_ready` reports whether this sink
    /// (and, by the time it's sent, every other configured sink) is armed for a shot.
    pub fn heartbeat_with_readiness(device_id: &str, shot_number: u32, ready: bool) -> Self {
        Self {
            device_id: device_id.to_string(),
            units: "Yards".to_string(),
            shot_number,
            api_version: "1".to_string(),
            ball_data: None,
            club_data: ClubData::default(),
            shot_data_options: ShotDataOptions {
                contains_ball_data: false,
                contains_club_data: false,
                launch_monitor_is_ready: ready,
                launch_monitor_ball_detected: false,
                is_heartbeat: true,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInfo {
    #[serde(rename = "Handed")]
    pub handed: Option<String>,
    #[serde(rename = "Club")]
    pub club: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GsProResponse {
    #[serde(rename = "Code")]
    pub code: i32,
    #[serde(rename = "Message")]
    pub message: Option<String>,
    #[serde(rename = "Player")]
    pub player: Option<PlayerInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shot_analyzer::ClubType;

    #[test]
    fn ball_data_serializes_numeric_fields_as_quoted_decimal_strings() {
        let result = ShotResult {
            shot_number: 3,
            speed_mph: 55.0,
            vla_deg: 12.3,
            hla_deg: -1.2,
            back_spin_rpm: 2500.0,
            side_spin_rpm: -50.0,
            club_type: ClubType::Driver,
        };
        let message = GsProMessage::shot("LM_1", &result);
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"Speed\":\"55.0\""), "expected quoted decimal Speed, got {json}");
        assert!(json.contains("\"VLA\":\"12.3\""), "expected quoted decimal VLA, got {json}");
    }

    #[test]
    fn heartbeat_carries_no_ball_data() {
        let message = GsProMessage::heartbeat_with_readiness("LM_1", 0, true);
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("BallData"));
        assert!(json.contains("\"IsHeartBeat\":true"));
    }
}
