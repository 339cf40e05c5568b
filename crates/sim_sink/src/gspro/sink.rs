//! GSPro Connect v1 sink: a blocking TCP client that sends shots/heartbeats as single-line JSON
//! and reacts to GSPro's response for readiness and club-selection changes.

use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use fsm::ControlMessage;
use shot_analyzer::ClubType;
use tracing::{info, warn};

use crate::connection::{connect_with_retry, send_line, spawn_line_reader};
use crate::error::Result;
use crate::gspro::schema::{GsProMessage, GsProResponse};
use crate::sink::SimSink;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

pub struct GsProSink {
    stream: TcpStream,
    device_id: String,
    armed: Arc<AtomicBool>,
}

impl GsProSink {
    /// Connects to a running GSPro Connect listener, starts the response reader and heartbeat
    /// threads, and returns a sink ready to carry shots. `club_changes` is where a club the
    /// player picked in GSPro is reported back to the flight process.
    pub fn connect(addr: &str, device_id: &str, club_changes: Sender<ControlMessage>) -> std::io::Result<Self> {
        let stream = connect_with_retry(addr)?;
        let armed = Arc::new(AtomicBool::new(false));

        let reader_stream = stream.try_clone()?;
        let armed_for_reader = Arc::clone(&armed);
        spawn_line_reader(reader_stream, move |line| {
            handle_response_line(&line, &armed_for_reader, &club_changes);
        });

        let heartbeat_stream = stream.try_clone()?;
        let device_id_owned = device_id.to_string();
        let armed_for_heartbeat = Arc::clone(&armed);
        thread::spawn(move || run_heartbeat_loop(heartbeat_stream, device_id_owned, armed_for_heartbeat));

        Ok(Self {
            stream,
            device_id: device_id.to_string(),
            armed,
        })
    }
}

impl SimSink for GsProSink {
    fn name(&self) -> &'static str {
        "gspro"
    }

    fn send_result(&mut self, result: &shot_analyzer::ShotResult) -> Result<()> {
        let message = GsProMessage::shot(&self.device_id, result);
        let payload = serde_json::to_string(&message)?;
        send_line(&mut self.stream, &payload)?;
        Ok(())
    }

    fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

fn run_heartbeat_loop(mut stream: TcpStream, device_id: String, armed: Arc<AtomicBool>) {
    loop {
        let ready = armed.load(Ordering::SeqCst);
        let message = GsProMessage::heartbeat_with_readiness(&device_id, 0, ready);
        let payload = match serde_json::to_string(&message) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "gspro sink: heartbeat encode failed");
                thread::sleep(HEARTBEAT_INTERVAL);
                continue;
            }
        };
        if let Err(error) = send_line(&mut stream, &payload) {
            warn!(%error, "gspro sink: heartbeat send failed, stopping");
            return;
        }
        thread::sleep(HEARTBEAT_INTERVAL);
    }
}

fn handle_response_line(line: &str, armed: &Arc<AtomicBool>, club_changes: &Sender<ControlMessage>) {
    let response: GsProResponse = match serde_json::from_str(line) {
        Ok(response) => response,
        Err(error) => {
            warn!(%error, line, "gspro sink: malformed response dropped");
            return;
        }
    };
    armed.store(response.code == 200, Ordering::SeqCst);

    let Some(player) = response.player else {
        return;
    };
    if let Some(handed) = &player.handed {
        info!(handed, "gspro sink: player handedness reported (not propagated; set via config)");
    }
    if let Some(club) = player.club.as_deref().and_then(parse_club) {
        if club_changes.send(ControlMessage::ChangeClub(club)).is_err() {
            warn!("gspro sink: club-change channel closed");
        }
    }
}

fn parse_club(code: &str) -> Option<ClubType> {
    match code {
        "DR" | "Driver" => Some(ClubType::Driver),
        "PT" | "Putter" => Some(ClubType::Putter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_club_codes() {
        assert_eq!(parse_club("DR"), Some(ClubType::Driver));
        assert_eq!(parse_club("PT"), Some(ClubType::Putter));
        assert_eq!(parse_club("7I"), None);
    }
}
