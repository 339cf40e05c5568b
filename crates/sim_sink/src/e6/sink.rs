//! TruGolf E6 Connect sink. Unlike GSPro, E6 pushes arm/disarm commands to us; the reader thread
//! updates an `AtomicBool` the main sink reads from `is_armed`, with no heartbeat of our own.

use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::connection::{connect_with_retry, send_line, spawn_line_reader};
use crate::e6::schema::{E6Command, E6ShotMessage};
use crate::error::Result;
use crate::sink::SimSink;

pub struct E6Sink {
    stream: TcpStream,
    armed: Arc<AtomicBool>,
}

impl E6Sink {
    pub fn connect(addr: &str) -> std::io::Result<Self> {
        let stream = connect_with_retry(addr)?;
        let armed = Arc::new(AtomicBool::new(false));

        let reader_stream = stream.try_clone()?;
        let armed_for_reader = Arc::clone(&armed);
        spawn_line_reader(reader_stream, move |line| {
            handle_command_line(&line, &armed_for_reader);
        });

        Ok(Self { stream, armed })
    }
}

impl SimSink for E6Sink {
    fn name(&self) -> &'static str {
        "e6"
    }

    fn send_result(&mut self, result: &shot_analyzer::ShotResult) -> Result<()> {
        let message = E6ShotMessage::from_shot_result(result);
        let payload = serde_json::to_string(&message)?;
        send_line(&mut self.stream, &payload)?;
        Ok(())
    }

    fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

fn handle_command_line(line: &str, armed: &Arc<AtomicBool>) {
    let command: E6Command = match serde_json::from_str(line) {
        Ok(command) => command,
        Err(error) => {
            warn!(%error, line, "e6 sink: malformed command dropped");
            return;
        }
    };
    if command.is_arm() {
        info!("e6 sink: armed");
        armed.store(true, Ordering::SeqCst);
    } else if command.is_disarm() {
        info!("e6 sink: disarmed");
        armed.store(false, Ordering::SeqCst);
    } else {
        warn!(command = command.command, "e6 sink: unrecognized command");
    }
}
