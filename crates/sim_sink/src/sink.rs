//! The simulator-facing side of the bus: a [`SimSink`] turns an analyzed [`ShotResult`] into
//! whatever wire format a given simulator expects and reports whether it is ready to accept a
//! shot.

use crossbeam_channel::Receiver;
use shot_analyzer::ShotResult;
use tracing::{info, warn};

use crate::error::Result;

/// One connected simulator. Implementations own their socket and any handshake/heartbeat state;
/// `send_result` and `is_armed` are called from the sink's dedicated thread only.
pub trait SimSink: Send {
    /// Human-readable name used in logs (`"gspro"`, `"e6"`).
    fn name(&self) -> &'static str;

    /// Sends one completed shot to the simulator.
    fn send_result(&mut self, result: &ShotResult) -> Result<()>;

    /// Whether the simulator has told this sink it is ready for a shot. A shot is only
    /// dispatched once every configured sink reports armed.
    fn is_armed(&self) -> bool;
}

pub fn all_sinks_armed(sinks: &[Box<dyn SimSink>]) -> bool {
    sinks.iter().all(|sink| sink.is_armed())
}

/// Drains `results` and forwards each one to every sink in turn, stopping when the channel
/// closes. Runs on its own thread; each sink pushes club-changes it learns from its simulator
/// back into the flight FSM's event stream independently, through the channel it was built with.
pub fn run_dispatch_loop(results: Receiver<ShotResult>, mut sinks: Vec<Box<dyn SimSink>>) {
    while let Ok(result) = results.recv() {
        if !all_sinks_armed(&sinks) {
            warn!("sim sink: dropping result, not every sink is armed");
            continue;
        }
        for sink in sinks.iter_mut() {
            match sink.send_result(&result) {
                Ok(()) => info!(sink = sink.name(), shot_number = result.shot_number, "sim sink: result sent"),
                Err(error) => warn!(sink = sink.name(), %error, "sim sink: failed to send result"),
            }
        }
    }
    info!("sim sink: dispatch loop stopping, result channel closed");
}
