//! Wires the flight (camera 2) half of the pipeline together: the FSM step loop. Unlike the
//! watcher, the flight FSM blocks synchronously inside `step` on
//! [`fsm::Camera2::capture_triggered_image`] once armed, so this loop needs no
//! separate poll thread of its own.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use diagnostics::report_status;
use fsm::{Camera2, Command, Event, FlightFsm, Status};
use tracing::info;

use crate::error::Result;
use crate::time::now_us;

/// Runs the flight FSM's event loop to completion (until a `Shutdown` event or the event
/// channel closes). `publish` forwards a [`Command`] onward exactly as
/// [`crate::watcher_process::run_watcher_loop`] does.
pub fn run_flight_loop(mut fsm: FlightFsm, mut camera: Box<dyn Camera2>, events: Receiver<Event>, mut publish: impl FnMut(Command) -> Result<()>, ui_status: Option<Sender<Status>>) -> Result<()> {
    loop {
        let event = match events.recv_timeout(Duration::from_millis(500)) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                info!("flight: event channel closed, stopping");
                return Ok(());
            }
        };

        let outcome = fsm.step(event, camera.as_mut(), now_us())?;

        if let Some(status) = &outcome.status {
            report_status(status, ui_status.as_ref());
        }

        for command in outcome.commands {
            publish(command)?;
        }

        if outcome.shutdown {
            info!("flight: shutdown requested");
            return Ok(());
        }
    }
}
