//! Periodic status reporting, so a UI can reflect progress. The FSM's own [`fsm::Status`] is
//! the vocabulary; this just turns a state change into a structured log line and, if a UI
//! channel is connected, a message on it.

use crossbeam_channel::Sender;
use fsm::Status;
use tracing::{error, info};

/// Reports an [`fsm::Status`] transition: always as a structured log line, and additionally on
/// `ui_channel` if one was configured (headless runs pass `None`).
pub fn report_status(status: &Status, ui_channel: Option<&Sender<Status>>) {
    match status {
        Status::Error(message) => error!(status = "error", message, "status changed"),
        other => info!(status = ?other, "status changed"),
    }
    if let Some(channel) = ui_channel {
        if channel.send(status.clone()).is_err() {
            error!("status reporter: UI channel closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporting_without_a_ui_channel_does_not_panic() {
        report_status(&Status::WaitingForBallToAppear, None);
    }

    #[test]
    fn reporting_forwards_to_a_connected_ui_channel() {
        let (tx, rx) = crossbeam_channel::unbounded();
        report_status(&Status::Hit, Some(&tx));
        assert!(matches!(rx.try_recv().unwrap(), Status::Hit));
    }
}
