//! The one-way translation between a [`Command`] emitted by one FSM and the [`Event`] the other
//! FSM receives: the bus turns messages into events, the FSM consumes events and posts results;
//! they share no mutable state directly.

use fsm::{Command, Event};

use crate::error::Result;
use crate::message::IpcMessage;
use crate::wire_image::WireImage;

pub fn command_to_message(command: Command) -> Result<IpcMessage> {
    Ok(match command {
        Command::ArmCamera2 => IpcMessage::ArmCamera2,
        Command::PublishCamera2PreImage(image) => IpcMessage::Camera2PreImage(WireImage::encode(&image)?),
        Command::PublishCamera2Image(image) => IpcMessage::Camera2Image(WireImage::encode(&image)?),
        Command::PublishResult(result) => IpcMessage::Result(result),
    })
}

/// `None` means the message is meaningful on the bus but irrelevant to either FSM (a `Result`
/// is for `sim_sink`/diagnostics, not a state-machine input).
pub fn message_to_event(message: IpcMessage) -> Result<Option<Event>> {
    Ok(match message {
        IpcMessage::ArmCamera2 => Some(Event::ArmCamera2),
        IpcMessage::Camera2PreImage(wire) => Some(Event::Camera2PreImage(wire.decode()?)),
        IpcMessage::Camera2Image(wire) => Some(Event::Camera2Image(wire.decode()?)),
        IpcMessage::Shutdown => Some(Event::Shutdown),
        IpcMessage::Control(control) => Some(Event::Control(control)),
        IpcMessage::Result(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsm::ControlMessage;
    use shot_analyzer::ClubType;

    #[test]
    fn arm_camera2_round_trips_to_the_matching_event() {
        let message = command_to_message(Command::ArmCamera2).unwrap();
        let event = message_to_event(message).unwrap().unwrap();
        assert!(matches!(event, Event::ArmCamera2));
    }

    #[test]
    fn a_shot_result_never_becomes_an_fsm_event() {
        let result = shot_analyzer::ShotResult {
            shot_number: 1,
            speed_mph: 100.0,
            vla_deg: 10.0,
            hla_deg: 1.0,
            back_spin_rpm: 2000.0,
            side_spin_rpm: -100.0,
            club_type: ClubType::Driver,
        };
        let message = IpcMessage::Result(result);
        assert!(message_to_event(message).unwrap().is_none());
    }

    #[test]
    fn control_message_passes_through_unchanged() {
        let control = ControlMessage::ChangeClub(ClubType::Putter);
        let message = IpcMessage::Control(control);
        let event = message_to_event(message).unwrap().unwrap();
        assert!(matches!(event, Event::Control(ControlMessage::ChangeClub(ClubType::Putter))));
    }
}
