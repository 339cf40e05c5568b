//! Publish/subscribe transport over a `zenoh` session, topic `Golf.Sim`.
//! Producer and consumer each run on a dedicated thread; the FSM thread never touches the
//! network directly.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use fsm::Event;
use tracing::{debug, error, warn};
use zenoh::Wait;

use crate::error::{Error, Result};
use crate::message::{Envelope, IpcMessage};
use crate::translate::message_to_event;

/// Per-process identifier used to filter self-echoed messages: `LM_1` for the watcher, `LM_2`
/// for the flight process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderId(pub String);

pub struct IpcBus {
    session: Arc<zenoh::Session>,
    sender_id: SenderId,
    topic: String,
}

impl IpcBus {
    pub fn open(sender_id: SenderId, topic: impl Into<String>) -> Result<Self> {
        let session = zenoh::open(zenoh::Config::default()).wait()?;
        Ok(Self {
            session: Arc::new(session),
            sender_id,
            topic: topic.into(),
        })
    }

    /// Drains `outbound` and publishes each message as one sample, tagged with this process's
    /// sender id: one IPC producer thread that drains the outbound queue.
    pub fn spawn_producer(&self, outbound: Receiver<IpcMessage>) -> JoinHandle<()> {
        let session = Arc::clone(&self.session);
        let topic = self.topic.clone();
        let sender_id = self.sender_id.0.clone();
        thread::spawn(move || {
            let publisher = match session.declare_publisher(topic).wait() {
                Ok(publisher) => publisher,
                Err(error) => {
                    error!(%error, "ipc producer: failed to declare publisher");
                    return;
                }
            };
            while let Ok(message) = outbound.recv() {
                let envelope = Envelope {
                    sender_id: sender_id.clone(),
                    message,
                };
                match bincode::serialize(&envelope) {
                    Ok(bytes) => {
                        if let Err(error) = publisher.put(bytes).wait() {
                            warn!(%error, "ipc producer: publish failed");
                        }
                    }
                    Err(error) => warn!(%error, "ipc producer: envelope encode failed"),
                }
            }
            debug!("ipc producer: outbound channel closed, stopping");
        })
    }

    /// Subscribes to the topic, drops self-echoed and malformed samples, and forwards every
    /// other message translated into an [`Event`] onto `events`: one IPC consumer thread that
    /// deserializes incoming messages and enqueues events.
    pub fn spawn_consumer(&self, events: Sender<Event>) -> Result<JoinHandle<()>> {
        let subscriber = self.session.declare_subscriber(self.topic.clone()).wait()?;
        let sender_id = self.sender_id.0.clone();
        Ok(thread::spawn(move || {
            while let Ok(sample) = subscriber.recv() {
                let bytes = sample.payload().to_bytes();
                let envelope: Envelope = match bincode::deserialize(&bytes) {
                    Ok(envelope) => envelope,
                    Err(error) => {
                        warn!(%error, "ipc consumer: malformed sample dropped");
                        continue;
                    }
                };
                if envelope.sender_id == sender_id {
                    continue;
                }
                match message_to_event(envelope.message) {
                    Ok(Some(event)) => {
                        if events.send(event).is_err() {
                            debug!("ipc consumer: event channel closed, stopping");
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(error) => warn!(%error, "ipc consumer: failed to decode message payload"),
                }
            }
        }))
    }
}
