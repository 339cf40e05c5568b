//! Publish/subscribe bus carrying typed messages between the watcher and flight processes.
//! Built over `zenoh`; the message envelope generalizes `bifrost`'s
//! sender-id-filtering broadcast idea from a fixed UDP packet format to a `bincode`-encoded
//! [`IpcMessage`] enum that can also carry an image.

pub mod bus;
pub mod error;
pub mod message;
pub mod translate;
pub mod wire_image;

pub use bus::{IpcBus, SenderId};
pub use error::{Error, Result};
pub use message::{Envelope, IpcMessage};
pub use translate::{command_to_message, message_to_event};
pub use wire_image::WireImage;
