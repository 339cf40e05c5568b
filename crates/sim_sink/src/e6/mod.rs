pub mod schema;
pub mod sink;

pub use schema::{E6BallData, E6Command, E6ShotMessage};
pub use sink::E6Sink;
