pub mod schema;
pub mod sink;

pub use schema::{BallData, ClubData, GsProMessage, GsProResponse, PlayerInfo, ShotDataOptions};
pub use sink::GsProSink;
