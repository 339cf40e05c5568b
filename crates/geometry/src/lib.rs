//! Coordinate frames, camera intrinsics, and the pixel-to-world forward model shared by
//! every vision component of the launch monitor.

pub mod distance;
pub mod error;
pub mod intrinsics;
pub mod space;

pub use distance::{
    ball_distance_from_radius, ball_point_from_ray, camera_pose_from_translation_rotation,
    compose_pose, BALL_DIAMETER_M,
};
pub use error::{Error, Result};
pub use intrinsics::{CameraIntrinsics, Distortion};
pub use space::{BetweenSpaces, Camera1Space, Camera2Space, InSpace, Point3, Space, Vector3, WorldSpace};
