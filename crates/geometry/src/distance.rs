//! Pixel-radius-to-distance forward model and pose composition.

use nalgebra::{Isometry3, Point3 as NaPoint3, Vector3 as NaVector3};

use crate::error::{Error, Result};
use crate::space::{BetweenSpaces, InSpace, Space};

/// Golf ball diameter, meters (USGA spec, 1.68 in).
pub const BALL_DIAMETER_M: f32 = 0.04267;

/// Estimate a ball's distance from the camera given its apparent radius in undistorted pixels
/// and the camera's focal length (also in pixels). Pure pinhole similar-triangles model: a
/// sphere of known diameter subtends an angle inversely proportional to its distance.
pub fn ball_distance_from_radius(radius_px: f64, focal_length_px: f64) -> Result<f64> {
    if radius_px <= 0.0 {
        return Err(Error::NonPositiveRadius { radius_px });
    }
    Ok((f64::from(BALL_DIAMETER_M) / 2.0) * focal_length_px / radius_px)
}

/// Place a ball detected at `ray` (a unit ray from the camera center, in the camera's own
/// optical frame) at its estimated distance, yielding a 3D point still in that camera's frame.
pub fn ball_point_from_ray<S: Space>(ray: NaVector3<f64>, distance_m: f64) -> Result<InSpace<NaPoint3<f32>, S>> {
    if ray.z.abs() < 1e-9 {
        return Err(Error::DegenerateRay { z: ray.z });
    }
    let scaled = ray.normalize() * distance_m;
    Ok(InSpace::new(NaPoint3::new(
        scaled.x as f32,
        scaled.y as f32,
        scaled.z as f32,
    )))
}

/// Compose a camera's pose in the world frame with a ball position measured in that camera's
/// frame, yielding the ball's position in world coordinates.
pub fn compose_pose<S: Space, W: Space>(
    camera_pose: &BetweenSpaces<S, W>,
    ball_in_camera: &InSpace<NaPoint3<f32>, S>,
) -> InSpace<NaPoint3<f32>, W> {
    camera_pose.transform_point(ball_in_camera)
}

/// Build a [`BetweenSpaces`] transform from a camera's world-frame translation and orientation
/// (as reported by the calibration routine).
pub fn camera_pose_from_translation_rotation<S: Space, W: Space>(
    translation: NaVector3<f32>,
    rotation: nalgebra::UnitQuaternion<f32>,
) -> BetweenSpaces<S, W> {
    BetweenSpaces::new(Isometry3::from_parts(translation.into(), rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::WorldSpace;
    use approx::assert_relative_eq;

    #[test]
    fn distance_scales_inversely_with_radius() {
        let far = ball_distance_from_radius(10.0, 900.0).unwrap();
        let near = ball_distance_from_radius(20.0, 900.0).unwrap();
        assert!(near < far);
        assert_relative_eq!(near * 2.0, far, epsilon = 1e-9);
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        assert!(ball_distance_from_radius(0.0, 900.0).is_err());
        assert!(ball_distance_from_radius(-5.0, 900.0).is_err());
    }

    #[test]
    fn compose_pose_translates_camera_local_point_into_world() {
        let pose = camera_pose_from_translation_rotation::<WorldSpace, WorldSpace>(
            NaVector3::new(1.0, 0.0, 0.0),
            nalgebra::UnitQuaternion::identity(),
        );
        let ball: InSpace<NaPoint3<f32>, WorldSpace> = InSpace::new(NaPoint3::new(0.0, 0.0, 2.0));
        let world = compose_pose(&pose, &ball);
        assert_relative_eq!(world.inner.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(world.inner.z, 2.0, epsilon = 1e-6);
    }
}
