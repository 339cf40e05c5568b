//! Orthographic sphere lift/projection and the fixed Euler rotation order: z then x then y.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A candidate rotation, one grid point or refinement step of the search space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerDeg {
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl EulerDeg {
    pub const ZERO: Self = Self { rx: 0.0, ry: 0.0, rz: 0.0 };

    /// Compose the rotation `z` then `x` then `y`, applied to a point already lifted onto the
    /// unit sphere.
    pub fn rotate(&self, point: Vector3<f64>) -> Vector3<f64> {
        let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.rz.to_radians());
        let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.rx.to_radians());
        let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.ry.to_radians());
        (ry * rx * rz) * point
    }
}

impl std::ops::Add for EulerDeg {
    type Output = EulerDeg;
    fn add(self, rhs: EulerDeg) -> EulerDeg {
        EulerDeg {
            rx: self.rx + rhs.rx,
            ry: self.ry + rhs.ry,
            rz: self.rz + rhs.rz,
        }
    }
}

/// Lift a pixel offset from the ball's disc center (in pixels, disc radius `radius_px`) onto
/// the near hemisphere of the unit sphere under orthographic projection. Returns `None` for
/// points outside the disc.
pub fn lift_to_sphere(dx_px: f64, dy_px: f64, radius_px: f64) -> Option<Vector3<f64>> {
    let x = dx_px / radius_px;
    let y = dy_px / radius_px;
    let r2 = x * x + y * y;
    if r2 > 1.0 {
        return None;
    }
    Some(Vector3::new(x, y, (1.0 - r2).sqrt()))
}

/// Re-project a rotated sphere point back onto the disc (orthographic: drop `z`). Returns
/// `None` if the point has rotated onto the far hemisphere (not visible to the camera).
pub fn project_to_disc(point: Vector3<f64>, radius_px: f64) -> Option<(f64, f64)> {
    if point.z <= 0.0 {
        return None;
    }
    Some((point.x * radius_px, point.y * radius_px))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn center_lifts_to_pole() {
        let point = lift_to_sphere(0.0, 0.0, 10.0).unwrap();
        assert_relative_eq!(point.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn outside_disc_is_none() {
        assert!(lift_to_sphere(11.0, 0.0, 10.0).is_none());
    }

    #[test]
    fn zero_rotation_is_identity() {
        let point = lift_to_sphere(3.0, 4.0, 10.0).unwrap();
        let rotated = EulerDeg::ZERO.rotate(point);
        assert_relative_eq!(rotated.x, point.x, epsilon = 1e-9);
        assert_relative_eq!(rotated.y, point.y, epsilon = 1e-9);
        assert_relative_eq!(rotated.z, point.z, epsilon = 1e-9);
    }

    #[test]
    fn ninety_degree_yaw_swaps_x_and_z_sign() {
        let point = Vector3::new(0.0, 0.0, 1.0);
        let rotated = (EulerDeg { rx: 0.0, ry: 90.0, rz: 0.0 }).rotate(point);
        assert_relative_eq!(rotated.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-6);
    }
}
