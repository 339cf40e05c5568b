//! Camera intrinsic model: pixel<->ray, radial+tangential distortion.

use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

/// Standard Brown-Conrady radial+tangential distortion coefficients.
///
/// Order matches OpenCV's convention: `(k1, k2, p1, p2, k3)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distortion {
    pub k1: f64,
    pub k2: f64,
    pub p1: f64,
    pub p2: f64,
    pub k3: f64,
}

impl Distortion {
    pub const IDENTITY: Self = Self {
        k1: 0.0,
        k2: 0.0,
        p1: 0.0,
        p2: 0.0,
        k3: 0.0,
    };
}

impl Default for Distortion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A camera's intrinsic calibration: focal lengths, principal point, and lens distortion.
///
/// Loaded per camera model/resolution from the config store. If no calibration is known for
/// the resolution in use, callers should fall back to [`CameraIntrinsics::identity`] and log a
/// warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in pixels, x axis.
    pub fx: f64,
    /// Focal length in pixels, y axis.
    pub fy: f64,
    /// Principal point x, in pixels.
    pub cx: f64,
    /// Principal point y, in pixels.
    pub cy: f64,
    pub distortion: Distortion,
}

impl CameraIntrinsics {
    /// An intrinsic model with no distortion and a unit focal length, used when no calibration
    /// is available for the requested resolution.
    pub fn identity(width_px: u32, height_px: u32) -> Self {
        Self {
            fx: 1.0,
            fy: 1.0,
            cx: f64::from(width_px) / 2.0,
            cy: f64::from(height_px) / 2.0,
            distortion: Distortion::IDENTITY,
        }
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.fx, 0.0, self.cx, //
            0.0, self.fy, self.cy, //
            0.0, 0.0, 1.0,
        )
    }

    /// Undistort a single pixel coordinate, returning the pixel it would have been at under an
    /// ideal pinhole model. Iterative (Newton) inversion of the forward distortion model.
    pub fn undistort_point(&self, pixel: Point2<f64>) -> Point2<f64> {
        let xn = (pixel.x - self.cx) / self.fx;
        let yn = (pixel.y - self.cy) / self.fy;

        let mut x = xn;
        let mut y = yn;
        for _ in 0..8 {
            let r2 = x * x + y * y;
            let d = self.distortion;
            let radial = 1.0 + d.k1 * r2 + d.k2 * r2 * r2 + d.k3 * r2 * r2 * r2;
            let dx = 2.0 * d.p1 * x * y + d.p2 * (r2 + 2.0 * x * x);
            let dy = d.p1 * (r2 + 2.0 * y * y) + 2.0 * d.p2 * x * y;

            x = (xn - dx) / radial;
            y = (yn - dy) / radial;
        }

        Point2::new(x * self.fx + self.cx, y * self.fy + self.cy)
    }

    /// Distort an (already-undistorted, ideal pinhole) pixel coordinate back to where it would
    /// appear in the raw sensor image. Inverse of [`undistort_point`](Self::undistort_point).
    pub fn distort_point(&self, pixel: Point2<f64>) -> Point2<f64> {
        let x = (pixel.x - self.cx) / self.fx;
        let y = (pixel.y - self.cy) / self.fy;
        let r2 = x * x + y * y;

        let d = self.distortion;
        let radial = 1.0 + d.k1 * r2 + d.k2 * r2 * r2 + d.k3 * r2 * r2 * r2;
        let x_d = x * radial + 2.0 * d.p1 * x * y + d.p2 * (r2 + 2.0 * x * x);
        let y_d = y * radial + d.p1 * (r2 + 2.0 * y * y) + 2.0 * d.p2 * x * y;

        Point2::new(x_d * self.fx + self.cx, y_d * self.fy + self.cy)
    }

    /// Convert a pixel coordinate into a unit ray from the camera center, in the camera's own
    /// optical frame (x right, y down, z forward).
    pub fn pixel_to_ray(&self, pixel: Point2<f64>) -> Vector3<f64> {
        let undistorted = self.undistort_point(pixel);
        let x = (undistorted.x - self.cx) / self.fx;
        let y = (undistorted.y - self.cy) / self.fy;
        Vector3::new(x, y, 1.0).normalize()
    }

    /// Project a ray (in the camera's optical frame) back onto the undistorted pixel plane.
    pub fn ray_to_pixel(&self, ray: Vector3<f64>) -> Point2<f64> {
        let x = ray.x / ray.z;
        let y = ray.y / ray.z;
        self.distort_point(Point2::new(x * self.fx + self.cx, y * self.fy + self.cy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips_to_unit_pixel() {
        let intrinsics = CameraIntrinsics::identity(640, 480);
        let pixel = Point2::new(400.0, 250.0);
        let undistorted = intrinsics.undistort_point(pixel);
        assert!((undistorted.x - pixel.x).abs() < 1e-9);
        assert!((undistorted.y - pixel.y).abs() < 1e-9);
    }

    #[test]
    fn undistort_then_distort_round_trips_within_one_pixel() {
        let intrinsics = CameraIntrinsics {
            fx: 900.0,
            fy: 900.0,
            cx: 640.0,
            cy: 360.0,
            distortion: Distortion {
                k1: -0.12,
                k2: 0.03,
                p1: 0.0008,
                p2: -0.0006,
                k3: 0.0,
            },
        };

        for (px, py) in [(100.0, 100.0), (640.0, 360.0), (1100.0, 680.0), (50.0, 700.0)] {
            let pixel = Point2::new(px, py);
            let undistorted = intrinsics.undistort_point(pixel);
            let redistorted = intrinsics.distort_point(undistorted);
            assert!(
                (redistorted.x - pixel.x).abs() < 1.0,
                "x drifted: {pixel:?} -> {redistorted:?}"
            );
            assert!(
                (redistorted.y - pixel.y).abs() < 1.0,
                "y drifted: {pixel:?} -> {redistorted:?}"
            );
        }
    }
}
