//! Phantom-typed coordinate frames.
//!
//! The launch monitor juggles several coordinate frames (each camera's own
//! frame, the world/target frame, the ball's own reference frame) that are
//! easy to conflate by accident. Tagging points and poses with a marker type
//! per frame turns that class of bug into a compile error instead of a
//! silently wrong shot result.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use nalgebra as na;

/// Marker trait for a coordinate frame.
pub trait Space {}

/// Camera 1's optical frame (the watcher camera, teed-ball side).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera1Space;
impl Space for Camera1Space {}

/// Camera 2's optical frame (the strobe/flight camera).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera2Space;
impl Space for Camera2Space {}

/// The world/target frame: origin at the teed ball, +z toward the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldSpace;
impl Space for WorldSpace {}

/// A value tagged as living in frame `S`.
pub struct InSpace<T, S: Space> {
    pub inner: T,
    phantom: PhantomData<S>,
}

impl<T, S: Space> InSpace<T, S> {
    pub const fn new(inner: T) -> Self {
        Self {
            inner,
            phantom: PhantomData,
        }
    }
}

impl<T, S: Space> From<T> for InSpace<T, S> {
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}

impl<T: Clone, S: Space> Clone for InSpace<T, S> {
    fn clone(&self) -> Self {
        self.inner.clone().into()
    }
}

impl<T: Copy, S: Space> Copy for InSpace<T, S> {}

impl<T: fmt::Debug, S: Space> fmt::Debug for InSpace<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} in {}", self.inner, std::any::type_name::<S>())
    }
}

impl<T, S: Space> Deref for InSpace<T, S> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T, S: Space> DerefMut for InSpace<T, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// A 3D point tagged with the frame it was measured in.
pub type Point3<S> = InSpace<na::Point3<f32>, S>;

/// A 3D vector (displacement) tagged with the frame it was measured in.
pub type Vector3<S> = InSpace<na::Vector3<f32>, S>;

/// A rigid transform carrying points from frame `S1` into frame `S2`.
pub struct BetweenSpaces<S1: Space, S2: Space> {
    pub inner: na::Isometry3<f32>,
    phantom: PhantomData<(S1, S2)>,
}

impl<S1: Space, S2: Space> BetweenSpaces<S1, S2> {
    pub const fn new(inner: na::Isometry3<f32>) -> Self {
        Self {
            inner,
            phantom: PhantomData,
        }
    }

    /// Carry a point from `S1` into `S2`.
    pub fn transform_point(&self, point: &Point3<S1>) -> Point3<S2> {
        InSpace::new(self.inner.transform_point(&point.inner))
    }

    /// Carry a vector (no translation) from `S1` into `S2`.
    pub fn transform_vector(&self, vector: &Vector3<S1>) -> Vector3<S2> {
        InSpace::new(self.inner.transform_vector(&vector.inner))
    }

    /// Compose `self: S1 -> S2` with `other: S2 -> S3` into a single `S1 -> S3` transform.
    pub fn then<S3: Space>(&self, other: &BetweenSpaces<S2, S3>) -> BetweenSpaces<S1, S3> {
        BetweenSpaces::new(other.inner * self.inner)
    }

    pub fn inverse(&self) -> BetweenSpaces<S2, S1> {
        BetweenSpaces::new(self.inner.inverse())
    }
}

impl<S1: Space, S2: Space> Clone for BetweenSpaces<S1, S2> {
    fn clone(&self) -> Self {
        Self::new(self.inner)
    }
}

impl<S1: Space, S2: Space> Copy for BetweenSpaces<S1, S2> {}

impl<S1: Space, S2: Space> fmt::Debug for BetweenSpaces<S1, S2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} ({} -> {})",
            self.inner,
            std::any::type_name::<S1>(),
            std::any::type_name::<S2>()
        )
    }
}
