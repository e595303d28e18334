//! A camera that lives on a sphere around a focus point.
//!
//! [`OrbitCamera`] is parameterized by an azimuth `theta` and an elevation
//! `phi` (both in degrees) plus a radius. It always faces its center. The same
//! type drives the viewer and the point light: anything that needs a position
//! that circles a target can use it.
//!
//! # Conventions
//!
//! Right-handed, Y-up world:
//!
//! ```text
//! position = center + radius * (cos(phi)cos(theta), sin(phi), -cos(phi)sin(theta))
//! ```
//!
//! `phi` is clamped to `[10, 88]` so the camera never reaches a pole, and
//! `theta` wraps at the ends of `[0, 360]`.
//!
//! Derived vectors are recomputed eagerly by every mutator, so readers never
//! observe stale state. Whenever a mutation changes `front` or `up`, the
//! camera's [`OrientationVersion`] is bumped; a
//! [`Trackball`](crate::Trackball) compares versions to know when its basis
//! is stale.
//!
//! # Example
//!
//! ```
//! use sphereview::{OrbitCamera, Vec3};
//!
//! let mut light = OrbitCamera::new(Vec3::ZERO, 20.0, 0.0, 45.0).unwrap();
//! light.update_theta(90.0);
//! assert!(((light.position() - light.center()).length() - 20.0).abs() < 1e-4);
//! ```

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::error::{Error, Result};

/// Smallest orbit radius reachable through [`OrbitCamera::update_radius`].
pub const MIN_RADIUS: f32 = 0.1;
/// Lower elevation clamp, in degrees.
pub const MIN_PHI: f32 = 10.0;
/// Upper elevation clamp, in degrees.
pub const MAX_PHI: f32 = 88.0;

/// Monotonic counter identifying one orientation of an [`OrbitCamera`].
///
/// Two equal versions taken from the same camera mean its `front` and `up`
/// have not changed in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrientationVersion(u64);

impl OrientationVersion {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A camera orbiting `center` at distance `radius`.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    center: Vec3,
    radius: f32,
    /// Azimuth in degrees.
    theta: f32,
    /// Elevation in degrees.
    phi: f32,

    // Derived, refreshed by `update_all`.
    position: Vec3,
    front: Vec3,
    up: Vec3,
    version: OrientationVersion,

    /// Vertical field of view in degrees.
    fov: f32,
    near: f32,
    far: f32,
}

impl OrbitCamera {
    /// Create an orbit around `center`.
    ///
    /// `theta` is wrapped into `[0, 360)` and `phi` clamped into
    /// `[MIN_PHI, MAX_PHI]`. A radius below [`MIN_RADIUS`] (or any non-finite
    /// input) is a setup error.
    pub fn new(center: Vec3, radius: f32, theta: f32, phi: f32) -> Result<Self> {
        if !radius.is_finite() || radius < MIN_RADIUS {
            return Err(Error::invalid("orbit radius", radius));
        }
        if !theta.is_finite() {
            return Err(Error::invalid("orbit theta", theta));
        }
        if !phi.is_finite() {
            return Err(Error::invalid("orbit phi", phi));
        }
        if !center.is_finite() {
            return Err(Error::invalid("orbit center", f32::NAN));
        }

        let mut camera = Self {
            center,
            radius,
            theta: theta.rem_euclid(360.0),
            phi: phi.clamp(MIN_PHI, MAX_PHI),
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            version: OrientationVersion::default(),
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        };
        camera.update_all();
        Ok(camera)
    }

    /// Set the vertical field of view in degrees.
    pub fn fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees;
        self
    }

    /// Set near and far clipping planes.
    pub fn clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Move the focus point. Orientation is unaffected.
    pub fn update_center(&mut self, delta: Vec3) {
        self.center += delta;
        self.update_all();
    }

    /// Grow or shrink the orbit, never below [`MIN_RADIUS`].
    pub fn update_radius(&mut self, delta: f32) {
        self.radius = (self.radius + delta).max(MIN_RADIUS);
        self.update_all();
    }

    /// Rotate around the vertical axis by `delta` degrees.
    ///
    /// Overflow past 360 snaps to 0 and underflow below 0 snaps to 360.
    pub fn update_theta(&mut self, delta: f32) {
        self.theta += delta;
        if self.theta > 360.0 {
            self.theta = 0.0;
        }
        if self.theta < 0.0 {
            self.theta = 360.0;
        }
        self.update_all();
    }

    /// Raise or lower the elevation by `delta` degrees, clamped to `[10, 88]`.
    pub fn update_phi(&mut self, delta: f32) {
        self.phi = (self.phi + delta).clamp(MIN_PHI, MAX_PHI);
        self.update_all();
    }

    fn update_all(&mut self) {
        let (sin_phi, cos_phi) = self.phi.to_radians().sin_cos();
        let (sin_theta, cos_theta) = self.theta.to_radians().sin_cos();

        let horizontal = Vec3::new(cos_theta, 0.0, -sin_theta);
        let outward = cos_phi * horizontal + sin_phi * Vec3::Y;
        self.position = self.center + self.radius * outward;

        // Both directions are built on the unit sphere so that moving the
        // center or changing the radius leaves them bit-for-bit unchanged.
        let front = (-outward).normalize_or(Vec3::NEG_Z);

        // Extending the horizontal ray to length 1/cos(phi) lands where the
        // tangent line at `outward` meets the ground plane; the direction from
        // there back to `outward` lies in the vertical great circle and is
        // orthogonal to `front`.
        let extend_point = horizontal / cos_phi;
        let mut up = (outward - extend_point).normalize_or(Vec3::Y);
        if self.phi < 0.0 {
            up = -up;
        }

        if front != self.front || up != self.up {
            self.version = self.version.next();
        }
        self.front = front;
        self.up = up;
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Azimuth in degrees.
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Elevation in degrees.
    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit vector from the camera toward its center.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize_or(Vec3::X)
    }

    /// Changes every time `front` or `up` changes.
    pub fn version(&self) -> OrientationVersion {
        self.version
    }

    /// Look-at transform from `position` toward `position + front`.
    ///
    /// Since `front` points at the center this is the same as looking at
    /// `center` directly.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// Get the current camera state.
    pub fn camera(&self) -> Camera {
        Camera {
            position: self.position,
            forward: self.front,
            up: self.up,
            fov: self.fov.to_radians(),
            near: self.near,
            far: self.far,
        }
    }
}
