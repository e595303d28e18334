//! Virtual trackball: 2D pointer drags become 3D rotations.
//!
//! The pointer position relative to where the drag started is lifted onto a
//! sphere of `radius` pixels facing the camera. Each call to
//! [`Trackball::compute_rotation`] returns the rotation that carries the
//! previous sphere point onto the new one, expressed in world space through
//! the camera's `right`/`up`/`front` basis. Points outside the sphere's disk
//! are projected onto its silhouette (the equator facing the camera).
//!
//! Rotations are incremental: compose each one on the left of the model's
//! current rotation, e.g. with
//! [`ModelTransform::apply_rotation`](crate::ModelTransform::apply_rotation).
//!
//! ```
//! use sphereview::{Trackball, Vec3};
//!
//! let mut trackball = Trackball::new(300.0, Vec3::NEG_Z, Vec3::Y).unwrap();
//! trackball.begin_drag(400.0, 300.0);
//! let rotation = trackball.compute_rotation(500.0, 300.0);
//! assert!(rotation.angle > 0.0);
//! assert!(rotation.axis.y > 0.99);
//! ```

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::error::{Error, Result};
use crate::orbit_camera::{OrbitCamera, OrientationVersion};

/// Minimum distance between successive sphere points for a rotation to be
/// produced.
pub const DEAD_ZONE: f32 = 0.01;

/// An incremental rotation about a unit axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    pub axis: Vec3,
    /// Radians.
    pub angle: f32,
}

impl Rotation {
    /// No motion. The axis is arbitrary but unit length so consumers can
    /// build a matrix from it without special-casing.
    pub const IDENTITY: Self = Self {
        axis: Vec3::Z,
        angle: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        self.angle == 0.0
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle)
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_axis_angle(self.axis, self.angle)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Maps pointer motion onto rotations of a sphere facing the camera.
#[derive(Clone, Debug)]
pub struct Trackball {
    radius: f32,
    /// Screen point where the current drag started.
    reference: Vec2,
    /// Last sphere point, world space, unit length.
    current: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    synced: Option<OrientationVersion>,
}

impl Trackball {
    /// Create a trackball of `radius` pixels for a camera looking along
    /// `front` with `up` as its up vector.
    ///
    /// A non-positive or non-finite radius is rejected.
    pub fn new(radius: f32, front: Vec3, up: Vec3) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid("trackball radius", radius));
        }
        let mut trackball = Self {
            radius,
            reference: Vec2::ZERO,
            current: Vec3::Z,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            synced: None,
        };
        trackball.refresh_basis(front, up);
        Ok(trackball)
    }

    /// Create a trackball already aligned with `camera`.
    pub fn for_camera(radius: f32, camera: &OrbitCamera) -> Result<Self> {
        let mut trackball = Self::new(radius, camera.front(), camera.up())?;
        trackball.synced = Some(camera.version());
        Ok(trackball)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Last point on the sphere, in world space.
    pub fn current_vector(&self) -> Vec3 {
        self.current
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Start a drag at the given screen point.
    ///
    /// Discards whatever the previous drag left behind: the sphere point goes
    /// back to the one facing the camera.
    pub fn begin_drag(&mut self, screen_x: f32, screen_y: f32) {
        self.reference = Vec2::new(screen_x, screen_y);
        self.current = -self.front;
        log::trace!("trackball drag started at ({screen_x}, {screen_y})");
    }

    /// Adopt a new camera basis. Must be called whenever the camera turns,
    /// or the next rotation is computed in the old frame.
    pub fn refresh_basis(&mut self, front: Vec3, up: Vec3) {
        self.front = front.normalize_or(Vec3::NEG_Z);
        self.up = up.normalize_or(Vec3::Y);
        self.right = self.front.cross(self.up).normalize_or(Vec3::X);
        self.current = -self.front;
    }

    /// Pull the basis from `camera` if it has turned since the last sync.
    ///
    /// Returns `true` when the basis was refreshed.
    pub fn sync(&mut self, camera: &OrbitCamera) -> bool {
        let version = camera.version();
        if self.synced == Some(version) {
            return false;
        }
        self.refresh_basis(camera.front(), camera.up());
        self.synced = Some(version);
        log::debug!("trackball basis refreshed from camera ({version:?})");
        true
    }

    /// Rotation from the previous sphere point to the one under
    /// `(screen_x, screen_y)`.
    ///
    /// Returns [`Rotation::IDENTITY`] while the pointer stays within the dead
    /// zone, in which case the previous point is kept so slow drags still
    /// accumulate.
    pub fn compute_rotation(&mut self, screen_x: f32, screen_y: f32) -> Rotation {
        let dx = screen_x - self.reference.x;
        // Screen Y grows downward, sphere Y grows upward.
        let dy = -(screen_y - self.reference.y);

        let r2 = self.radius * self.radius;
        let d2 = dx * dx + dy * dy;

        let local = if d2 >= r2 {
            Vec3::new(dx, dy, 0.0).normalize()
        } else {
            // Front hemisphere only.
            let dz = (r2 - d2).sqrt();
            Vec3::new(dx, dy, dz).normalize()
        };
        let next = (local.x * self.right + local.y * self.up - local.z * self.front).normalize();

        if (next - self.current).length() < DEAD_ZONE {
            return Rotation::IDENTITY;
        }

        let axis = self.current.cross(next);
        if axis.length_squared() < f32::EPSILON * f32::EPSILON {
            // Antipodal points: no unique axis.
            return Rotation::IDENTITY;
        }

        let angle = self.current.dot(next).clamp(-1.0, 1.0).acos();
        self.current = next;
        Rotation {
            axis: axis.normalize(),
            angle,
        }
    }
}
