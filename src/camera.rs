use glam::{Mat4, Vec3};

/// A snapshot of where a camera is and how it projects.
///
/// Produced by [`OrbitCamera::camera`](crate::OrbitCamera::camera) and consumed
/// by whatever builds the per-frame uniforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    pub up: Vec3,
    pub fov: f32, // radians
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: impl Into<Vec3>) -> Self {
        self.position = position.into();
        self
    }

    pub fn looking_at(mut self, target: impl Into<Vec3>) -> Self {
        self.forward = (target.into() - self.position).normalize_or(Vec3::NEG_Z);
        self
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    /// Compute the right vector from forward and up.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize_or_zero()
    }

    /// World-to-view transform. `forward` is a direction, so the look-at
    /// target is `position + forward`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn looking_at_normalizes_forward() {
        let camera = Camera::new().at(Vec3::new(0.0, 0.0, 10.0)).looking_at(Vec3::ZERO);
        assert_relative_eq!(camera.forward.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.forward.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn right_is_perpendicular_to_forward_and_up() {
        let camera = Camera {
            forward: Vec3::new(1.0, -1.0, 0.0).normalize(),
            ..Camera::default()
        };
        let right = camera.right();
        assert_relative_eq!(right.dot(camera.forward), 0.0, epsilon = 1e-6);
        assert_relative_eq!(right.dot(camera.up), 0.0, epsilon = 1e-6);
        assert_relative_eq!(right.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = Camera::new().at(Vec3::new(3.0, 2.0, 1.0));
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert_relative_eq!(eye.length(), 0.0, epsilon = 1e-5);
    }
}
