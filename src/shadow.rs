//! Omnidirectional shadow transforms for a point light.
//!
//! A point light renders scene depth into the six faces of a cube map. Each
//! face needs its own view-projection: a 90° square frustum looking along one
//! axis from the light. The face order and up vectors follow the usual
//! cube-map convention (+X, -X, +Y, -Y, +Z, -Z).

use glam::{Mat4, Vec3};

/// Look direction and up vector of each cube-map face, in face order.
pub const CUBE_FACES: [(Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Y),
    (Vec3::NEG_X, Vec3::NEG_Y),
    (Vec3::Y, Vec3::Z),
    (Vec3::NEG_Y, Vec3::NEG_Z),
    (Vec3::Z, Vec3::NEG_Y),
    (Vec3::NEG_Z, Vec3::NEG_Y),
];

/// Depth-cube parameters for a point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointShadow {
    pub near: f32,
    pub far: f32,
    /// Edge length of each cube face, in texels.
    pub resolution: u32,
}

impl Default for PointShadow {
    fn default() -> Self {
        Self {
            near: 1.0,
            far: 250.0,
            resolution: 1024,
        }
    }
}

impl PointShadow {
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(90.0_f32.to_radians(), 1.0, self.near, self.far)
    }

    /// View-projection for every cube face as seen from `light_pos`.
    pub fn face_transforms(&self, light_pos: Vec3) -> [Mat4; 6] {
        let projection = self.projection();
        CUBE_FACES.map(|(direction, up)| {
            projection * Mat4::look_at_rh(light_pos, light_pos + direction, up)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn each_face_centres_its_axis() {
        let shadow = PointShadow::default();
        let light = Vec3::new(3.0, 10.0, -2.0);
        for (matrix, (direction, _)) in shadow.face_transforms(light).iter().zip(CUBE_FACES) {
            let ndc = matrix.project_point3(light + direction * 10.0);
            assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
            assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
            assert!(ndc.z > 0.0 && ndc.z < 1.0);
        }
    }

    #[test]
    fn faces_cover_a_quarter_turn_each() {
        let shadow = PointShadow::default();
        let faces = shadow.face_transforms(Vec3::ZERO);
        // A point at 45 degrees off the +X axis sits on the face edge.
        let edge = faces[0].project_point3(Vec3::new(5.0, 5.0, 0.0));
        assert_relative_eq!(edge.y.abs(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn points_behind_the_far_plane_are_clipped() {
        let shadow = PointShadow {
            far: 20.0,
            ..PointShadow::default()
        };
        let faces = shadow.face_transforms(Vec3::ZERO);
        let beyond = faces[4].project_point3(Vec3::new(0.0, 0.0, 30.0));
        assert!(beyond.z > 1.0);
    }
}
