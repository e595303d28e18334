//! Model placement driven by trackball rotations.
//!
//! [`ModelTransform`] keeps an orientation that accumulates incremental
//! [`Rotation`]s by pre-multiplication, a world translation, and optionally
//! the model's bounding box so arbitrarily sized meshes can be re-centered and
//! scaled to fit a unit cube before being rotated.
//!
//! # Matrix order
//!
//! ```text
//! model = T(translation) * R * S(1 / max_extent) * T(-bounds_center)
//! ```
//!
//! The bounds terms are dropped when normalization is off or no bounds are
//! known. Rotation always happens about the (re-centered) model origin.
//!
//! ```
//! use sphereview::{Bounds, ModelTransform, Rotation, Vec3};
//!
//! let bounds = Bounds::from_points([Vec3::new(2.0, 2.0, 2.0), Vec3::new(6.0, 4.0, 3.0)]).unwrap();
//! let mut model = ModelTransform::new().with_bounds(bounds);
//! model.apply_rotation(Rotation { axis: Vec3::Y, angle: 0.5 });
//!
//! let center = model.matrix().transform_point3(bounds.center());
//! assert!(center.length() < 1e-5);
//! ```

use glam::{Mat4, Quat, Vec3};

use crate::trackball::Rotation;

/// Axis-aligned bounding box in model space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_extent(&self) -> f32 {
        self.extent().max_element()
    }
}

/// Orientation, position and optional unit-cube fit of one model.
#[derive(Clone, Copy, Debug)]
pub struct ModelTransform {
    rotation: Quat,
    translation: Vec3,
    bounds: Option<Bounds>,
    normalize: bool,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation: Vec3::ZERO,
            bounds: None,
            normalize: true,
        }
    }
}

impl ModelTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Record the model-space bounds used for unit-cube normalization.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Turn unit-cube normalization on or off (on by default; only has an
    /// effect once bounds are known).
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Compose `rotation` on the left of the current orientation, so it acts
    /// about world axes.
    pub fn apply_rotation(&mut self, rotation: Rotation) {
        if rotation.is_identity() {
            return;
        }
        self.rotation = (rotation.to_quat() * self.rotation).normalize();
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = Quat::IDENTITY;
    }

    /// Re-centering and scaling applied before rotation.
    fn fit(&self) -> Mat4 {
        match self.bounds {
            Some(bounds) if self.normalize && bounds.max_extent() > 0.0 => {
                Mat4::from_scale(Vec3::splat(1.0 / bounds.max_extent()))
                    * Mat4::from_translation(-bounds.center())
            }
            _ => Mat4::IDENTITY,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation) * self.fit()
    }

    /// Inverse transpose of [`matrix`](Self::matrix), for transforming normals.
    pub fn normal_matrix(&self) -> Mat4 {
        self.matrix().inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn quarter(axis: Vec3) -> Rotation {
        Rotation { axis, angle: FRAC_PI_2 }
    }

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn bounds_from_points() {
        let bounds = Bounds::from_points([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-1.0, -1.0, -1.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.max_extent(), 4.0);
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn bounds_new_orders_corners() {
        let bounds = Bounds::new(Vec3::new(1.0, -1.0, 5.0), Vec3::new(-1.0, 1.0, 2.0));
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, 2.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn rotations_compose_in_world_space() {
        let mut model = ModelTransform::new();
        model.apply_rotation(quarter(Vec3::Y));
        model.apply_rotation(quarter(Vec3::X));

        // Y first, then X about the world X axis: +X -> -Z -> +Y.
        let moved = model.matrix().transform_vector3(Vec3::X);
        assert_vec_eq(moved, Vec3::Y);
    }

    #[test]
    fn identity_rotation_is_a_no_op() {
        let mut model = ModelTransform::new();
        model.apply_rotation(quarter(Vec3::Z));
        let before = model.rotation();
        model.apply_rotation(Rotation::IDENTITY);
        assert_eq!(model.rotation(), before);
    }

    #[test]
    fn many_small_rotations_stay_normalized() {
        let mut model = ModelTransform::new();
        let axis = Vec3::new(1.0, 1.0, 0.0).normalize();
        for _ in 0..10_000 {
            model.apply_rotation(Rotation { axis, angle: 0.013 });
        }
        assert_relative_eq!(model.rotation().length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn normalization_fits_unit_cube() {
        let bounds = Bounds::new(Vec3::new(10.0, 0.0, -4.0), Vec3::new(14.0, 2.0, 0.0));
        let model = ModelTransform::new().with_bounds(bounds);
        let matrix = model.matrix();

        assert_vec_eq(matrix.transform_point3(bounds.center()), Vec3::ZERO);
        assert_vec_eq(matrix.transform_point3(bounds.min), Vec3::new(-0.5, -0.25, -0.5));
        assert_vec_eq(matrix.transform_point3(bounds.max), Vec3::new(0.5, 0.25, 0.5));
    }

    #[test]
    fn normalization_can_be_disabled() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::splat(8.0));
        let model = ModelTransform::new().with_bounds(bounds).normalize(false);
        assert_eq!(model.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn flat_bounds_do_not_divide_by_zero() {
        let bounds = Bounds::new(Vec3::ONE, Vec3::ONE);
        let model = ModelTransform::new().with_bounds(bounds);
        assert!(model.matrix().is_finite());
    }

    #[test]
    fn translation_applies_after_rotation() {
        let mut model = ModelTransform::from_translation(Vec3::new(1.0, 0.0, -5.0));
        model.apply_rotation(quarter(Vec3::Y));
        let p = model.matrix().transform_point3(Vec3::X);
        assert_vec_eq(p, Vec3::new(1.0, 0.0, -6.0));
    }

    #[test]
    fn reset_rotation_restores_identity() {
        let mut model = ModelTransform::new();
        model.apply_rotation(quarter(Vec3::Z));
        model.reset_rotation();
        assert_eq!(model.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_scale() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::new(4.0, 1.0, 1.0));
        let mut model = ModelTransform::new().with_bounds(bounds);
        model.apply_rotation(quarter(Vec3::Z));
        let normal = model.normal_matrix().transform_vector3(Vec3::Y).normalize();
        let tangent = model.matrix().transform_vector3(Vec3::X);
        assert_relative_eq!(normal.dot(tangent), 0.0, epsilon = 1e-5);
    }
}
