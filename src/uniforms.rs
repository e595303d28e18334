//! GPU-ready uniform blocks.
//!
//! Plain `#[repr(C)]` structs the renderer can upload as-is with
//! `bytemuck::cast_slice`. Matrices are column-major, matching WGSL and GLSL
//! `mat4x4<f32>`. Every block is a multiple of 16 bytes so it can sit in a
//! uniform buffer without extra padding.

use glam::Vec3;

use crate::camera::Camera;
use crate::scene::RenderToggles;
use crate::shadow::PointShadow;
use crate::transform::ModelTransform;

/// Camera uniforms shared by every pass that draws the scene.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// Eye position in world space, for specular terms.
    pub camera_pos: [f32; 3],
    /// Elapsed time in seconds.
    pub time: f32,
}

impl CameraUniforms {
    pub fn new(camera: &Camera, aspect: f32, time: f32) -> Self {
        let view = camera.view_matrix();
        let proj = camera.projection_matrix(aspect);
        Self {
            view_proj: (proj * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            time,
        }
    }
}

/// Per-model uniforms, including the shading switches.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`.
    pub normal_matrix: [[f32; 4]; 4],
    /// Transparency of the model (0 = opaque).
    pub invisible: f32,
    /// Non-zero selects cel shading over Blinn-Phong.
    pub toon: u32,
    /// Non-zero draws the stencil outline.
    pub outline: u32,
    /// Non-zero enables the bloom blur.
    pub bloom: u32,
}

impl ModelUniforms {
    pub fn new(transform: &ModelTransform, toggles: &RenderToggles) -> Self {
        Self {
            model: transform.matrix().to_cols_array_2d(),
            normal_matrix: transform.normal_matrix().to_cols_array_2d(),
            invisible: toggles.invisible_amount(),
            toon: toggles.toon as u32,
            outline: toggles.outline as u32,
            bloom: toggles.bloom as u32,
        }
    }
}

/// Inputs for the depth-cube pass of a point light.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointShadowUniforms {
    pub face_view_proj: [[[f32; 4]; 4]; 6],
    pub light_pos: [f32; 3],
    /// Distance used to linearize stored depth.
    pub far_plane: f32,
}

impl PointShadowUniforms {
    pub fn new(shadow: &PointShadow, light_pos: Vec3) -> Self {
        Self {
            face_view_proj: shadow.face_transforms(light_pos).map(|m| m.to_cols_array_2d()),
            light_pos: light_pos.to_array(),
            far_plane: shadow.far,
        }
    }
}
