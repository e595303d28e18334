//! # Sphereview
//!
//! **Orbit a camera and a light around a model, and spin the model with a
//! virtual trackball.**
//!
//! The two building blocks are leaves with no rendering state:
//!
//! - [`OrbitCamera`] places a camera (or a light) on a sphere around a focus
//!   point from an azimuth, an elevation and a radius.
//! - [`Trackball`] turns a pointer drag into an incremental rotation about an
//!   axis expressed in world space.
//!
//! [`SceneState`] wires them to keyboard and mouse input and produces
//! GPU-ready uniform blocks every frame.
//!
//! ## Quick Start
//!
//! ```
//! use sphereview::*;
//!
//! let camera = OrbitCamera::new(Vec3::ZERO, 10.0, 270.0, 45.0).unwrap();
//! let mut trackball = Trackball::for_camera(300.0, &camera).unwrap();
//! let mut model = ModelTransform::new();
//!
//! trackball.begin_drag(400.0, 300.0);
//! model.apply_rotation(trackball.compute_rotation(450.0, 280.0));
//!
//! let mvp = camera.projection_matrix(4.0 / 3.0) * camera.view_matrix() * model.matrix();
//! assert!(mvp.is_finite());
//! ```
//!
//! The `sphereview` binary opens a window and drives a [`SceneState`] from a
//! [`DemoConfig`]; see [`run`].

mod app;
mod camera;
pub mod config;
mod controls;
mod error;
mod input;
mod orbit_camera;
mod scene;
mod shadow;
mod trackball;
mod transform;
pub mod uniforms;

pub use app::run;
pub use camera::Camera;
pub use config::DemoConfig;
pub use controls::{KeyAction, Keybindings};
pub use error::{Error, Result};
pub use input::Input;
pub use orbit_camera::{MAX_PHI, MIN_PHI, MIN_RADIUS, OrbitCamera, OrientationVersion};
pub use scene::{FrameOutcome, FrameUniforms, RenderToggles, SceneState};
pub use shadow::{CUBE_FACES, PointShadow};
pub use trackball::{DEAD_ZONE, Rotation, Trackball};
pub use transform::{Bounds, ModelTransform};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};

// Re-export commonly used winit types for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
