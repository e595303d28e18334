//! Per-frame scene state: the viewer, the light, the model and the switches
//! that the keyboard and mouse drive.

use glam::Vec3;
use winit::event::MouseButton;

use crate::config::{ControlConfig, DemoConfig, RenderConfig};
use crate::controls::{KeyAction, Keybindings};
use crate::error::{Error, Result};
use crate::input::Input;
use crate::orbit_camera::OrbitCamera;
use crate::shadow::PointShadow;
use crate::trackball::Trackball;
use crate::transform::ModelTransform;
use crate::uniforms::{CameraUniforms, ModelUniforms, PointShadowUniforms};

/// Shading switches flipped from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderToggles {
    /// Cel shading instead of Blinn-Phong.
    pub toon: bool,
    /// Stencil outline around the model.
    pub outline: bool,
    pub bloom: bool,
    pub invisible: bool,
    /// Transparency applied while `invisible` is on.
    pub invisible_alpha: f32,
}

impl Default for RenderToggles {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl RenderToggles {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            toon: config.toon,
            outline: config.outline,
            bloom: config.bloom,
            invisible: config.invisible,
            invisible_alpha: config.invisible_alpha,
        }
    }

    /// Model transparency to hand to the shader.
    pub fn invisible_amount(&self) -> f32 {
        if self.invisible {
            self.invisible_alpha
        } else {
            0.0
        }
    }

    /// Flip the switch behind `action`. Returns its name and new state, or
    /// `None` if `action` is not a toggle.
    pub fn toggle(&mut self, action: KeyAction) -> Option<(&'static str, bool)> {
        let (name, flag) = match action {
            KeyAction::ToggleToon => ("toon", &mut self.toon),
            KeyAction::ToggleOutline => ("outline", &mut self.outline),
            KeyAction::ToggleBloom => ("bloom", &mut self.bloom),
            KeyAction::ToggleInvisible => ("invisible", &mut self.invisible),
            _ => return None,
        };
        *flag = !*flag;
        Some((name, *flag))
    }
}

/// What one call to [`SceneState::update`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// The quit action fired.
    pub quit: bool,
    /// Some camera, light, model or toggle state changed.
    pub changed: bool,
}

/// Progress of a left-button drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drag {
    Idle,
    /// Button held but no cursor position seen yet.
    Pending,
    Active,
}

/// Everything the renderer uploads for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
    pub camera: CameraUniforms,
    pub model: ModelUniforms,
    pub shadow: PointShadowUniforms,
}

/// Owns the viewer, the light, the trackball and the model.
///
/// The host builds one from a [`DemoConfig`], feeds it an [`Input`] every
/// frame through [`update`](Self::update), and reads matrices back with
/// [`uniforms`](Self::uniforms).
#[derive(Debug, Clone)]
pub struct SceneState {
    camera: OrbitCamera,
    light: OrbitCamera,
    trackball: Trackball,
    model: ModelTransform,
    toggles: RenderToggles,
    shadow: PointShadow,
    controls: ControlConfig,
    keybindings: Keybindings,
    viewport: (u32, u32),
    drag: Drag,
}

impl SceneState {
    pub fn from_config(config: &DemoConfig) -> Result<Self> {
        config.validate()?;

        let orbit = &config.camera;
        let camera = OrbitCamera::new(orbit.center(), orbit.radius, orbit.theta, orbit.phi)?
            .fov(orbit.fov)
            .clip_planes(orbit.near, orbit.far);
        let light = OrbitCamera::new(
            config.light.center(),
            config.light.radius,
            config.light.theta,
            config.light.phi,
        )?;
        let trackball = Trackball::for_camera(config.effective_trackball_radius(), &camera)?;

        log::info!(
            "scene ready: camera at {:?}, light at {:?}, trackball radius {}",
            camera.position(),
            light.position(),
            trackball.radius()
        );

        Ok(Self {
            camera,
            light,
            trackball,
            model: config.model.transform(),
            toggles: RenderToggles::from_config(&config.render),
            shadow: config.shadow.point_shadow(),
            controls: config.controls.clone(),
            keybindings: config.keybindings.clone(),
            viewport: (config.window.width, config.window.height),
            drag: Drag::Idle,
        })
    }

    /// Apply one frame of input. `dt` is the frame time in seconds.
    pub fn update(&mut self, input: &Input, dt: f32) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        for action in KeyAction::ALL {
            let Some(key) = self.keybindings.key(action) else {
                continue;
            };
            if action.is_continuous() {
                if input.key_down(key) {
                    outcome.changed |= self.apply_continuous(action, dt);
                }
            } else if input.key_pressed(key) {
                self.apply_one_shot(action, &mut outcome);
            }
        }

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            self.camera.update_radius(-scroll * self.controls.zoom_speed);
            outcome.changed = true;
        }

        outcome.changed |= self.drive_trackball(input);
        outcome
    }

    fn apply_continuous(&mut self, action: KeyAction, dt: f32) -> bool {
        let angle = self.controls.angle_speed * dt;
        let pan = self.controls.pan_speed * dt;
        let reach = self.controls.light_radius_speed * dt;
        let forward = self.pan_forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        match action {
            KeyAction::CameraOrbitUp => self.camera.update_phi(angle),
            KeyAction::CameraOrbitDown => self.camera.update_phi(-angle),
            KeyAction::CameraOrbitLeft => self.camera.update_theta(-angle),
            KeyAction::CameraOrbitRight => self.camera.update_theta(angle),
            KeyAction::CameraPanForward => self.camera.update_center(forward * pan),
            KeyAction::CameraPanBack => self.camera.update_center(-forward * pan),
            KeyAction::CameraPanLeft => self.camera.update_center(-right * pan),
            KeyAction::CameraPanRight => self.camera.update_center(right * pan),
            KeyAction::LightUp => self.light.update_phi(angle),
            KeyAction::LightDown => self.light.update_phi(-angle),
            KeyAction::LightLeft => self.light.update_theta(-angle),
            KeyAction::LightRight => self.light.update_theta(angle),
            KeyAction::LightCloser => self.light.update_radius(-reach),
            KeyAction::LightFarther => self.light.update_radius(reach),
            _ => return false,
        }
        true
    }

    fn apply_one_shot(&mut self, action: KeyAction, outcome: &mut FrameOutcome) {
        match action {
            KeyAction::ResetModel => {
                self.model.reset_rotation();
                log::info!("model rotation reset");
                outcome.changed = true;
            }
            KeyAction::Quit => {
                log::info!("quit requested");
                outcome.quit = true;
            }
            _ => {
                if let Some((name, on)) = self.toggles.toggle(action) {
                    log::info!("{name} {}", if on { "on" } else { "off" });
                    outcome.changed = true;
                }
            }
        }
    }

    /// Camera front flattened onto the ground plane.
    fn pan_forward(&self) -> Vec3 {
        let front = self.camera.front();
        Vec3::new(front.x, 0.0, front.z).normalize_or_zero()
    }

    fn drive_trackball(&mut self, input: &Input) -> bool {
        if input.mouse_pressed(MouseButton::Left) {
            self.drag = Drag::Pending;
        }
        if !input.mouse_down(MouseButton::Left) {
            self.drag = Drag::Idle;
            return false;
        }
        if self.drag == Drag::Idle {
            return false;
        }
        // A press can arrive before the first cursor event; anchor once one does.
        let Some(cursor) = input.cursor_position() else {
            return false;
        };

        if self.drag == Drag::Pending {
            self.trackball.sync(&self.camera);
            self.trackball.begin_drag(cursor.x, cursor.y);
            self.drag = Drag::Active;
            return false;
        }

        if self.trackball.sync(&self.camera) {
            // The camera turned mid-drag; restart from here in the new basis.
            self.trackball.begin_drag(cursor.x, cursor.y);
            return false;
        }

        let rotation = self.trackball.compute_rotation(cursor.x, cursor.y);
        if rotation.is_identity() {
            return false;
        }
        log::trace!("model rotated {:.4} rad about {:?}", rotation.angle, rotation.axis);
        self.model.apply_rotation(rotation);
        true
    }

    /// Track a new framebuffer size. Zero-sized (minimized) windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        log::debug!("viewport resized to {width}x{height}");
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }

    /// Uniform blocks for the current state.
    pub fn uniforms(&self, time: f32) -> FrameUniforms {
        FrameUniforms {
            camera: CameraUniforms::new(&self.camera.camera(), self.aspect(), time),
            model: ModelUniforms::new(&self.model, &self.toggles),
            shadow: PointShadowUniforms::new(&self.shadow, self.light.position()),
        }
    }

    /// Short summary suitable for a window title.
    pub fn status_line(&self) -> String {
        let flag = |on: bool| if on { "on" } else { "off" };
        format!(
            "camera θ {:.0}° φ {:.0}° r {:.1} | light θ {:.0}° φ {:.0}° r {:.1} | \
             toon {} outline {} bloom {} invisible {}",
            self.camera.theta(),
            self.camera.phi(),
            self.camera.radius(),
            self.light.theta(),
            self.light.phi(),
            self.light.radius(),
            flag(self.toggles.toon),
            flag(self.toggles.outline),
            flag(self.toggles.bloom),
            flag(self.toggles.invisible),
        )
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn light(&self) -> &OrbitCamera {
        &self.light
    }

    pub fn trackball(&self) -> &Trackball {
        &self.trackball
    }

    pub fn model(&self) -> &ModelTransform {
        &self.model
    }

    pub fn toggles(&self) -> &RenderToggles {
        &self.toggles
    }

    /// A left-button drag is in progress (possibly still waiting for a
    /// cursor position to anchor on).
    pub fn is_dragging(&self) -> bool {
        self.drag != Drag::Idle
    }
}

impl TryFrom<&DemoConfig> for SceneState {
    type Error = Error;

    fn try_from(config: &DemoConfig) -> Result<Self> {
        Self::from_config(config)
    }
}
