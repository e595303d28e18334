//! Demo configuration with TOML file support.
//!
//! Every section uses `#[serde(default)]`, so a file only needs the values it
//! overrides:
//!
//! ```toml
//! [window]
//! width = 1280
//! height = 720
//!
//! [light]
//! radius = 12.0
//!
//! [keybindings]
//! ToggleBloom = "KeyB"
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::controls::Keybindings;
use crate::error::{Error, Result};
use crate::orbit_camera::{MAX_PHI, MIN_PHI, MIN_RADIUS};
use crate::shadow::PointShadow;
use crate::transform::ModelTransform;

/// Window title and initial size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Render 3D Mesh".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Initial placement of an orbiting camera or light. Angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub center: [f32; 3],
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        // Sits at (0, 10, 10) looking at the origin.
        Self {
            center: [0.0, 0.0, 0.0],
            radius: 200.0_f32.sqrt(),
            theta: 270.0,
            phi: 45.0,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl OrbitConfig {
    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }

    fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius < MIN_RADIUS {
            return Err(Error::invalid("camera orbit radius", self.radius));
        }
        if !(self.phi.is_finite() && self.theta.is_finite()) {
            return Err(Error::invalid("camera orbit angles", f32::NAN));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(Error::invalid("field of view", self.fov));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::invalid("clip planes", self.near));
        }
        if !(MIN_PHI..=MAX_PHI).contains(&self.phi) {
            log::warn!("camera phi {} will be clamped to [{MIN_PHI}, {MAX_PHI}]", self.phi);
        }
        Ok(())
    }
}

/// Initial placement of the point light. Angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub center: [f32; 3],
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, 0.0],
            radius: 20.0,
            theta: 0.0,
            phi: 45.0,
        }
    }
}

impl LightConfig {
    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }

    fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius < MIN_RADIUS {
            return Err(Error::invalid("light orbit radius", self.radius));
        }
        if !(self.phi.is_finite() && self.theta.is_finite()) {
            return Err(Error::invalid("light orbit angles", f32::NAN));
        }
        Ok(())
    }
}

/// Virtual trackball settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackballConfig {
    /// Sphere radius in pixels. Defaults to the window height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

/// Speeds for held keys and the scroll wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Orbit angle change per second of held key, in degrees.
    pub angle_speed: f32,
    /// Camera center translation per second, in world units.
    pub pan_speed: f32,
    /// Camera radius change per scroll line.
    pub zoom_speed: f32,
    /// Light radius change per second, in world units.
    pub light_radius_speed: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            angle_speed: 100.0,
            pan_speed: 5.0,
            zoom_speed: 1.0,
            light_radius_speed: 10.0,
        }
    }
}

/// Point-light shadow cube settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub near: f32,
    pub far: f32,
    pub resolution: u32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        let shadow = PointShadow::default();
        Self {
            near: shadow.near,
            far: shadow.far,
            resolution: shadow.resolution,
        }
    }
}

impl ShadowConfig {
    pub fn point_shadow(&self) -> PointShadow {
        PointShadow {
            near: self.near,
            far: self.far,
            resolution: self.resolution,
        }
    }
}

/// Initial state of the shading switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub toon: bool,
    pub outline: bool,
    pub bloom: bool,
    pub invisible: bool,
    /// Transparency applied while `invisible` is on.
    pub invisible_alpha: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            toon: false,
            outline: false,
            bloom: true,
            invisible: false,
            invisible_alpha: 0.85,
        }
    }
}

/// Placement of the model in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub translation: [f32; 3],
    /// Fit the model into a unit cube once its bounds are known.
    pub normalize: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, 0.0],
            normalize: true,
        }
    }
}

impl ModelConfig {
    pub fn transform(&self) -> ModelTransform {
        ModelTransform::from_translation(Vec3::from_array(self.translation))
            .normalize(self.normalize)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: OrbitConfig,
    pub light: LightConfig,
    pub trackball: TrackballConfig,
    pub model: ModelConfig,
    pub controls: ControlConfig,
    pub shadow: ShadowConfig,
    pub render: RenderConfig,
    pub keybindings: Keybindings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: OrbitConfig::default(),
            light: LightConfig::default(),
            trackball: TrackballConfig::default(),
            model: ModelConfig::default(),
            controls: ControlConfig::default(),
            shadow: ShadowConfig::default(),
            render: RenderConfig::default(),
            keybindings: Keybindings::default(),
        }
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn trackball_radius(mut self, radius: f32) -> Self {
        self.trackball.radius = Some(radius);
        self
    }

    /// Trackball radius in pixels, falling back to the window height.
    pub fn effective_trackball_radius(&self) -> f32 {
        self.trackball.radius.unwrap_or(self.window.height as f32)
    }

    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.keybindings.fill_defaults();
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        log::info!("saved config to {}", path.display());
        Ok(())
    }

    /// Reject values the scene cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 {
            return Err(Error::invalid("window width", 0.0));
        }
        if self.window.height == 0 {
            return Err(Error::invalid("window height", 0.0));
        }
        let radius = self.effective_trackball_radius();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid("trackball radius", radius));
        }
        self.camera.validate()?;
        self.light.validate()?;
        if !(MIN_PHI..=MAX_PHI).contains(&self.light.phi) {
            log::warn!("light phi {} will be clamped to [{MIN_PHI}, {MAX_PHI}]", self.light.phi);
        }
        if !(self.shadow.near > 0.0 && self.shadow.far > self.shadow.near) {
            return Err(Error::invalid("shadow clip planes", self.shadow.near));
        }
        if !Vec3::from_array(self.model.translation).is_finite() {
            return Err(Error::invalid("model translation", f32::NAN));
        }
        if !(0.0..=1.0).contains(&self.render.invisible_alpha) {
            return Err(Error::invalid("invisible alpha", self.render.invisible_alpha));
        }
        for (first, second) in self.keybindings.conflicts() {
            log::warn!("{first:?} and {second:?} share a key; both will fire");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::KeyAction;
    use approx::assert_relative_eq;
    use winit::keyboard::KeyCode;

    #[test]
    fn defaults_are_valid() {
        DemoConfig::default().validate().unwrap();
    }

    #[test]
    fn default_camera_sits_above_and_behind_origin() {
        let camera = OrbitConfig::default();
        let orbit =
            crate::OrbitCamera::new(camera.center(), camera.radius, camera.theta, camera.phi)
                .unwrap();
        assert_relative_eq!(orbit.position().x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(orbit.position().y, 10.0, epsilon = 1e-4);
        assert_relative_eq!(orbit.position().z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn trackball_radius_defaults_to_window_height() {
        let config = DemoConfig::new().size(1024, 768);
        assert_eq!(config.effective_trackball_radius(), 768.0);
        assert_eq!(config.trackball_radius(300.0).effective_trackball_radius(), 300.0);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = DemoConfig::from_toml_str(
            r#"
            [window]
            width = 1280

            [light]
            radius = 12.0

            [keybindings]
            ToggleBloom = "KeyB"
            "#,
        )
        .unwrap();

        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.light.radius, 12.0);
        assert_eq!(config.light.theta, 0.0);
        assert_eq!(config.light.phi, 45.0);
        assert_eq!(config.keybindings.key(KeyAction::ToggleBloom), Some(KeyCode::KeyB));
        assert_eq!(config.keybindings.key(KeyAction::Quit), Some(KeyCode::Escape));
    }

    #[test]
    fn model_section_sets_translation() {
        let config = DemoConfig::from_toml_str("[model]\ntranslation = [1.0, 0.0, -2.0]").unwrap();
        assert!(config.model.normalize);
        let origin = config.model.transform().matrix().transform_point3(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = DemoConfig::new().title("orbit").trackball_radius(250.0);
        let text = config.to_toml_string().unwrap();
        assert_eq!(DemoConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            DemoConfig::from_toml_str("[trackball]\nradius = -3.0"),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            DemoConfig::from_toml_str("[camera]\nradius = 0.05"),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            DemoConfig::from_toml_str("[shadow]\nnear = 10.0\nfar = 5.0"),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn rejects_malformed_toml_and_unknown_keys() {
        assert!(matches!(
            DemoConfig::from_toml_str("[window\nwidth = 3"),
            Err(Error::ConfigParse(_))
        ));
        assert!(matches!(
            DemoConfig::from_toml_str("[keybindings]\nQuit = \"NotAKey\""),
            Err(Error::ConfigParse(_))
        ));
    }
}
