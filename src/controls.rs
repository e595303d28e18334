//! Keyboard actions and their bindings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Everything the keyboard can do to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    CameraOrbitUp,
    CameraOrbitDown,
    CameraOrbitLeft,
    CameraOrbitRight,
    CameraPanForward,
    CameraPanBack,
    CameraPanLeft,
    CameraPanRight,
    LightUp,
    LightDown,
    LightLeft,
    LightRight,
    LightCloser,
    LightFarther,
    ToggleToon,
    ToggleOutline,
    ToggleBloom,
    ToggleInvisible,
    ResetModel,
    Quit,
}

impl KeyAction {
    pub const ALL: [KeyAction; 20] = [
        Self::CameraOrbitUp,
        Self::CameraOrbitDown,
        Self::CameraOrbitLeft,
        Self::CameraOrbitRight,
        Self::CameraPanForward,
        Self::CameraPanBack,
        Self::CameraPanLeft,
        Self::CameraPanRight,
        Self::LightUp,
        Self::LightDown,
        Self::LightLeft,
        Self::LightRight,
        Self::LightCloser,
        Self::LightFarther,
        Self::ToggleToon,
        Self::ToggleOutline,
        Self::ToggleBloom,
        Self::ToggleInvisible,
        Self::ResetModel,
        Self::Quit,
    ];

    /// Continuous actions apply every frame the key is held, scaled by the
    /// frame time. The rest fire once per key press.
    pub fn is_continuous(self) -> bool {
        !matches!(
            self,
            Self::ToggleToon
                | Self::ToggleOutline
                | Self::ToggleBloom
                | Self::ToggleInvisible
                | Self::ResetModel
                | Self::Quit
        )
    }

    pub fn default_key(self) -> KeyCode {
        match self {
            Self::CameraOrbitUp => KeyCode::KeyW,
            Self::CameraOrbitDown => KeyCode::KeyS,
            Self::CameraOrbitLeft => KeyCode::KeyA,
            Self::CameraOrbitRight => KeyCode::KeyD,
            Self::CameraPanForward => KeyCode::KeyI,
            Self::CameraPanBack => KeyCode::KeyK,
            Self::CameraPanLeft => KeyCode::KeyJ,
            Self::CameraPanRight => KeyCode::KeyL,
            Self::LightUp => KeyCode::ArrowUp,
            Self::LightDown => KeyCode::ArrowDown,
            Self::LightLeft => KeyCode::ArrowLeft,
            Self::LightRight => KeyCode::ArrowRight,
            Self::LightCloser => KeyCode::PageUp,
            Self::LightFarther => KeyCode::PageDown,
            Self::ToggleToon => KeyCode::KeyR,
            Self::ToggleOutline => KeyCode::KeyE,
            Self::ToggleBloom => KeyCode::KeyQ,
            Self::ToggleInvisible => KeyCode::KeyT,
            Self::ResetModel => KeyCode::KeyX,
            Self::Quit => KeyCode::Escape,
        }
    }
}

/// Action → key map. Serialized as a TOML table such as
/// `LightUp = "ArrowUp"`; actions missing from a file keep their default key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keybindings {
    bindings: BTreeMap<KeyAction, KeyCode>,
}

impl Default for Keybindings {
    fn default() -> Self {
        let bindings = KeyAction::ALL
            .into_iter()
            .map(|action| (action, action.default_key()))
            .collect();
        Self { bindings }
    }
}

impl Keybindings {
    /// Key bound to `action`, if any.
    pub fn key(&self, action: KeyAction) -> Option<KeyCode> {
        self.bindings.get(&action).copied()
    }

    pub fn bind(&mut self, action: KeyAction, key: KeyCode) {
        self.bindings.insert(action, key);
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeyAction, KeyCode)> + '_ {
        self.bindings.iter().map(|(action, key)| (*action, *key))
    }

    /// Bind every action that has no key yet to its default.
    pub fn fill_defaults(&mut self) {
        for action in KeyAction::ALL {
            self.bindings.entry(action).or_insert_with(|| action.default_key());
        }
    }

    /// Pairs of actions that share a key.
    pub fn conflicts(&self) -> Vec<(KeyAction, KeyAction)> {
        let entries: Vec<_> = self.iter().collect();
        let mut conflicts = Vec::new();
        for (i, (first, key)) in entries.iter().enumerate() {
            for (second, other) in &entries[i + 1..] {
                if key == other {
                    conflicts.push((*first, *second));
                }
            }
        }
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_action_without_conflicts() {
        let bindings = Keybindings::default();
        for action in KeyAction::ALL {
            assert_eq!(bindings.key(action), Some(action.default_key()));
        }
        assert!(bindings.conflicts().is_empty());
    }

    #[test]
    fn rebinding_can_introduce_conflicts() {
        let mut bindings = Keybindings::default();
        bindings.bind(KeyAction::LightUp, KeyCode::KeyW);
        assert_eq!(
            bindings.conflicts(),
            vec![(KeyAction::CameraOrbitUp, KeyAction::LightUp)]
        );
    }

    #[test]
    fn toggles_are_one_shot() {
        assert!(KeyAction::LightUp.is_continuous());
        assert!(KeyAction::CameraPanLeft.is_continuous());
        assert!(!KeyAction::ToggleBloom.is_continuous());
        assert!(!KeyAction::Quit.is_continuous());
    }
}
