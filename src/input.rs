use std::collections::HashSet;
use std::hash::Hash;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Held state plus this frame's press/release edges for one kind of button.
#[derive(Debug)]
struct ButtonSet<T> {
    down: HashSet<T>,
    pressed: HashSet<T>,
    released: HashSet<T>,
}

impl<T> Default for ButtonSet<T> {
    fn default() -> Self {
        Self {
            down: HashSet::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> ButtonSet<T> {
    fn press(&mut self, button: T) {
        // OS key repeat re-sends Pressed; only the first one is an edge.
        if self.down.insert(button) {
            self.pressed.insert(button);
        }
    }

    fn release(&mut self, button: T) {
        self.down.remove(&button);
        self.released.insert(button);
    }

    fn apply(&mut self, button: T, state: ElementState) {
        match state {
            ElementState::Pressed => self.press(button),
            ElementState::Released => self.release(button),
        }
    }

    fn clear_edges(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    fn clear(&mut self) {
        self.down.clear();
        self.clear_edges();
    }
}

/// Tracks keyboard, mouse button, cursor and scroll state between frames.
///
/// Feed it every [`WindowEvent`] with [`handle_event`](Self::handle_event) and
/// call [`begin_frame`](Self::begin_frame) once the frame has consumed it.
#[derive(Debug, Default)]
pub struct Input {
    keys: ButtonSet<KeyCode>,
    mouse_buttons: ButtonSet<MouseButton>,
    cursor: Option<Vec2>,
    cursor_delta: Vec2,
    scroll_delta: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame state: press/release edges, cursor and scroll deltas.
    pub fn begin_frame(&mut self) {
        self.keys.clear_edges();
        self.mouse_buttons.clear_edges();
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.keys.apply(key, event.state);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_buttons.apply(*button, *state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32) / 120.0
                    }
                };
            }
            // Releases that happen while unfocused never arrive.
            WindowEvent::Focused(false) => {
                self.keys.clear();
                self.mouse_buttons.clear();
            }
            _ => {}
        }
    }

    /// Record a key transition directly, bypassing winit events.
    pub fn set_key(&mut self, key: KeyCode, state: ElementState) {
        self.keys.apply(key, state);
    }

    /// Record a mouse button transition directly.
    pub fn set_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.mouse_buttons.apply(button, state);
    }

    /// Move the cursor to `position` (window pixels, Y down).
    pub fn move_cursor(&mut self, position: Vec2) {
        if let Some(previous) = self.cursor {
            self.cursor_delta += position - previous;
        }
        self.cursor = Some(position);
    }

    /// Add scroll "lines" as if the wheel had moved.
    pub fn scroll(&mut self, delta: Vec2) {
        self.scroll_delta += delta;
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys.down.contains(&key)
    }

    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys.pressed.contains(&key)
    }

    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys.released.contains(&key)
    }

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.down.contains(&button)
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.pressed.contains(&button)
    }

    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons.released.contains(&button)
    }

    /// Last known cursor position, `None` before the first move or after the
    /// cursor left the window.
    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Scroll wheel delta this frame (in "lines").
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edges_last_one_frame() {
        let mut input = Input::new();
        input.set_key(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.key_down(KeyCode::KeyW));
        assert!(input.key_pressed(KeyCode::KeyW));

        input.begin_frame();
        assert!(input.key_down(KeyCode::KeyW));
        assert!(!input.key_pressed(KeyCode::KeyW));

        input.set_key(KeyCode::KeyW, ElementState::Released);
        assert!(!input.key_down(KeyCode::KeyW));
        assert!(input.key_released(KeyCode::KeyW));
    }

    #[test]
    fn key_repeat_is_not_a_new_press() {
        let mut input = Input::new();
        input.set_key(KeyCode::KeyQ, ElementState::Pressed);
        input.begin_frame();
        input.set_key(KeyCode::KeyQ, ElementState::Pressed);
        assert!(!input.key_pressed(KeyCode::KeyQ));
    }

    #[test]
    fn cursor_delta_accumulates_after_first_move() {
        let mut input = Input::new();
        assert_eq!(input.cursor_position(), None);
        input.move_cursor(Vec2::new(10.0, 10.0));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
        input.move_cursor(Vec2::new(15.0, 8.0));
        input.move_cursor(Vec2::new(20.0, 9.0));
        assert_eq!(input.cursor_delta(), Vec2::new(10.0, -1.0));
        assert_eq!(input.cursor_position(), Some(Vec2::new(20.0, 9.0)));

        input.begin_frame();
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
    }

    #[test]
    fn mouse_buttons_track_edges() {
        let mut input = Input::new();
        input.set_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(input.mouse_pressed(MouseButton::Left));
        input.begin_frame();
        assert!(input.mouse_down(MouseButton::Left));
        input.set_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(input.mouse_released(MouseButton::Left));
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn losing_focus_releases_everything() {
        let mut input = Input::new();
        input.set_key(KeyCode::ArrowUp, ElementState::Pressed);
        input.set_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.handle_event(&WindowEvent::Focused(false));
        assert!(!input.key_down(KeyCode::ArrowUp));
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn scroll_resets_each_frame() {
        let mut input = Input::new();
        input.scroll(Vec2::new(0.0, 2.0));
        input.scroll(Vec2::new(0.0, -0.5));
        assert_eq!(input.scroll_delta(), Vec2::new(0.0, 1.5));
        input.begin_frame();
        assert_eq!(input.scroll_delta(), Vec2::ZERO);
    }
}
