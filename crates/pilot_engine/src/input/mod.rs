//! Input state
//!
//! The host fills an [`InputState`] from window events and per-frame timing;
//! the frame orchestrator only queries it.

use std::collections::{HashMap, HashSet};

use crate::foundation::math::Vec2;

/// Per-frame input snapshot plus held keys and buttons
#[derive(Debug, Clone)]
pub struct InputState {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Main viewport size in pixels
    pub viewport_size: Vec2,
    /// Smoothed frames per second reported by the host
    pub frame_rate: f32,
    /// Set when the UI wants mouse input for itself
    pub want_capture_mouse: bool,
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: Vec2,
    drag_origins: HashMap<MouseButton, Vec2>,
}

impl InputState {
    /// Create an input state for a viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            delta_time: 1.0 / 60.0,
            viewport_size: Vec2::new(width, height),
            frame_rate: 60.0,
            want_capture_mouse: false,
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            mouse_position: Vec2::zeros(),
            drag_origins: HashMap::new(),
        }
    }

    /// Whether the viewport has no area, as when the window is minimized
    pub fn is_minimized(&self) -> bool {
        self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0
    }

    /// Viewport width over height; 1.0 for a degenerate viewport
    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport_size.y > 0.0 {
            self.viewport_size.x / self.viewport_size.y
        } else {
            1.0
        }
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Handle mouse button input
    ///
    /// Pressing a button starts a drag at the current cursor position.
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons_down.insert(button);
            self.drag_origins.insert(button, self.mouse_position);
        } else {
            self.buttons_down.remove(&button);
            self.drag_origins.remove(&button);
        }
    }

    /// Handle mouse movement
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
    }

    /// Current cursor position
    pub const fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Whether a key is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether a button is held
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Whether the button is held and the cursor moved past `threshold` pixels
    pub fn is_mouse_dragging(&self, button: MouseButton, threshold: f32) -> bool {
        self.drag_origins
            .get(&button)
            .is_some_and(|origin| (self.mouse_position - origin).norm() >= threshold)
    }

    /// Cursor movement since the drag origin, or zero below `threshold`
    pub fn mouse_drag_delta(&self, button: MouseButton, threshold: f32) -> Vec2 {
        if self.is_mouse_dragging(button, threshold) {
            self.drag_origins
                .get(&button)
                .map_or_else(Vec2::zeros, |origin| self.mouse_position - origin)
        } else {
            Vec2::zeros()
        }
    }

    /// Move the drag origin to the current cursor position
    pub fn reset_mouse_drag_delta(&mut self, button: MouseButton) {
        if let Some(origin) = self.drag_origins.get_mut(&button) {
            *origin = self.mouse_position;
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
