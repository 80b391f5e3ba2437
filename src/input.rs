//! Input state tracking for the window shell.
//!
//! Wraps raw winit events into per-frame state a demo can query: keys and
//! mouse buttons as held/pressed/released sets, cursor position in pixels,
//! cursor delta, and scroll wheel delta. Window y grows downward; use
//! [`Input::mouse_position_y_up`] where screen-space math expects y-up.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left, // Default for other buttons
        }
    }
}

/// The keys the demos react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Shift,
    Escape,
    Space,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::ShiftLeft | WinitKeyCode::ShiftRight => KeyCode::Shift,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Space => KeyCode::Space,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Input state tracking for keyboard and mouse.
///
/// Tracks both instantaneous events (pressed/released this frame) and
/// continuous state (currently held).
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,

    mouse_held: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,
    mouse_released: HashSet<MouseButton>,

    mouse_position: Vec2,
    mouse_delta: Vec2,
    last_mouse_position: Vec2,
    /// False until the first cursor event; suppresses a bogus initial delta.
    has_cursor: bool,

    scroll_delta: f32,
}

impl Input {
    /// Create a new input tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was released this frame (just went up).
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a mouse button was released this frame.
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Cursor position in window pixels, y growing downward.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Cursor position in window pixels with y growing upward.
    pub fn mouse_position_y_up(&self, viewport_height: f32) -> Vec2 {
        Vec2::new(
            self.mouse_position.x,
            viewport_height - self.mouse_position.y,
        )
    }

    /// Cursor movement since last frame in pixels (window convention, y down).
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll wheel delta this frame; positive scrolls up/forward.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Called at the start of each frame to clear per-frame state.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = KeyCode::from(keycode);
                    match event.state {
                        ElementState::Pressed => {
                            // Only fire pressed event if not already held (no repeat)
                            if !self.keys_held.contains(&key) {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_held.insert(key);
                        }
                        ElementState::Released => {
                            self.keys_held.remove(&key);
                            self.keys_released.insert(key);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => {
                        self.mouse_pressed.insert(btn);
                        self.mouse_held.insert(btn);
                    }
                    ElementState::Released => {
                        self.mouse_held.remove(&btn);
                        self.mouse_released.insert(btn);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                if self.has_cursor {
                    self.mouse_delta += new_pos - self.last_mouse_position;
                }
                self.has_cursor = true;
                self.last_mouse_position = new_pos;
                self.mouse_position = new_pos;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => *y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }

            _ => {}
        }
    }
}
